use crate::agent::{ AgentError, AIAgent };
use crate::history::DEFAULT_CONVERSATION_ID;
use crate::models::api::{
    ChatRequest,
    ChatResponse,
    ErrorResponse,
    HealthResponse,
    SuccessResponse,
    TrainRequest,
    TrainResponse,
};
use crate::models::training::TrainingData;
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use axum::{
    routing::{ get, post, delete },
    Json,
    Router,
    extract::{ Path, State },
    response::{ IntoResponse, Response },
    http::{ HeaderMap, StatusCode },
};
use tower_http::cors::{ Any, CorsLayer };
use tower_http::services::{ ServeDir, ServeFile };
use log::{ info, error };

/// Header a client may send to keep its own conversation history.
pub const SESSION_HEADER: &str = "x-session-id";

#[derive(Clone)]
struct AppState {
    agent: Arc<AIAgent>,
}

pub struct ApiError(AgentError);

impl From<AgentError> for ApiError {
    fn from(err: AgentError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AgentError::Validation(_) => StatusCode::BAD_REQUEST,
            _ => {
                error!("Request failed: {}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (status, Json(ErrorResponse { error: self.0.to_string() })).into_response()
    }
}

fn conversation_id(headers: &HeaderMap) -> String {
    headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_CONVERSATION_ID)
        .to_string()
}

pub fn create_router(agent: Arc<AIAgent>, static_dir: &str, index_path: &str) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/chat", post(chat_handler))
        .route("/api/train", post(train_handler))
        .route("/api/training-data", get(training_data_handler))
        .route("/api/training-data/{id}", delete(delete_training_handler))
        .route("/api/reset", post(reset_handler))
        .route_service("/", ServeFile::new(index_path))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(cors)
        .with_state(AppState { agent })
}

pub async fn start_http_server(
    addr: &str,
    agent: Arc<AIAgent>,
    static_dir: &str,
    index_path: &str
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    let app = create_router(agent, static_dir, index_path);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
        e
    })?;
    info!("HTTP server listening on: http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal()).await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.agent.model(),
        groq: state.agent.is_configured(),
    })
}

async fn chat_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<ChatRequest>
) -> Result<Json<ChatResponse>, ApiError> {
    let id = conversation_id(&headers);
    let reply = state.agent.process_message(&id, &req.message).await?;
    Ok(Json(reply))
}

async fn train_handler(
    State(state): State<AppState>,
    Json(req): Json<TrainRequest>
) -> Result<Json<TrainResponse>, ApiError> {
    let id = state.agent.train(&req.question, &req.answer).await?;
    Ok(Json(TrainResponse { success: true, id }))
}

async fn training_data_handler(
    State(state): State<AppState>
) -> Result<Json<TrainingData>, ApiError> {
    Ok(Json(state.agent.training_data().await?))
}

async fn delete_training_handler(
    State(state): State<AppState>,
    Path(id): Path<u64>
) -> Result<Json<SuccessResponse>, ApiError> {
    state.agent.delete_training(id).await?;
    Ok(Json(SuccessResponse { success: true }))
}

async fn reset_handler(
    State(state): State<AppState>,
    headers: HeaderMap
) -> Result<Json<SuccessResponse>, ApiError> {
    state.agent.reset_conversation(&conversation_id(&headers)).await?;
    Ok(Json(SuccessResponse { success: true }))
}
