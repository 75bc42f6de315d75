use crate::cli::Args;
use crate::config::prompt::{ self, MODEL, NOT_CONFIGURED_RESPONSE, SYSTEM_PROMPT };
use crate::history::{ initialize_history_store, HistoryStore };
use crate::llm::LlmConfig;
use crate::llm::chat::{ ChatClient, LlmError, new_client as new_chat_client };
use crate::models::api::{ ChatResponse, ResponseSource };
use crate::models::chat::ChatMessage;
use crate::models::training::TrainingData;
use crate::training::{ matcher, StoreError, TrainingStore };

use log::{ info, warn, error };
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(StoreError),
    #[error("Conversation history unavailable: {0}")]
    History(String),
    #[error(transparent)]
    Upstream(#[from] LlmError),
    #[error("Training data task failed: {0}")]
    Task(#[from] JoinError),
}

impl From<StoreError> for AgentError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(msg) => AgentError::Validation(msg),
            other => AgentError::Store(other),
        }
    }
}

fn history_error(e: Box<dyn Error + Send + Sync>) -> AgentError {
    AgentError::History(e.to_string())
}

/// Answers chat messages from trained pairs first, then from the remote model.
#[derive(Clone)]
pub struct AIAgent {
    chat_client: Option<Arc<dyn ChatClient>>,
    history_store: Arc<dyn HistoryStore>,
    training_store: TrainingStore,
    similarity_threshold: f64,
}

impl AIAgent {
    pub fn new(args: &Args) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let chat_client = match args.api_key() {
            Some(api_key) => {
                let config = LlmConfig {
                    api_key: Some(api_key),
                    completion_model: Some(MODEL.to_string()),
                    base_url: Some(args.groq_base_url.clone()),
                    timeout: Duration::from_secs(args.request_timeout_secs),
                };
                let client = new_chat_client(&config)?;
                info!("Chat client configured: Model={}, BaseURL={}", MODEL, args.groq_base_url);
                Some(client)
            }
            None => {
                warn!("No GROQ_API_KEY set; only trained answers will be served.");
                None
            }
        };

        let training_store = TrainingStore::new(&args.training_data_path);
        if let Err(e) = training_store.ensure_exists() {
            warn!(
                "Could not create training data file {}: {}; continuing, training edits will fail until it is writable",
                training_store.path().display(),
                e
            );
        }

        Ok(
            Self::with_parts(
                chat_client,
                initialize_history_store(args),
                training_store,
                args.similarity_threshold
            )
        )
    }

    pub fn with_parts(
        chat_client: Option<Arc<dyn ChatClient>>,
        history_store: Arc<dyn HistoryStore>,
        training_store: TrainingStore,
        similarity_threshold: f64
    ) -> Self {
        Self {
            chat_client,
            history_store,
            training_store,
            similarity_threshold,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.chat_client.is_some()
    }

    pub fn model(&self) -> String {
        self.chat_client
            .as_ref()
            .map(|c| c.get_model())
            .unwrap_or_else(|| MODEL.to_string())
    }

    pub async fn process_message(
        &self,
        conversation_id: &str,
        message: &str
    ) -> Result<ChatResponse, AgentError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AgentError::Validation("Empty message".into()));
        }

        let data = self.with_store(|store| store.load()).await.map_err(|e| {
            error!("Failed to load training data: {}", e);
            e
        })?;
        let trained = matcher::find_answer(message, &data.qa_pairs, self.similarity_threshold);
        if let Some(answer) = trained.filter(|answer| !answer.trim().is_empty()) {
            info!("[{}] Answered from trained data", conversation_id);
            return Ok(ChatResponse {
                response: answer,
                source: ResponseSource::Trained,
            });
        }

        let chat_client = match &self.chat_client {
            Some(client) => client,
            None => {
                info!("[{}] No trained match and no chat client configured", conversation_id);
                return Ok(ChatResponse {
                    response: NOT_CONFIGURED_RESPONSE.to_string(),
                    source: ResponseSource::Error,
                });
            }
        };

        match self.complete_with_history(chat_client.as_ref(), conversation_id, message).await {
            Ok(text) => {
                info!("[{}] Answered by {}", conversation_id, chat_client.get_model());
                Ok(ChatResponse {
                    response: text,
                    source: ResponseSource::Ai,
                })
            }
            Err(AgentError::Upstream(e)) => {
                warn!("[{}] Completion failed: {}", conversation_id, e);
                Ok(ChatResponse {
                    response: prompt::upstream_error_response(&e.to_string()),
                    source: ResponseSource::Error,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Records the user turn, asks the model, and records the reply.
    ///
    /// The user turn stays in history even when the model call fails; the
    /// assistant turn is only added on success.
    async fn complete_with_history(
        &self,
        chat_client: &dyn ChatClient,
        conversation_id: &str,
        message: &str
    ) -> Result<String, AgentError> {
        self.history_store
            .add_message(conversation_id, ChatMessage::user(message)).await
            .map_err(history_error)?;
        let conversation = self.history_store
            .get_conversation(conversation_id).await
            .map_err(history_error)?;

        let reply = chat_client.complete(SYSTEM_PROMPT, &conversation.messages).await?.response;

        self.history_store
            .add_message(conversation_id, ChatMessage::assistant(reply.clone())).await
            .map_err(history_error)?;
        Ok(reply)
    }

    pub async fn reset_conversation(&self, conversation_id: &str) -> Result<(), AgentError> {
        self.history_store.clear(conversation_id).await.map_err(history_error)?;
        info!("[{}] Conversation reset", conversation_id);
        Ok(())
    }

    pub async fn train(&self, question: &str, answer: &str) -> Result<u64, AgentError> {
        let (question, answer) = (question.to_string(), answer.to_string());
        self.with_store(move |store| store.add(&question, &answer)).await
    }

    pub async fn delete_training(&self, id: u64) -> Result<(), AgentError> {
        self.with_store(move |store| store.remove(id)).await
    }

    pub async fn training_data(&self) -> Result<TrainingData, AgentError> {
        self.with_store(|store| store.load()).await
    }

    /// Runs a file-backed store operation on the blocking pool.
    async fn with_store<T, F>(&self, op: F) -> Result<T, AgentError>
        where F: FnOnce(&TrainingStore) -> Result<T, StoreError> + Send + 'static, T: Send + 'static
    {
        let store = self.training_store.clone();
        Ok(tokio::task::spawn_blocking(move || op(&store)).await??)
    }
}
