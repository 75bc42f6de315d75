pub mod agent;
pub mod models;
pub mod server;
pub mod config;
pub mod llm;
pub mod cli;
pub mod history;
pub mod training;

use agent::AIAgent;
use cli::Args;
use config::prompt::MODEL;
use log::info;
use server::Server;
use std::error::Error;
use std::sync::Arc;

pub async fn run(args: Args) -> Result<(), Box<dyn Error + Send + Sync>> {
    let groq_ok = args.api_key().is_some();

    info!("--- Navis AI Assistant ---");
    if groq_ok {
        info!("AI Engine: Groq ({})", MODEL);
    } else {
        info!("AI Engine: disabled, set GROQ_API_KEY in .env");
    }
    info!("Training Data: {}", args.training_data_path);
    info!("Similarity Threshold: {}", args.similarity_threshold);
    info!("History Limit: {} messages", args.history_limit);
    info!("Max Sessions: {}", args.max_sessions);
    info!("Request Timeout: {}s", args.request_timeout_secs);
    info!("Static Dir: {}", args.static_dir);
    info!("Index Page: {}", args.index_path);
    info!("--------------------------");

    let agent = Arc::new(AIAgent::new(&args)?);
    let addr = args.server_addr();
    info!("Starting server on: {}", addr);
    let server = Server::new(addr, agent, args.clone());
    server.run().await?;

    Ok(())
}
