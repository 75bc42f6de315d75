pub mod groq;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;
use super::LlmConfig;
use crate::models::chat::ChatMessage;
use self::groq::GroqChatClient;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured")]
    NotConfigured,
    #[error("Invalid API key format: {0}")]
    InvalidApiKey(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Error code: {status} - {body}")]
    Api {
        status: u16,
        body: String,
    },
    #[error("No response from completion API")]
    EmptyResponse,
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub response: String,
}

/// A remote chat-completion provider.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// `history` is sent in order after the system prompt; the last entry is the new user turn.
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[ChatMessage]
    ) -> Result<CompletionResponse, LlmError>;

    fn get_model(&self) -> String;
}

pub fn new_client(config: &LlmConfig) -> Result<Arc<dyn ChatClient>, LlmError> {
    let client = GroqChatClient::from_config(config)?;
    Ok(Arc::new(client))
}
