mod memory;
pub mod session;

pub use memory::MemoryHistoryStore;
pub use session::{ ConversationSession, DEFAULT_HISTORY_LIMIT };

/// Conversations kept before the least recently used one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

use async_trait::async_trait;
use log::info;
use std::error::Error;
use crate::cli::Args;
use std::sync::Arc;
use crate::models::chat::{ ChatMessage, Conversation };

/// Conversation id used when the client does not identify its session.
pub const DEFAULT_CONVERSATION_ID: &str = "default";

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Appends and trims to the store's message limit.
    async fn add_message(
        &self,
        conversation_id: &str,
        message: ChatMessage
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    async fn get_conversation(
        &self,
        conversation_id: &str
    ) -> Result<Conversation, Box<dyn Error + Send + Sync>>;

    async fn clear(&self, conversation_id: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}

pub fn initialize_history_store(args: &Args) -> Arc<dyn HistoryStore> {
    info!(
        "Chat history kept in memory, last {} messages per conversation, at most {} conversations",
        args.history_limit,
        args.max_sessions
    );
    Arc::new(MemoryHistoryStore::new(args.history_limit, args.max_sessions))
}
