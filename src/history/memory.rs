use async_trait::async_trait;
use crate::history::HistoryStore;
use crate::history::session::ConversationSession;
use crate::models::chat::{ ChatMessage, Conversation };
use log::debug;
use std::collections::HashMap;
use std::error::Error;
use tokio::sync::Mutex;

struct SessionEntry {
    session: ConversationSession,
    last_used: u64,
}

struct Sessions {
    entries: HashMap<String, SessionEntry>,
    clock: u64,
}

/// Process-local history. Lost on restart.
///
/// Holds at most `max_sessions` conversations; adding a new one past that
/// evicts the least recently used.
pub struct MemoryHistoryStore {
    sessions: Mutex<Sessions>,
    limit: usize,
    max_sessions: usize,
}

impl MemoryHistoryStore {
    pub fn new(limit: usize, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions {
                entries: HashMap::new(),
                clock: 0,
            }),
            limit,
            max_sessions: max_sessions.max(1),
        }
    }

    #[cfg(test)]
    async fn session_count(&self) -> usize {
        self.sessions.lock().await.entries.len()
    }
}

impl Sessions {
    fn evict_least_recent(&mut self) {
        let oldest = self.entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(id, _)| id.clone());
        if let Some(id) = oldest {
            debug!("Evicting idle conversation {}", id);
            self.entries.remove(&id);
        }
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn add_message(
        &self,
        conversation_id: &str,
        message: ChatMessage
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut sessions = self.sessions.lock().await;
        sessions.clock += 1;
        let now = sessions.clock;

        if !sessions.entries.contains_key(conversation_id) {
            while sessions.entries.len() >= self.max_sessions {
                sessions.evict_least_recent();
            }
        }

        let entry = sessions.entries
            .entry(conversation_id.to_string())
            .or_insert_with(|| SessionEntry {
                session: ConversationSession::new(conversation_id, self.limit),
                last_used: now,
            });
        entry.last_used = now;
        entry.session.push(message);
        Ok(())
    }

    async fn get_conversation(
        &self,
        conversation_id: &str
    ) -> Result<Conversation, Box<dyn Error + Send + Sync>> {
        let sessions = self.sessions.lock().await;
        Ok(
            sessions.entries
                .get(conversation_id)
                .map(|entry| entry.session.snapshot())
                .unwrap_or_else(|| Conversation {
                    id: conversation_id.to_string(),
                    messages: Vec::new(),
                })
        )
    }

    async fn clear(&self, conversation_id: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.sessions.lock().await.entries.remove(conversation_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_are_independent() {
        let store = MemoryHistoryStore::new(40, 16);
        store.add_message("alice", ChatMessage::user("hi from alice")).await.unwrap();
        store.add_message("bob", ChatMessage::user("hi from bob")).await.unwrap();

        store.clear("alice").await.unwrap();

        assert!(store.get_conversation("alice").await.unwrap().messages.is_empty());
        let bob = store.get_conversation("bob").await.unwrap();
        assert_eq!(bob.messages.len(), 1);
        assert_eq!(bob.messages[0].content, "hi from bob");
    }

    #[tokio::test]
    async fn unknown_conversation_is_empty() {
        let store = MemoryHistoryStore::new(40, 16);
        let conversation = store.get_conversation("nobody").await.unwrap();
        assert_eq!(conversation.id, "nobody");
        assert!(conversation.messages.is_empty());
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn limit_applies_per_conversation() {
        let store = MemoryHistoryStore::new(2, 16);
        for i in 0..5 {
            store.add_message("c", ChatMessage::user(format!("m{}", i))).await.unwrap();
        }
        let contents: Vec<String> = store
            .get_conversation("c").await
            .unwrap()
            .messages.into_iter()
            .map(|m| m.content)
            .collect();
        assert_eq!(contents, vec!["m3", "m4"]);
    }

    #[tokio::test]
    async fn reset_drops_the_conversation() {
        let store = MemoryHistoryStore::new(40, 100_000);
        for i in 0..10_000 {
            let id = format!("session-{}", i);
            store.add_message(&id, ChatMessage::user("hello")).await.unwrap();
            store.clear(&id).await.unwrap();
        }
        assert_eq!(store.session_count().await, 0);
    }

    #[tokio::test]
    async fn distinct_ids_are_capped_by_evicting_the_least_recent() {
        let store = MemoryHistoryStore::new(40, 3);
        store.add_message("a", ChatMessage::user("1")).await.unwrap();
        store.add_message("b", ChatMessage::user("2")).await.unwrap();
        store.add_message("c", ChatMessage::user("3")).await.unwrap();
        // "a" becomes the most recent, so "b" is the one to go
        store.add_message("a", ChatMessage::user("4")).await.unwrap();
        store.add_message("d", ChatMessage::user("5")).await.unwrap();

        assert_eq!(store.session_count().await, 3);
        assert!(store.get_conversation("b").await.unwrap().messages.is_empty());
        assert_eq!(store.get_conversation("a").await.unwrap().messages.len(), 2);

        for i in 0..1_000 {
            store.add_message(&format!("random-{}", i), ChatMessage::user("x")).await.unwrap();
        }
        assert_eq!(store.session_count().await, 3);
    }
}
