use crate::models::chat::{ ChatMessage, Conversation };
use std::collections::VecDeque;

pub const DEFAULT_HISTORY_LIMIT: usize = 40;

/// Ordered message history for one conversation, capped at `capacity` entries.
/// The oldest messages are dropped first.
#[derive(Clone, Debug)]
pub struct ConversationSession {
    id: String,
    messages: VecDeque<ChatMessage>,
    capacity: usize,
}

impl ConversationSession {
    pub fn new(id: impl Into<String>, capacity: usize) -> Self {
        Self {
            id: id.into(),
            messages: VecDeque::with_capacity(capacity.min(DEFAULT_HISTORY_LIMIT)),
            capacity,
        }
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push_back(message);
        self.trim();
    }

    fn trim(&mut self) {
        while self.messages.len() > self.capacity {
            self.messages.pop_front();
        }
    }

    pub fn snapshot(&self) -> Conversation {
        Conversation {
            id: self.id.clone(),
            messages: self.messages.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatRole;

    #[test]
    fn keeps_only_the_most_recent_messages_in_order() {
        let mut session = ConversationSession::new("default", DEFAULT_HISTORY_LIMIT);
        for turn in 1..=21 {
            session.push(ChatMessage::user(format!("question {}", turn)));
            session.push(ChatMessage::assistant(format!("answer {}", turn)));
            assert!(session.snapshot().messages.len() <= DEFAULT_HISTORY_LIMIT);
        }

        let messages = session.snapshot().messages;
        assert_eq!(messages.len(), 40);
        assert_eq!(messages[0].content, "question 2");
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[39].content, "answer 21");
        assert_eq!(messages[39].role, ChatRole::Assistant);
    }

    #[test]
    fn snapshot_carries_the_conversation_id() {
        let mut session = ConversationSession::new("abc", 4);
        session.push(ChatMessage::user("hi"));
        let conversation = session.snapshot();
        assert_eq!(conversation.id, "abc");
        assert_eq!(conversation.messages.len(), 1);
    }

    #[test]
    fn zero_capacity_holds_nothing() {
        let mut session = ConversationSession::new("abc", 0);
        session.push(ChatMessage::user("hi"));
        assert!(session.snapshot().messages.is_empty());
    }
}
