//! UI-agnostic message types
//!
//! A [`Message`] is one line of the conversation. It does not depend on any
//! UI framework so both the terminal front end and tests can build them freely.

use serde::{Deserialize, Serialize};

/// Who wrote a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Author {
    User,
    Ai,
}

impl Author {
    pub fn label(&self) -> &'static str {
        match self {
            Author::User => "あなた",
            Author::Ai => "AI",
        }
    }
}

/// A single chat message. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    id: u64,
    text: String,
    author: Author,
    /// Milliseconds since the Unix epoch
    created_at: i64,
}

impl Message {
    /// Create a message stamped with the current time
    pub fn new(id: u64, text: impl Into<String>, author: Author) -> Self {
        Self::with_created_at(id, text, author, chrono::Utc::now().timestamp_millis())
    }

    pub fn with_created_at(id: u64, text: impl Into<String>, author: Author, created_at: i64) -> Self {
        Self {
            id,
            text: text.into(),
            author,
            created_at,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> Author {
        self.author
    }

    pub fn created_at(&self) -> i64 {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stamps_current_time() {
        let before = chrono::Utc::now().timestamp_millis();
        let msg = Message::new(3, "hello", Author::User);
        let after = chrono::Utc::now().timestamp_millis();

        assert_eq!(msg.id(), 3);
        assert_eq!(msg.text(), "hello");
        assert_eq!(msg.author(), Author::User);
        assert!(msg.created_at() >= before && msg.created_at() <= after);
    }

    #[test]
    fn test_author_serializes_as_variant_name() {
        let json = serde_json::to_string(&Author::Ai).unwrap();
        assert_eq!(json, "\"Ai\"");
    }

    #[test]
    fn test_message_json_shape() {
        let msg = Message::with_created_at(0, "hi", Author::Ai, 1_700_000_000_000);
        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["id"], 0);
        assert_eq!(value["text"], "hi");
        assert_eq!(value["author"], "Ai");
        assert_eq!(value["created_at"], 1_700_000_000_000i64);
    }
}
