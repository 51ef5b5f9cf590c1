//! Chat screen state
//!
//! [`ChatState`] owns everything the chat screen mutates: the draft in the
//! input box, the message history, the busy flag and a one-shot notice. Every
//! transition is synchronous and total; the front end decides when a
//! transition is allowed (for example only sending when [`ChatState::is_send_enabled`]).

use crate::message::{Author, Message};

/// Shown when the camera control is used
pub const CAMERA_UNAVAILABLE_NOTICE: &str = "カメラ機能は未実装です";

#[derive(Debug, Clone, Default)]
pub struct ChatState {
    draft_text: String,
    /// Oldest first
    messages: Vec<Message>,
    is_busy: bool,
    pending_notice: Option<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn pending_notice(&self) -> Option<&str> {
        self.pending_notice.as_deref()
    }

    pub fn set_draft_text(&mut self, text: impl Into<String>) {
        self.draft_text = text.into();
    }

    pub fn set_busy(&mut self, busy: bool) {
        self.is_busy = busy;
    }

    /// Append the draft as a new message and clear the draft.
    ///
    /// The id is the history length before the append, and the author
    /// alternates User/Ai by that same count to stand in for a conversation
    /// partner. Does not check the draft; callers gate on `is_send_enabled`.
    pub fn send(&mut self) -> &Message {
        let count = self.messages.len();
        let author = if count % 2 == 0 { Author::User } else { Author::Ai };
        let text = std::mem::take(&mut self.draft_text);

        self.messages.push(Message::new(count as u64, text, author));
        &self.messages[count]
    }

    /// Drop the whole history. Draft and busy flag are left alone.
    pub fn clear_history(&mut self) {
        self.messages.clear();
    }

    /// Raise the camera notice. Overwrites any notice still pending.
    pub fn trigger_unavailable_feature(&mut self) {
        self.pending_notice = Some(CAMERA_UNAVAILABLE_NOTICE.to_string());
    }

    pub fn acknowledge_notice(&mut self) {
        self.pending_notice = None;
    }

    pub fn is_send_enabled(&self) -> bool {
        !self.draft_text.is_empty() && !self.is_busy
    }

    pub fn can_clear_history(&self) -> bool {
        !self.messages.is_empty()
    }

    /// Messages in reverse chronological order
    pub fn history_newest_first(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().rev()
    }
}
