use std::time::{Duration, Instant};
use aichat_core::{ChatState, SettingsState};
use ratatui::layout::Rect;
use crate::config::Config;
use crate::input::{Edit, InputCursor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Chat,
    Settings,
}

/// A notice currently on screen
#[derive(Debug, Clone)]
pub struct Toast {
    pub text: String,
    pub shown_at: Instant,
}

pub struct App {
    pub should_quit: bool,
    pub screen: Screen,

    // Chat screen
    pub chat: ChatState,
    pub draft_cursor: InputCursor,
    /// Id of the message pinned to the bottom of the history pane; `None` follows the newest
    pub history_anchor: Option<u64>,
    pub toast: Option<Toast>,

    // Settings screen, recreated on every visit
    pub settings: SettingsState,
    pub api_key_cursor: InputCursor,

    // Animation state for the busy spinner
    pub animation_frame: usize,

    // Layout areas for mouse hit-testing, updated on each render
    pub history_area: Option<Rect>,

    toast_duration: Duration,
    pub input_max_lines: u16,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self {
            should_quit: false,
            screen: Screen::Chat,
            chat: ChatState::new(),
            draft_cursor: InputCursor::default(),
            history_anchor: None,
            toast: None,
            settings: SettingsState::new(),
            api_key_cursor: InputCursor::default(),
            animation_frame: 0,
            history_area: None,
            toast_duration: config.toast_duration(),
            input_max_lines: config.input_max_lines.max(1),
        }
    }

    pub fn quit(&mut self) {
        tracing::info!("quit requested");
        self.should_quit = true;
    }

    pub fn navigate_to_settings(&mut self) {
        if self.screen == Screen::Settings {
            return;
        }
        tracing::debug!("navigate: chat -> settings");
        self.settings = SettingsState::new();
        self.api_key_cursor.reset();
        self.screen = Screen::Settings;
    }

    pub fn navigate_back(&mut self) {
        if self.screen == Screen::Settings {
            tracing::debug!("navigate: settings -> chat");
            self.screen = Screen::Chat;
        }
    }

    pub fn edit_draft(&mut self, edit: Edit) {
        if let Some(text) = self.draft_cursor.apply(self.chat.draft_text(), edit) {
            self.chat.set_draft_text(text);
        }
    }

    pub fn send_draft(&mut self) {
        if !self.chat.is_send_enabled() {
            return;
        }
        let sent = self.chat.send();
        tracing::debug!(id = sent.id(), author = ?sent.author(), "message sent");
        self.draft_cursor.reset();
        self.history_anchor = None;
    }

    pub fn delete_all(&mut self) {
        if !self.chat.can_clear_history() {
            return;
        }
        tracing::debug!(count = self.chat.messages().len(), "history cleared");
        self.chat.clear_history();
        self.history_anchor = None;
    }

    pub fn open_camera(&mut self) {
        tracing::debug!("camera requested");
        self.chat.trigger_unavailable_feature();
    }

    /// Show a pending notice as a toast and acknowledge it.
    /// Runs once per handled event, so each trigger is displayed once.
    pub fn present_pending_notice(&mut self, now: Instant) {
        if let Some(text) = self.chat.pending_notice() {
            self.toast = Some(Toast {
                text: text.to_string(),
                shown_at: now,
            });
            self.chat.acknowledge_notice();
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.animation_frame = self.animation_frame.wrapping_add(1);

        let expired = self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= self.toast_duration);
        if expired {
            self.toast = None;
        }
    }

    /// Index of the message shown at the bottom of the history pane
    pub fn anchor_index(&self) -> Option<usize> {
        let messages = self.chat.messages();
        if messages.is_empty() {
            return None;
        }
        let newest = messages.len() - 1;
        match self.history_anchor {
            Some(id) => messages.iter().position(|m| m.id() == id).or(Some(newest)),
            None => Some(newest),
        }
    }

    /// Move the history view back towards older messages
    pub fn scroll_history_up(&mut self, steps: usize) {
        if let Some(idx) = self.anchor_index() {
            let target = idx.saturating_sub(steps);
            self.history_anchor = Some(self.chat.messages()[target].id());
        }
    }

    /// Move the history view towards the newest message
    pub fn scroll_history_down(&mut self, steps: usize) {
        if let Some(idx) = self.anchor_index() {
            let newest = self.chat.messages().len() - 1;
            let target = idx + steps;
            self.history_anchor = if target >= newest {
                None
            } else {
                Some(self.chat.messages()[target].id())
            };
        }
    }

    pub fn edit_api_key(&mut self, edit: Edit) {
        if let Some(text) = self.api_key_cursor.apply(self.settings.api_key_draft(), edit) {
            self.settings.set_api_key_draft(text);
        }
    }

    pub fn clear_api_key(&mut self) {
        self.settings.clear();
        self.api_key_cursor.reset();
    }

    pub fn save_settings(&mut self) {
        tracing::debug!(key_len = self.settings.api_key_draft().chars().count(), "settings saved");
        let mut saved = false;
        self.settings.save(|| saved = true);
        if saved {
            self.navigate_back();
        }
    }
}
