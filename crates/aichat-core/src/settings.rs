//! Settings screen state. Holds the API key draft only; nothing here is persisted.

#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    api_key_draft: String,
}

impl SettingsState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn api_key_draft(&self) -> &str {
        &self.api_key_draft
    }

    pub fn set_api_key_draft(&mut self, value: impl Into<String>) {
        self.api_key_draft = value.into();
    }

    pub fn clear(&mut self) {
        self.api_key_draft.clear();
    }

    /// Finish editing. Storage of the key is not implemented; the callback
    /// runs so the caller can leave the screen.
    pub fn save<F: FnOnce()>(&self, on_saved: F) {
        on_saved();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_clear() {
        let mut settings = SettingsState::new();
        assert_eq!(settings.api_key_draft(), "");

        settings.set_api_key_draft("sk-123");
        assert_eq!(settings.api_key_draft(), "sk-123");

        settings.set_api_key_draft("");
        assert_eq!(settings.api_key_draft(), "");

        settings.set_api_key_draft("sk-456");
        settings.clear();
        assert_eq!(settings.api_key_draft(), "");
    }

    #[test]
    fn test_save_runs_callback_once_and_keeps_draft() {
        let mut settings = SettingsState::new();
        settings.set_api_key_draft("key");

        let mut calls = 0;
        settings.save(|| calls += 1);

        assert_eq!(calls, 1);
        assert_eq!(settings.api_key_draft(), "key");
    }
}
