use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// User preferences for the terminal front end.
///
/// Read from `<config dir>/aichat/config.json`. The API key entered on the
/// settings screen is never stored here.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// How long a notice toast stays on screen
    pub toast_duration_ms: u64,
    /// Interval of the tick event driving the busy spinner and toast expiry
    pub tick_rate_ms: u64,
    /// Visible lines of the message input before it scrolls
    pub input_max_lines: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            toast_duration_ms: 4000,
            tick_rate_ms: 300,
            input_max_lines: 3,
        }
    }
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::get_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file {:?}", config_path))?;
        let config: Config = serde_json::from_str(&config_content)
            .with_context(|| format!("Invalid config file {:?}", config_path))?;
        Ok(config)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        // A zero interval would make tokio's interval panic
        Duration::from_millis(self.tick_rate_ms.max(1))
    }

    fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?;

        Ok(config_dir.join("aichat").join("config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "toast_duration_ms": 1500 }}"#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.toast_duration_ms, 1500);
        assert_eq!(config.tick_rate_ms, 300);
        assert_eq!(config.input_max_lines, 3);
        assert_eq!(config.toast_duration(), Duration::from_millis(1500));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = Config::load(Some(file.path())).unwrap_err();
        assert!(err.to_string().contains("Invalid config file"));
    }

    #[test]
    fn test_zero_tick_rate_is_clamped() {
        let config = Config {
            tick_rate_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.tick_rate(), Duration::from_millis(1));
    }
}
