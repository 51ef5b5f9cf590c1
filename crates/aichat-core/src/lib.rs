pub mod chat;
pub mod datetime;
pub mod message;
pub mod settings;

// Re-export main types for convenience
pub use chat::{ChatState, CAMERA_UNAVAILABLE_NOTICE};
pub use datetime::{format_date_only, format_time_only};
pub use message::{Author, Message};
pub use settings::SettingsState;
