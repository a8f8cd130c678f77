//! Settings store port.
//!
//! Settings are read at every trigger point instead of being cached in a
//! process-wide flag, so a toggle made by one command is seen by the next
//! one without any shared mutable state in the engine.

use pipefmt_domain::FormatterSettings;
use thiserror::Error;

/// Errors from the settings store.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(String),

    #[error("Failed to store settings at {path}: {message}")]
    Store { path: String, message: String },
}

/// Port for reading and persisting formatter settings.
pub trait SettingsPort: Send + Sync {
    /// Current settings from every configured source.
    fn load(&self) -> Result<FormatterSettings, SettingsError>;

    /// Persist the format-on-persist flag.
    fn set_format_on_persist(&self, enabled: bool) -> Result<(), SettingsError>;
}
