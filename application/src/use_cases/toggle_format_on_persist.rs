//! Toggle Format-on-Persist use case

use crate::ports::settings::{SettingsError, SettingsPort};
use std::sync::Arc;
use tracing::info;

pub struct ToggleFormatOnPersistUseCase<S: SettingsPort + ?Sized> {
    settings: Arc<S>,
}

impl<S: SettingsPort + ?Sized> ToggleFormatOnPersistUseCase<S> {
    pub fn new(settings: Arc<S>) -> Self {
        Self { settings }
    }

    /// Flip the flag and return its new value.
    pub fn execute(&self) -> Result<bool, SettingsError> {
        let enabled = !self.settings.load()?.format_on_persist;
        self.settings.set_format_on_persist(enabled)?;
        info!(
            "Format on save {}",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(enabled)
    }
}
