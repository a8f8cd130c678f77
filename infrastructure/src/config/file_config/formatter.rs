//! Formatter configuration from TOML (`[formatter]` section)

use pipefmt_domain::{DEFAULT_INSTALL_URL, FormatterSettings};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw formatter configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileFormatterConfig {
    /// Executable name or path (unset = `leptosfmt` on `PATH`)
    pub path: Option<String>,
    /// Format documents when they are saved
    pub format_on_save: bool,
    /// Arguments for a formatting run
    pub args: Vec<String>,
    /// Arguments for the version probe
    pub version_args: Vec<String>,
    /// Deadline for one run, in milliseconds
    pub timeout_ms: u64,
    /// Language ids eligible for format on save
    pub languages: Vec<String>,
    /// Shown when the formatter cannot be found
    pub install_url: String,
}

impl Default for FileFormatterConfig {
    fn default() -> Self {
        let defaults = FormatterSettings::default();
        Self {
            path: None,
            format_on_save: defaults.format_on_persist,
            args: defaults.args,
            version_args: defaults.version_args,
            timeout_ms: defaults.timeout.as_millis() as u64,
            languages: defaults.languages,
            install_url: DEFAULT_INSTALL_URL.to_string(),
        }
    }
}

impl FileFormatterConfig {
    pub fn to_settings(&self) -> FormatterSettings {
        FormatterSettings {
            tool_path: self.path.clone(),
            args: self.args.clone(),
            version_args: self.version_args.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            format_on_persist: self.format_on_save,
            languages: self.languages.clone(),
            install_url: self.install_url.clone(),
        }
    }
}
