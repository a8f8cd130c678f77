//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain settings.

mod formatter;
mod log;
mod output;

pub use formatter::FileFormatterConfig;
pub use log::FileLogConfig;
pub use output::FileOutputConfig;

use pipefmt_domain::{ConfigIssue, FormatterSettings};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Formatter settings
    pub formatter: FileFormatterConfig,
    /// Log destinations
    pub log: FileLogConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Convert into domain settings plus every detected issue.
    pub fn to_settings(&self) -> (FormatterSettings, Vec<ConfigIssue>) {
        let settings = self.formatter.to_settings();
        let issues = settings.validate();
        (settings, issues)
    }

    /// Validate the entire configuration.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.to_settings().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipefmt_domain::{ConfigIssueCode, OutputFormat};
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[formatter]
path = "~/.cargo/bin/leptosfmt"
format_on_save = false
args = ["--stdin", "--max-width", "120"]
timeout_ms = 5000
languages = ["rust", "markdown"]

[log]
invocations = "/tmp/pipefmt.jsonl"

[output]
format = "json"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let (settings, issues) = config.to_settings();

        assert!(issues.is_empty());
        assert_eq!(settings.tool_path.as_deref(), Some("~/.cargo/bin/leptosfmt"));
        assert!(!settings.format_on_persist);
        assert_eq!(settings.args, vec!["--stdin", "--max-width", "120"]);
        assert_eq!(settings.version_args, vec!["--version"]);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.languages, vec!["rust", "markdown"]);
        assert!(config.log.invocations.is_some());
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(!config.output.color);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_timeout_is_reported() {
        let config: FileConfig = toml::from_str("[formatter]\ntimeout_ms = 0\n").unwrap();

        let issues = config.validate();

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::ZeroTimeout);
        assert!(issues[0].is_error());
    }

    #[test]
    fn test_blank_path_is_warning() {
        let config: FileConfig = toml::from_str("[formatter]\npath = \"  \"\n").unwrap();

        let issues = config.validate();

        assert_eq!(issues[0].code, ConfigIssueCode::EmptyToolPath);
        assert!(!issues[0].is_error());
    }
}
