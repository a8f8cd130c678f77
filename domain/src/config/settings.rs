//! Formatter settings: the configuration surface the host exposes.
//!
//! Settings are an explicit value read at each trigger point. There is no
//! process-wide toggle: whoever handles a "format now" or "document
//! persisted" trigger loads the current settings, and the format-on-persist
//! flag is stored by the host's configuration store, not by the engine.

use super::validation::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Formatter binary used when `tool_path` is unset or blank.
pub const DEFAULT_TOOL: &str = "leptosfmt";

/// Where users are pointed when the formatter cannot be found.
pub const DEFAULT_INSTALL_URL: &str = "https://github.com/leptos-rs/leptos/tree/main/leptosfmt";

/// Default formatting deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatterSettings {
    /// Configured tool name or path (`None` = use [`DEFAULT_TOOL`])
    pub tool_path: Option<String>,
    /// Arguments for a formatting run; the document arrives on stdin
    pub args: Vec<String>,
    /// Arguments for the availability probe
    pub version_args: Vec<String>,
    /// Deadline for one formatting run
    pub timeout: Duration,
    /// Format documents when the host persists them
    pub format_on_persist: bool,
    /// Language ids eligible for format-on-persist
    pub languages: Vec<String>,
    /// Remediation link shown when the tool is missing
    pub install_url: String,
}

impl Default for FormatterSettings {
    fn default() -> Self {
        Self {
            tool_path: None,
            args: vec!["--stdin".to_string()],
            version_args: vec!["--version".to_string()],
            timeout: DEFAULT_TIMEOUT,
            format_on_persist: true,
            languages: vec!["rust".to_string()],
            install_url: DEFAULT_INSTALL_URL.to_string(),
        }
    }
}

impl FormatterSettings {
    // ==================== Builder Methods ====================

    pub fn with_tool_path(mut self, path: impl Into<String>) -> Self {
        self.tool_path = Some(path.into());
        self
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_version_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.version_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_format_on_persist(mut self, enabled: bool) -> Self {
        self.format_on_persist = enabled;
        self
    }

    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// Whether format-on-persist applies to a document of this language.
    ///
    /// Comparison is case-insensitive. A document with no known language
    /// is never eligible.
    pub fn covers_language(&self, language: Option<&str>) -> bool {
        match language {
            Some(lang) => self.languages.iter().any(|l| l.eq_ignore_ascii_case(lang)),
            None => false,
        }
    }

    /// Validate the settings, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.tool_path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyToolPath,
                format!("formatter.path is blank, falling back to '{}'", DEFAULT_TOOL),
            ));
        }

        if self.timeout.is_zero() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroTimeout,
                "formatter.timeout_ms must be greater than zero",
            ));
        }

        if self.format_on_persist && self.languages.is_empty() {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::EmptyLanguages,
                "formatter.languages is empty, format on save will never run",
            ));
        }

        if !(self.install_url.starts_with("https://") || self.install_url.starts_with("http://"))
        {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidInstallUrl {
                    value: self.install_url.clone(),
                },
                format!(
                    "formatter.install_url '{}' is not an http(s) URL",
                    self.install_url
                ),
            ));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validation::Severity;

    #[test]
    fn test_defaults() {
        let settings = FormatterSettings::default();
        assert!(settings.tool_path.is_none());
        assert_eq!(settings.args, vec!["--stdin"]);
        assert_eq!(settings.version_args, vec!["--version"]);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(settings.format_on_persist);
        assert_eq!(settings.languages, vec!["rust"]);
        assert!(settings.validate().is_empty());
    }

    #[test]
    fn test_covers_language_is_case_insensitive() {
        let settings = FormatterSettings::default();
        assert!(settings.covers_language(Some("Rust")));
        assert!(!settings.covers_language(Some("toml")));
        assert!(!settings.covers_language(None));
    }

    #[test]
    fn test_blank_tool_path_warns() {
        let issues = FormatterSettings::default()
            .with_tool_path("   ")
            .validate();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, ConfigIssueCode::EmptyToolPath);
        assert_eq!(issues[0].severity, Severity::Warning);
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let issues = FormatterSettings::default()
            .with_timeout(Duration::ZERO)
            .validate();
        assert!(issues.iter().any(|i| i.is_error()));
    }

    #[test]
    fn test_empty_languages_only_matters_when_enabled() {
        let empty: Vec<String> = Vec::new();
        let enabled = FormatterSettings::default().with_languages(empty.clone());
        assert_eq!(enabled.validate().len(), 1);

        let disabled = FormatterSettings::default()
            .with_languages(empty)
            .with_format_on_persist(false);
        assert!(disabled.validate().is_empty());
    }
}
