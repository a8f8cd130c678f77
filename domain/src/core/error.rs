//! Domain error types

use std::time::Duration;
use thiserror::Error;

/// Terminal failure of one formatting invocation.
///
/// Every variant ends the current invocation; none is retried
/// automatically. Only [`FormatError::ApplyFailed`] can leave the document
/// in a state other than its original content, and then only as far as the
/// host's own edit API went.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Formatter '{tool}' is not installed or not found in PATH")]
    ToolMissing { tool: String },

    #[error("Failed to start formatter: {0}")]
    SpawnFailed(String),

    #[error("Formatter exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("Formatter timed out after {}ms", .timeout.as_millis())]
    TimedOut { timeout: Duration },

    #[error("Formatter closed its streams unexpectedly: {0}")]
    BrokenPipe(String),

    #[error("Host refused the formatting edit: {0}")]
    ApplyFailed(String),
}

impl FormatError {
    /// Whether the user can fix this themselves (e.g. by installing the tool).
    ///
    /// Actionable errors are surfaced as a notification with remediation;
    /// everything else is surfaced as an opaque error.
    pub fn is_user_actionable(&self) -> bool {
        matches!(self, FormatError::ToolMissing { .. })
    }

    /// Short machine-readable kind, used in structured logs and JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatError::ToolMissing { .. } => "tool_missing",
            FormatError::SpawnFailed(_) => "spawn_failed",
            FormatError::NonZeroExit { .. } => "non_zero_exit",
            FormatError::TimedOut { .. } => "timed_out",
            FormatError::BrokenPipe(_) => "broken_pipe",
            FormatError::ApplyFailed(_) => "apply_failed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_zero_exit_display() {
        let error = FormatError::NonZeroExit {
            code: 1,
            stderr: "error: bad syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Formatter exited with code 1: error: bad syntax"
        );
    }

    #[test]
    fn test_timeout_display_uses_millis() {
        let error = FormatError::TimedOut {
            timeout: Duration::from_secs(10),
        };
        assert_eq!(error.to_string(), "Formatter timed out after 10000ms");
    }

    #[test]
    fn test_only_tool_missing_is_actionable() {
        assert!(
            FormatError::ToolMissing {
                tool: "leptosfmt".to_string()
            }
            .is_user_actionable()
        );
        assert!(!FormatError::SpawnFailed("EACCES".to_string()).is_user_actionable());
        assert!(!FormatError::BrokenPipe("stdin".to_string()).is_user_actionable());
        assert!(!FormatError::ApplyFailed("read-only".to_string()).is_user_actionable());
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(
            FormatError::TimedOut {
                timeout: Duration::from_millis(5)
            }
            .kind(),
            "timed_out"
        );
        assert_eq!(FormatError::SpawnFailed(String::new()).kind(), "spawn_failed");
    }
}
