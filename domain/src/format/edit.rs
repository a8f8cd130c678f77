//! Edit application results

use super::outcome::InvocationOutcome;
use crate::core::error::FormatError;
use serde::Serialize;

/// The document now holds the formatter's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Applied {
    /// Content was replaced and persisted.
    Replaced { bytes: usize },
    /// The formatter returned the text unchanged; no edit and no save.
    Unchanged,
}

/// The document was left exactly as it was before the invocation
/// (except for `ApplyFailed`, where the host's edit API may have gone
/// part of the way).
#[derive(Debug, PartialEq, Eq)]
pub enum NotApplied {
    /// The invocation failed; the outcome is surfaced unmodified.
    Outcome(InvocationOutcome),
    /// The document changed while the formatter ran; the result is discarded.
    Stale,
    /// The host refused the edit or the save.
    ApplyFailed(String),
}

impl NotApplied {
    /// The corresponding [`FormatError`], if any. `Stale` has none: it is a
    /// deliberate skip, not a failure of the invocation.
    pub fn into_error(self) -> Option<FormatError> {
        match self {
            NotApplied::Outcome(outcome) => outcome.into_result().err(),
            NotApplied::Stale => None,
            NotApplied::ApplyFailed(reason) => Some(FormatError::ApplyFailed(reason)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_outcome_maps_to_error() {
        let not_applied = NotApplied::Outcome(InvocationOutcome::TimedOut {
            timeout: Duration::from_secs(10),
        });
        assert!(matches!(
            not_applied.into_error(),
            Some(FormatError::TimedOut { .. })
        ));
    }

    #[test]
    fn test_stale_has_no_error() {
        assert!(NotApplied::Stale.into_error().is_none());
    }

    #[test]
    fn test_applied_serializes_with_status_tag() {
        let json = serde_json::to_value(Applied::Replaced { bytes: 12 }).unwrap();
        assert_eq!(json["status"], "replaced");
        assert_eq!(json["bytes"], 12);
    }
}
