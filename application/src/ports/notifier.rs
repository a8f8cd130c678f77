//! Notification port
//!
//! Defines how invocation results are surfaced to the user.

use pipefmt_domain::{Applied, DocumentId, FormatError};

/// Callback for user-facing notifications
///
/// Implementations live in the presentation layer (console, editor popups).
pub trait FormatNotifier: Send + Sync {
    /// The formatter is not available; `install_url` is the remediation link.
    fn on_tool_missing(&self, tool: &str, install_url: &str);

    /// Any other failure of an invocation.
    fn on_failure(&self, document: &DocumentId, error: &FormatError);

    /// The document was formatted (or was already formatted).
    fn on_applied(&self, _document: &DocumentId, _applied: &Applied) {}
}

/// No-op notifier for when notifications are not needed
pub struct NoNotifier;

impl FormatNotifier for NoNotifier {
    fn on_tool_missing(&self, _tool: &str, _install_url: &str) {}
    fn on_failure(&self, _document: &DocumentId, _error: &FormatError) {}
}
