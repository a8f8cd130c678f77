//! Progress notification port
//!
//! Defines the interface for reporting progress while a batch of documents
//! is formatted.

use pipefmt_domain::DocumentId;

/// Callback for progress updates during batch formatting
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines).
pub trait ProgressNotifier: Send + Sync {
    /// Called once before the first document starts
    fn on_batch_start(&self, total: usize);

    /// Called when a document finishes, successfully or not
    fn on_document_complete(&self, document: &DocumentId, success: bool);

    /// Called once after the last document finishes
    fn on_batch_complete(&self);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_batch_start(&self, _total: usize) {}
    fn on_document_complete(&self, _document: &DocumentId, _success: bool) {}
    fn on_batch_complete(&self) {}
}
