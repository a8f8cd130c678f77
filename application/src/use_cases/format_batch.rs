//! Format Batch use case
//!
//! Runs [`FormatDocumentUseCase`] over several documents with bounded
//! concurrency. Each document gets its own invocation and its own child
//! process; a failure in one never affects the others.

use super::format_document::{FormatDocumentError, FormatDocumentInput, FormatDocumentUseCase};
use crate::ports::document_host::DocumentHost;
use crate::ports::formatter_gateway::FormatterGateway;
use crate::ports::notifier::FormatNotifier;
use crate::ports::progress::ProgressNotifier;
use futures::stream::{self, StreamExt};
use pipefmt_domain::{Applied, DocumentId, FormatError, FormatterSettings};
use serde::Serialize;
use tracing::info;

/// Whether results are written back or only compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    #[default]
    Apply,
    Check,
}

/// Per-document result of a batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DocumentStatus {
    Formatted,
    Unchanged,
    /// Check mode: the formatter would change this document
    WouldChange,
    Failed { kind: String, message: String },
}

impl DocumentStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, DocumentStatus::Failed { .. })
    }

    fn from_error(error: &FormatDocumentError) -> Self {
        DocumentStatus::Failed {
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub document: DocumentId,
    #[serde(flatten)]
    pub status: DocumentStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
}

impl BatchReport {
    pub fn count(&self, predicate: impl Fn(&DocumentStatus) -> bool) -> usize {
        self.documents.iter().filter(|r| predicate(&r.status)).count()
    }

    pub fn failures(&self) -> usize {
        self.count(DocumentStatus::is_failure)
    }

    /// Documents that were rewritten or would be rewritten.
    pub fn changed(&self) -> usize {
        self.count(|s| matches!(s, DocumentStatus::Formatted | DocumentStatus::WouldChange))
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }
}

pub struct FormatBatchUseCase<G: FormatterGateway + 'static, H: DocumentHost + 'static> {
    format: FormatDocumentUseCase<G, H>,
    jobs: usize,
}

impl<G: FormatterGateway + 'static, H: DocumentHost + 'static> FormatBatchUseCase<G, H> {
    pub fn new(format: FormatDocumentUseCase<G, H>) -> Self {
        Self { format, jobs: 1 }
    }

    /// Maximum number of formatter processes alive at once (at least 1).
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    pub async fn execute(
        &self,
        documents: Vec<DocumentId>,
        settings: &FormatterSettings,
        mode: BatchMode,
        notifier: &dyn FormatNotifier,
        progress: &dyn ProgressNotifier,
    ) -> BatchReport {
        progress.on_batch_start(documents.len());
        info!(
            "Formatting {} document(s) with up to {} job(s)",
            documents.len(),
            self.jobs
        );

        let mut indexed: Vec<(usize, DocumentReport)> = stream::iter(documents.into_iter().enumerate())
            .map(|(index, document)| async move {
                let status = self.run_one(&document, settings, mode, notifier).await;
                progress.on_document_complete(&document, !status.is_failure());
                (index, DocumentReport { document, status })
            })
            .buffer_unordered(self.jobs)
            .collect()
            .await;

        indexed.sort_by_key(|(index, _)| *index);
        progress.on_batch_complete();

        BatchReport {
            documents: indexed.into_iter().map(|(_, report)| report).collect(),
        }
    }

    async fn run_one(
        &self,
        document: &DocumentId,
        settings: &FormatterSettings,
        mode: BatchMode,
        notifier: &dyn FormatNotifier,
    ) -> DocumentStatus {
        let input = FormatDocumentInput::new(document.clone(), settings.clone());
        match mode {
            BatchMode::Apply => match self.format.execute_with_notifier(input, notifier).await {
                Ok(Applied::Replaced { .. }) => DocumentStatus::Formatted,
                Ok(Applied::Unchanged) => DocumentStatus::Unchanged,
                Err(e) => DocumentStatus::from_error(&e),
            },
            BatchMode::Check => match self.format.preview(input).await {
                Ok(preview) if preview.is_changed() => DocumentStatus::WouldChange,
                Ok(_) => DocumentStatus::Unchanged,
                Err(e) => {
                    match e.format_error() {
                        Some(FormatError::ToolMissing { tool }) => {
                            notifier.on_tool_missing(tool, &settings.install_url)
                        }
                        Some(format_error) => notifier.on_failure(document, format_error),
                        None => {}
                    }
                    DocumentStatus::from_error(&e)
                }
            },
        }
    }
}
