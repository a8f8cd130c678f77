//! Format Document use case
//!
//! Orchestrates one invocation end to end ("format now"):
//!
//! ```text
//! settings ─locate─→ ToolDescriptor
//!            claim in-flight slot ──busy──→ Busy
//!            read document text   ─→ FormatRequest
//!            probe ──missing──→ ToolMissing (nothing spawned)
//!            run   ─→ InvocationOutcome
//!            apply ─→ Applied | NotApplied
//! ```

use super::apply_edit::EditApplicator;
use super::in_flight::InFlightDocuments;
use crate::ports::document_host::{DocumentHost, HostError};
use crate::ports::formatter_gateway::FormatterGateway;
use crate::ports::invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger};
use crate::ports::notifier::{FormatNotifier, NoNotifier};
use pipefmt_domain::{
    Applied, DocumentId, FormatError, FormatRequest, FormatterSettings, InvocationOutcome,
    NotApplied, ProbeResult, ToolDescriptor, classify, locate,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Errors that can occur while formatting a document
#[derive(Error, Debug)]
pub enum FormatDocumentError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("Could not read document: {0}")]
    Host(#[from] HostError),

    #[error("A formatting run is already in progress for {0}")]
    Busy(DocumentId),

    #[error("{0} changed while the formatter ran; result discarded")]
    Stale(DocumentId),
}

impl FormatDocumentError {
    /// The underlying invocation failure, if this is one.
    pub fn format_error(&self) -> Option<&FormatError> {
        match self {
            FormatDocumentError::Format(e) => Some(e),
            _ => None,
        }
    }

    /// Short machine-readable kind for JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            FormatDocumentError::Format(e) => e.kind(),
            FormatDocumentError::Host(_) => "host_error",
            FormatDocumentError::Busy(_) => "busy",
            FormatDocumentError::Stale(_) => "stale",
        }
    }
}

/// Input for the FormatDocument use case
#[derive(Debug, Clone)]
pub struct FormatDocumentInput {
    /// Document to format
    pub document: DocumentId,
    /// Settings read at the trigger point
    pub settings: FormatterSettings,
}

impl FormatDocumentInput {
    pub fn new(document: impl Into<DocumentId>, settings: FormatterSettings) -> Self {
        Self {
            document: document.into(),
            settings,
        }
    }
}

/// Formatter output computed without touching the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub original: String,
    pub formatted: String,
}

impl Preview {
    pub fn is_changed(&self) -> bool {
        self.original != self.formatted
    }
}

/// Use case for formatting one document
pub struct FormatDocumentUseCase<G: FormatterGateway + 'static, H: DocumentHost + 'static> {
    gateway: Arc<G>,
    host: Arc<H>,
    in_flight: InFlightDocuments,
    logger: Arc<dyn InvocationLogger>,
}

impl<G: FormatterGateway + 'static, H: DocumentHost + 'static> FormatDocumentUseCase<G, H> {
    pub fn new(gateway: Arc<G>, host: Arc<H>) -> Self {
        Self {
            gateway,
            host,
            in_flight: InFlightDocuments::new(),
            logger: Arc::new(NoInvocationLogger),
        }
    }

    /// Share an in-flight registry with other use cases.
    pub fn with_in_flight(mut self, in_flight: InFlightDocuments) -> Self {
        self.in_flight = in_flight;
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn InvocationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    /// Execute the use case without notifications
    pub async fn execute(&self, input: FormatDocumentInput) -> Result<Applied, FormatDocumentError> {
        self.execute_with_notifier(input, &NoNotifier).await
    }

    /// Execute the use case, surfacing the result through `notifier`
    pub async fn execute_with_notifier(
        &self,
        input: FormatDocumentInput,
        notifier: &dyn FormatNotifier,
    ) -> Result<Applied, FormatDocumentError> {
        let tool = locate(&input.settings);
        let document = input.document;

        let _slot = self.in_flight.try_acquire(&document).ok_or_else(|| {
            warn!("Rejecting overlapping format request for {}", document);
            FormatDocumentError::Busy(document.clone())
        })?;

        let text = self.host.text(&document).await?;
        let request = FormatRequest::new(document.clone(), text);

        info!("Formatting {} with {}", document, tool);
        let started = Instant::now();
        let outcome = self.invoke(&tool, &request).await;
        self.log_run(&request, &outcome, started);

        let applicator = EditApplicator::new(Arc::clone(&self.host));
        match applicator.apply(&request, outcome).await {
            Ok(applied) => {
                self.logger.log(InvocationEvent::new(
                    "apply",
                    serde_json::json!({
                        "document": document.as_str(),
                        "result": applied,
                    }),
                ));
                notifier.on_applied(&document, &applied);
                Ok(applied)
            }
            Err(not_applied) => match not_applied.into_error() {
                Some(error) => {
                    Self::report(&document, &error, &input.settings, notifier);
                    Err(FormatDocumentError::Format(error))
                }
                None => Err(FormatDocumentError::Stale(document)),
            },
        }
    }

    /// Run the formatter on the document without applying anything.
    pub async fn preview(&self, input: FormatDocumentInput) -> Result<Preview, FormatDocumentError> {
        let tool = locate(&input.settings);
        let text = self.host.text(&input.document).await?;
        let request = FormatRequest::new(input.document, text);

        let started = Instant::now();
        let outcome = self.invoke(&tool, &request).await;
        self.log_run(&request, &outcome, started);

        let formatted = outcome.into_result()?;
        let original = request.text().to_string();
        Ok(Preview {
            original,
            formatted,
        })
    }

    /// Probe, then run only if the tool is available.
    async fn invoke(&self, tool: &ToolDescriptor, request: &FormatRequest) -> InvocationOutcome {
        let probe = self.gateway.probe(tool).await;
        match &probe {
            ProbeResult::Available { version } => {
                debug!("Formatter available: {}", version);
            }
            ProbeResult::Missing(reason) => {
                debug!("Formatter '{}' unavailable: {}", tool.program(), reason);
                self.logger.log(InvocationEvent::new(
                    "probe",
                    serde_json::json!({
                        "tool": tool.program(),
                        "available": false,
                        "reason": reason.to_string(),
                    }),
                ));
                return classify(tool.program(), &probe, None);
            }
        }

        self.gateway.run(tool, request.text()).await
    }

    fn log_run(&self, request: &FormatRequest, outcome: &InvocationOutcome, started: Instant) {
        let mut payload = serde_json::json!({
            "document": request.document().as_str(),
            "input_bytes": request.len(),
            "outcome": outcome.label(),
            "duration_ms": started.elapsed().as_millis() as u64,
        });
        if let InvocationOutcome::NonZeroExit { code, stderr } = outcome {
            payload["exit_code"] = serde_json::json!(code);
            payload["stderr"] = serde_json::json!(stderr);
        }
        self.logger.log(InvocationEvent::new("run", payload));
    }

    fn report(
        document: &DocumentId,
        error: &FormatError,
        settings: &FormatterSettings,
        notifier: &dyn FormatNotifier,
    ) {
        match error {
            FormatError::ToolMissing { tool } => {
                warn!("{}", error);
                notifier.on_tool_missing(tool, &settings.install_url);
            }
            FormatError::NonZeroExit { code, stderr } => {
                error!("Formatting {} failed (exit code {}): {}", document, code, stderr);
                notifier.on_failure(document, error);
            }
            _ => {
                error!("Formatting {} failed: {}", document, error);
                notifier.on_failure(document, error);
            }
        }
    }
}
