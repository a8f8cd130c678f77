//! Application layer for pipefmt
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    document_host::{DocumentHost, HostError},
    formatter_gateway::FormatterGateway,
    invocation_logger::{InvocationEvent, InvocationLogger, NoInvocationLogger},
    notifier::{FormatNotifier, NoNotifier},
    progress::{NoProgress, ProgressNotifier},
    settings::{SettingsError, SettingsPort},
};
pub use use_cases::apply_edit::EditApplicator;
pub use use_cases::format_batch::{
    BatchMode, BatchReport, DocumentReport, DocumentStatus, FormatBatchUseCase,
};
pub use use_cases::format_document::{
    FormatDocumentError, FormatDocumentInput, FormatDocumentUseCase, Preview,
};
pub use use_cases::handle_persisted::{
    HandlePersistedError, HandlePersistedUseCase, PersistOutcome,
};
pub use use_cases::in_flight::{InFlightDocuments, InFlightGuard};
pub use use_cases::toggle_format_on_persist::ToggleFormatOnPersistUseCase;
