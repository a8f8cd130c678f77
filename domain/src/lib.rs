//! Domain layer for pipefmt
//!
//! This crate contains the value objects and pure logic of the formatter
//! invocation engine. It has no dependencies on processes, files, or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Invocation
//!
//! One end-to-end attempt to format one document's full text:
//!
//! - **Locate**: settings → [`ToolDescriptor`] (pure, [`locate`])
//! - **Probe**: is the tool runnable? → [`ProbeResult`]
//! - **Run**: stream the text through the tool → [`ProcessTermination`]
//! - **Classify**: → [`InvocationOutcome`] (pure, [`classify`])
//! - **Apply**: replace the document only on `Formatted` → [`Applied`] / [`NotApplied`]
//!
//! Probing and running live in the infrastructure layer; applying is an
//! application-layer use case.

pub mod config;
pub mod core;
pub mod format;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigIssueCode, DEFAULT_INSTALL_URL, DEFAULT_TIMEOUT, DEFAULT_TOOL,
    FormatterSettings, OutputFormat, Severity,
};
pub use core::{document::DocumentId, error::FormatError};
pub use format::{
    classifier::{classify, classify_termination},
    edit::{Applied, NotApplied},
    outcome::{InvocationOutcome, MissingReason, ProbeResult, ProcessTermination, SpawnFailure},
    request::FormatRequest,
    tool::{ToolDescriptor, locate},
};
