//! Configuration value objects for the domain layer
//!
//! These are domain concepts related to configuration that are
//! used across multiple layers.

mod output_format;
pub mod settings;
pub mod validation;

pub use output_format::OutputFormat;
pub use settings::{DEFAULT_INSTALL_URL, DEFAULT_TIMEOUT, DEFAULT_TOOL, FormatterSettings};
pub use validation::{ConfigIssue, ConfigIssueCode, Severity};
