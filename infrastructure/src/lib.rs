//! Infrastructure layer for pipefmt
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the formatter subprocess, document hosts,
//! configuration file loading and invocation logging.

pub mod config;
pub mod document;
pub mod logging;
pub mod process;

// Re-export commonly used types
pub use config::{
    ConfigError, ConfigLoader, ConfigSources, FileConfig, FileFormatterConfig, FileLogConfig,
    FileOutputConfig, FileSettingsStore,
};
pub use document::{FileDocumentHost, MemoryDocumentHost};
pub use logging::JsonlInvocationLogger;
pub use process::{LocalFormatterGateway, ProcessInvoker, ToolProber};
