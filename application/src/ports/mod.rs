//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod document_host;
pub mod formatter_gateway;
pub mod invocation_logger;
pub mod notifier;
pub mod progress;
pub mod settings;
