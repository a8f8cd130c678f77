//! Formatter Gateway port
//!
//! Defines the interface for probing and running the external formatter.

use async_trait::async_trait;
use pipefmt_domain::{InvocationOutcome, ProbeResult, ToolDescriptor};

/// Gateway to the external formatter
///
/// This port defines how the application layer talks to the formatter
/// process. Implementations (adapters) live in the infrastructure layer and
/// own every OS-level resource of an invocation: nothing above this port
/// ever sees a pipe or a process id.
#[async_trait]
pub trait FormatterGateway: Send + Sync {
    /// Check that the tool is runnable (a short, bounded version query).
    async fn probe(&self, tool: &ToolDescriptor) -> ProbeResult;

    /// Stream `input` through the tool and classify how the run ended.
    ///
    /// Must not be called for a tool whose probe reported `Missing`.
    async fn run(&self, tool: &ToolDescriptor, input: &str) -> InvocationOutcome;
}
