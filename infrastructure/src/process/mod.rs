//! Formatter subprocess handling.
//!
//! [`ToolProber`] answers "can this tool run at all?", [`ProcessInvoker`]
//! performs one formatting run, and [`LocalFormatterGateway`] exposes both
//! through the application's `FormatterGateway` port.

mod gateway;
mod invoker;
mod prober;

pub use gateway::LocalFormatterGateway;
pub use invoker::ProcessInvoker;
pub use prober::{PROBE_TIMEOUT, ToolProber};
