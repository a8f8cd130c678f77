//! Formatter invocation subdomain.
//!
//! Leaves first:
//!
//! - [`tool`]: [`ToolDescriptor`](tool::ToolDescriptor) and the pure
//!   [`locate`](tool::locate) step
//! - [`request`]: the captured document text
//! - [`outcome`]: probe results, the invoker's terminal states and the
//!   typed [`InvocationOutcome`](outcome::InvocationOutcome)
//! - [`classifier`]: pure mapping from observations to outcome
//! - [`edit`]: what the edit applicator reports back

pub mod classifier;
pub mod edit;
pub mod outcome;
pub mod request;
pub mod tool;
