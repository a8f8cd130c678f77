//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod apply_edit;
pub mod format_batch;
pub mod format_document;
pub mod handle_persisted;
pub mod in_flight;
pub mod toggle_format_on_persist;

#[cfg(test)]
pub(crate) mod test_support;
