//! Core domain concepts shared across all subdomains.
//!
//! - [`document::DocumentId`]: opaque handle of a host-owned document
//! - [`error::FormatError`]: terminal failures of a formatting invocation

pub mod document;
pub mod error;
