//! Document host adapters.

mod file_host;
mod memory_host;

pub use file_host::{FileDocumentHost, language_for_extension};
pub use memory_host::MemoryDocumentHost;
