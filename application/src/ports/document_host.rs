//! Document Host port
//!
//! Defines the interface to whoever owns the documents (an editor, a batch
//! job, a test harness).

use async_trait::async_trait;
use pipefmt_domain::DocumentId;
use thiserror::Error;

/// Errors reported by the document host
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Unknown document: {0}")]
    UnknownDocument(String),

    #[error("Document is read-only: {0}")]
    ReadOnly(String),

    #[error("I/O error on {document}: {source}")]
    Io {
        document: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Host rejected the request: {0}")]
    Rejected(String),
}

/// Host-side document operations, addressed by an opaque handle
#[async_trait]
pub trait DocumentHost: Send + Sync {
    /// Full current text of the document.
    async fn text(&self, document: &DocumentId) -> Result<String, HostError>;

    /// Replace the whole content of the document.
    async fn replace_all(&self, document: &DocumentId, text: &str) -> Result<(), HostError>;

    /// Persist (save) the document.
    async fn persist(&self, document: &DocumentId) -> Result<(), HostError>;

    /// Language id of the document (e.g. `"rust"`), if the host knows it.
    async fn language_id(&self, document: &DocumentId) -> Option<String>;
}
