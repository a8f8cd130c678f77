//! Document identity value object

use serde::{Deserialize, Serialize};

/// Opaque handle naming a document owned by the host (Value Object)
///
/// The formatting engine never inspects the handle. It is only carried
/// through an invocation so the resulting edit can be re-targeted at the
/// same document. Hosts decide what it means (a file path, a buffer name,
/// an editor URI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    /// Get the raw handle
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the raw handle
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        DocumentId::new(s)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        DocumentId::new(s)
    }
}
