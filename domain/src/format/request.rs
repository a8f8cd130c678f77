//! Format request value object

use crate::core::document::DocumentId;

/// The full text of one document, captured for one invocation.
///
/// Created per invocation and owned by the call that issues it. The text is
/// an opaque blob to the engine: it is streamed to the formatter as-is and
/// is also the reference the edit applicator compares against before it
/// replaces anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRequest {
    document: DocumentId,
    text: String,
}

impl FormatRequest {
    pub fn new(document: DocumentId, text: impl Into<String>) -> Self {
        Self {
            document,
            text: text.into(),
        }
    }

    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
