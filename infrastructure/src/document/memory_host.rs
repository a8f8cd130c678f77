//! In-memory document host, used for stdin/stdout mode.

use async_trait::async_trait;
use pipefmt_application::{DocumentHost, HostError};
use pipefmt_domain::DocumentId;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Debug, Clone)]
struct Buffer {
    text: String,
    language: Option<String>,
    persists: usize,
}

#[derive(Debug, Default)]
pub struct MemoryDocumentHost {
    buffers: Mutex<HashMap<DocumentId, Buffer>>,
}

impl MemoryDocumentHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, document: DocumentId, text: impl Into<String>, language: Option<&str>) {
        self.buffers().insert(
            document,
            Buffer {
                text: text.into(),
                language: language.map(str::to_string),
                persists: 0,
            },
        );
    }

    /// Current buffer content, if the document exists.
    pub fn content(&self, document: &DocumentId) -> Option<String> {
        self.buffers().get(document).map(|b| b.text.clone())
    }

    pub fn persist_count(&self, document: &DocumentId) -> usize {
        self.buffers().get(document).map_or(0, |b| b.persists)
    }

    fn buffers(&self) -> std::sync::MutexGuard<'_, HashMap<DocumentId, Buffer>> {
        self.buffers.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentHost for MemoryDocumentHost {
    async fn text(&self, document: &DocumentId) -> Result<String, HostError> {
        self.content(document)
            .ok_or_else(|| HostError::UnknownDocument(document.to_string()))
    }

    async fn replace_all(&self, document: &DocumentId, text: &str) -> Result<(), HostError> {
        let mut buffers = self.buffers();
        let buffer = buffers
            .get_mut(document)
            .ok_or_else(|| HostError::UnknownDocument(document.to_string()))?;
        buffer.text = text.to_string();
        Ok(())
    }

    async fn persist(&self, document: &DocumentId) -> Result<(), HostError> {
        let mut buffers = self.buffers();
        let buffer = buffers
            .get_mut(document)
            .ok_or_else(|| HostError::UnknownDocument(document.to_string()))?;
        buffer.persists += 1;
        Ok(())
    }

    async fn language_id(&self, document: &DocumentId) -> Option<String> {
        self.buffers().get(document).and_then(|b| b.language.clone())
    }
}
