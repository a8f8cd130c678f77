//! Per-document in-flight registry.
//!
//! Overlapping format requests on the same document (e.g. rapid consecutive
//! saves) are rejected: while one invocation holds a document's slot, a
//! second [`try_acquire`](InFlightDocuments::try_acquire) for that document
//! returns `None` immediately. Different documents never contend.
//!
//! The slot is an RAII [`InFlightGuard`], released on every exit path of the
//! invocation including early returns and panics.

use pipefmt_domain::DocumentId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::trace;

/// Set of documents that currently have an invocation running.
///
/// Cheap to clone; clones share the same set, so one registry can be handed
/// to every use case that formats documents.
#[derive(Debug, Clone, Default)]
pub struct InFlightDocuments {
    active: Arc<Mutex<HashSet<DocumentId>>>,
}

impl InFlightDocuments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the slot for `document`, or `None` if it is already taken.
    pub fn try_acquire(&self, document: &DocumentId) -> Option<InFlightGuard> {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        if !active.insert(document.clone()) {
            trace!("Document {} already in flight", document);
            return None;
        }
        Some(InFlightGuard {
            active: Arc::clone(&self.active),
            document: document.clone(),
        })
    }

    pub fn is_in_flight(&self, document: &DocumentId) -> bool {
        self.active
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(document)
    }

    pub fn len(&self) -> usize {
        self.active.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Holds one document's slot until dropped.
#[derive(Debug)]
pub struct InFlightGuard {
    active: Arc<Mutex<HashSet<DocumentId>>>,
    document: DocumentId,
}

impl InFlightGuard {
    pub fn document(&self) -> &DocumentId {
        &self.document
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        let mut active = self.active.lock().unwrap_or_else(|e| e.into_inner());
        active.remove(&self.document);
    }
}
