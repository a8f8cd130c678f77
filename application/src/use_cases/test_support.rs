//! Shared test doubles for use case tests.

use crate::ports::document_host::{DocumentHost, HostError};
use crate::ports::formatter_gateway::FormatterGateway;
use crate::ports::notifier::FormatNotifier;
use crate::ports::settings::{SettingsError, SettingsPort};
use async_trait::async_trait;
use pipefmt_domain::{
    Applied, DocumentId, FormatError, FormatterSettings, InvocationOutcome, MissingReason,
    ProbeResult, ToolDescriptor,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

// ==================== Gateway ====================

/// How the mock formatter behaves on `run`.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the input unchanged
    Echo,
    /// Return the input upper-cased
    Uppercase,
    /// Return a scripted outcome
    Fail(ScriptedFailure),
}

#[derive(Debug, Clone)]
pub enum ScriptedFailure {
    NonZeroExit(i32, &'static str),
    TimedOut(Duration),
    SpawnFailed(&'static str),
    BrokenPipe(&'static str),
}

pub struct MockGateway {
    available: bool,
    behavior: MockBehavior,
    pub probes: AtomicUsize,
    pub runs: AtomicUsize,
    /// Optional hook run before `run` returns (e.g. to mutate the host)
    on_run: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl MockGateway {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            available: true,
            behavior,
            probes: AtomicUsize::new(0),
            runs: AtomicUsize::new(0),
            on_run: Mutex::new(None),
        }
    }

    pub fn missing() -> Self {
        Self {
            available: false,
            ..Self::new(MockBehavior::Echo)
        }
    }

    pub fn with_on_run(self, hook: impl FnOnce() + Send + 'static) -> Self {
        *self.on_run.lock().unwrap() = Some(Box::new(hook));
        self
    }

    pub fn run_count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FormatterGateway for MockGateway {
    async fn probe(&self, _tool: &ToolDescriptor) -> ProbeResult {
        self.probes.fetch_add(1, Ordering::SeqCst);
        if self.available {
            ProbeResult::Available {
                version: "mockfmt 1.0.0".to_string(),
            }
        } else {
            ProbeResult::Missing(MissingReason::NotFound)
        }
    }

    async fn run(&self, _tool: &ToolDescriptor, input: &str) -> InvocationOutcome {
        self.runs.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = self.on_run.lock().unwrap().take() {
            hook();
        }
        match &self.behavior {
            MockBehavior::Echo => InvocationOutcome::Formatted(input.to_string()),
            MockBehavior::Uppercase => InvocationOutcome::Formatted(input.to_uppercase()),
            MockBehavior::Fail(failure) => match failure {
                ScriptedFailure::NonZeroExit(code, stderr) => InvocationOutcome::NonZeroExit {
                    code: *code,
                    stderr: stderr.to_string(),
                },
                ScriptedFailure::TimedOut(timeout) => {
                    InvocationOutcome::TimedOut { timeout: *timeout }
                }
                ScriptedFailure::SpawnFailed(reason) => {
                    InvocationOutcome::SpawnFailed(reason.to_string())
                }
                ScriptedFailure::BrokenPipe(detail) => {
                    InvocationOutcome::BrokenPipe(detail.to_string())
                }
            },
        }
    }
}

// ==================== Host ====================

#[derive(Default)]
pub struct MockHost {
    documents: Mutex<HashMap<DocumentId, String>>,
    languages: Mutex<HashMap<DocumentId, String>>,
    pub replaces: AtomicUsize,
    pub persists: AtomicUsize,
    reject_replace: bool,
    reject_persist: bool,
}

impl MockHost {
    /// A host whose edit API refuses `replace_all`.
    pub fn rejecting_replace() -> Self {
        Self {
            reject_replace: true,
            ..Self::default()
        }
    }

    /// A host that accepts the edit but fails to save.
    pub fn rejecting_persist() -> Self {
        Self {
            reject_persist: true,
            ..Self::default()
        }
    }

    pub fn with_document(self, id: &str, text: &str) -> Self {
        self.documents
            .lock()
            .unwrap()
            .insert(DocumentId::new(id), text.to_string());
        self.languages
            .lock()
            .unwrap()
            .insert(DocumentId::new(id), "rust".to_string());
        self
    }

    pub fn with_language(self, id: &str, language: &str) -> Self {
        self.languages
            .lock()
            .unwrap()
            .insert(DocumentId::new(id), language.to_string());
        self
    }

    pub fn set_text(&self, id: &str, text: &str) {
        self.documents
            .lock()
            .unwrap()
            .insert(DocumentId::new(id), text.to_string());
    }

    pub fn content(&self, id: &str) -> String {
        self.documents
            .lock()
            .unwrap()
            .get(&DocumentId::new(id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn replace_count(&self) -> usize {
        self.replaces.load(Ordering::SeqCst)
    }

    pub fn persist_count(&self) -> usize {
        self.persists.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentHost for MockHost {
    async fn text(&self, document: &DocumentId) -> Result<String, HostError> {
        self.documents
            .lock()
            .unwrap()
            .get(document)
            .cloned()
            .ok_or_else(|| HostError::UnknownDocument(document.to_string()))
    }

    async fn replace_all(&self, document: &DocumentId, text: &str) -> Result<(), HostError> {
        if self.reject_replace {
            return Err(HostError::ReadOnly(document.to_string()));
        }
        self.replaces.fetch_add(1, Ordering::SeqCst);
        self.documents
            .lock()
            .unwrap()
            .insert(document.clone(), text.to_string());
        Ok(())
    }

    async fn persist(&self, document: &DocumentId) -> Result<(), HostError> {
        if self.reject_persist {
            return Err(HostError::Rejected("disk full".to_string()));
        }
        self.persists.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn language_id(&self, document: &DocumentId) -> Option<String> {
        self.languages.lock().unwrap().get(document).cloned()
    }
}

// ==================== Notifier ====================

#[derive(Default)]
pub struct RecordingNotifier {
    pub missing: Mutex<Vec<(String, String)>>,
    pub failures: Mutex<Vec<String>>,
    pub applied: Mutex<Vec<Applied>>,
}

impl FormatNotifier for RecordingNotifier {
    fn on_tool_missing(&self, tool: &str, install_url: &str) {
        self.missing
            .lock()
            .unwrap()
            .push((tool.to_string(), install_url.to_string()));
    }

    fn on_failure(&self, _document: &DocumentId, error: &FormatError) {
        self.failures.lock().unwrap().push(error.kind().to_string());
    }

    fn on_applied(&self, _document: &DocumentId, applied: &Applied) {
        self.applied.lock().unwrap().push(*applied);
    }
}

// ==================== Settings ====================

pub struct MockSettings {
    current: Mutex<FormatterSettings>,
    pub stores: Mutex<VecDeque<bool>>,
    fail_store: bool,
}

impl MockSettings {
    pub fn new(settings: FormatterSettings) -> Self {
        Self {
            current: Mutex::new(settings),
            stores: Mutex::new(VecDeque::new()),
            fail_store: false,
        }
    }

    /// Settings that load fine but cannot be written back.
    pub fn failing_store(settings: FormatterSettings) -> Self {
        Self {
            fail_store: true,
            ..Self::new(settings)
        }
    }
}

impl SettingsPort for MockSettings {
    fn load(&self) -> Result<FormatterSettings, SettingsError> {
        Ok(self.current.lock().unwrap().clone())
    }

    fn set_format_on_persist(&self, enabled: bool) -> Result<(), SettingsError> {
        if self.fail_store {
            return Err(SettingsError::Store {
                path: "config.toml".to_string(),
                message: "permission denied".to_string(),
            });
        }
        self.current.lock().unwrap().format_on_persist = enabled;
        self.stores.lock().unwrap().push_back(enabled);
        Ok(())
    }
}
