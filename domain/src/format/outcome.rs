//! Outcome value objects: what a probe and a run can end in.
//!
//! ```text
//! ProbeResult ──┐
//!               ├─ classify() ─→ InvocationOutcome ─→ EditApplicator
//! ProcessTermination ┘
//! ```
//!
//! [`ProbeResult`] and [`ProcessTermination`] are raw observations from the
//! infrastructure layer. [`InvocationOutcome`] is the typed result handed
//! back to callers and is consumed exactly once.

use crate::core::error::FormatError;
use std::time::Duration;

/// Why a formatter was judged unavailable. Diagnostics only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    /// Not resolvable on `PATH` (or the given path does not exist)
    NotFound,
    /// Exists but could not be executed
    NotExecutable,
    /// The version probe exited non-zero
    ExitedWithError(i32),
    /// The version probe did not answer within its bound
    TimedOut,
    /// Any other spawn error
    SpawnError(String),
}

impl std::fmt::Display for MissingReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingReason::NotFound => write!(f, "not found"),
            MissingReason::NotExecutable => write!(f, "not executable"),
            MissingReason::ExitedWithError(code) => {
                write!(f, "version probe exited with code {}", code)
            }
            MissingReason::TimedOut => write!(f, "version probe timed out"),
            MissingReason::SpawnError(e) => write!(f, "spawn error: {}", e),
        }
    }
}

/// Result of the availability probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// The tool answered its version query. `version` is its trimmed stdout.
    Available { version: String },
    /// The tool cannot be used. Callers only ever see `ToolMissing`.
    Missing(MissingReason),
}

impl ProbeResult {
    pub fn is_available(&self) -> bool {
        matches!(self, ProbeResult::Available { .. })
    }
}

/// Unexpected failure to create the subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnFailure {
    pub reason: String,
}

impl SpawnFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Terminal state of the process invoker's state machine.
///
/// ```text
/// Spawning ──spawn error──→ Errored
///    │
///    ▼
/// Running ──deadline──→ Killed
///    │
///    ▼ (exited AND all three streams done)
/// Closed(exit_code)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessTermination {
    /// The process exited and its streams were fully drained.
    ///
    /// `pipe_error` records a failure writing the input or reading an
    /// output stream, e.g. the tool closed stdin before consuming the
    /// whole document.
    Closed {
        exit_code: i32,
        stdout: String,
        stderr: String,
        pipe_error: Option<String>,
    },
    /// The process could not be created.
    Errored(SpawnFailure),
    /// The deadline fired first; the process was killed and reaped.
    Killed { after: Duration },
}

/// Typed result of one invocation.
///
/// Not `Clone`: an outcome is produced once by the classifier and consumed
/// once by its caller.
#[derive(Debug, PartialEq, Eq)]
pub enum InvocationOutcome {
    /// Exit code zero; the complete replacement text.
    Formatted(String),
    /// The availability probe failed; nothing was run.
    ToolMissing { tool: String },
    /// The tool rejected the input.
    NonZeroExit { code: i32, stderr: String },
    /// The deadline fired and the process was killed.
    TimedOut { timeout: Duration },
    /// The OS refused to create the process.
    SpawnFailed(String),
    /// The tool closed its input or output unexpectedly early.
    BrokenPipe(String),
}

impl InvocationOutcome {
    pub fn is_formatted(&self) -> bool {
        matches!(self, InvocationOutcome::Formatted(_))
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            InvocationOutcome::Formatted(_) => "formatted",
            InvocationOutcome::ToolMissing { .. } => "tool_missing",
            InvocationOutcome::NonZeroExit { .. } => "non_zero_exit",
            InvocationOutcome::TimedOut { .. } => "timed_out",
            InvocationOutcome::SpawnFailed(_) => "spawn_failed",
            InvocationOutcome::BrokenPipe(_) => "broken_pipe",
        }
    }

    /// Convert into the formatted text or the matching [`FormatError`].
    pub fn into_result(self) -> Result<String, FormatError> {
        match self {
            InvocationOutcome::Formatted(text) => Ok(text),
            InvocationOutcome::ToolMissing { tool } => Err(FormatError::ToolMissing { tool }),
            InvocationOutcome::NonZeroExit { code, stderr } => {
                Err(FormatError::NonZeroExit { code, stderr })
            }
            InvocationOutcome::TimedOut { timeout } => Err(FormatError::TimedOut { timeout }),
            InvocationOutcome::SpawnFailed(reason) => Err(FormatError::SpawnFailed(reason)),
            InvocationOutcome::BrokenPipe(detail) => Err(FormatError::BrokenPipe(detail)),
        }
    }
}
