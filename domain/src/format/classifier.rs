//! Outcome classifier: pure mapping from observations to [`InvocationOutcome`].

use super::outcome::{InvocationOutcome, ProbeResult, ProcessTermination};

/// Classify an invocation.
///
/// The probe result is checked first: a missing tool short-circuits to
/// `ToolMissing` whatever `termination` holds (normally `None`, since
/// nothing is spawned for a missing tool). Otherwise the process
/// invoker's terminal state decides.
///
/// `termination` being `None` with an available tool means the caller
/// skipped the run; that is reported as a spawn failure rather than
/// silently treated as success.
pub fn classify(
    tool: &str,
    probe: &ProbeResult,
    termination: Option<ProcessTermination>,
) -> InvocationOutcome {
    if !probe.is_available() {
        return InvocationOutcome::ToolMissing {
            tool: tool.to_string(),
        };
    }

    match termination {
        Some(termination) => classify_termination(termination),
        None => InvocationOutcome::SpawnFailed("formatter was never started".to_string()),
    }
}

/// Map the invoker's terminal state alone.
///
/// A non-zero exit wins over a pipe error: a tool that rejects its input
/// often stops reading early, and the rejection is the useful diagnosis.
pub fn classify_termination(termination: ProcessTermination) -> InvocationOutcome {
    match termination {
        ProcessTermination::Closed {
            exit_code,
            stderr,
            ..
        } if exit_code != 0 => InvocationOutcome::NonZeroExit {
            code: exit_code,
            stderr: stderr.trim_end().to_string(),
        },
        ProcessTermination::Closed {
            pipe_error: Some(detail),
            ..
        } => InvocationOutcome::BrokenPipe(detail),
        ProcessTermination::Closed { stdout, .. } => InvocationOutcome::Formatted(stdout),
        ProcessTermination::Errored(failure) => InvocationOutcome::SpawnFailed(failure.reason),
        ProcessTermination::Killed { after } => InvocationOutcome::TimedOut { timeout: after },
    }
}
