//! Process invoker: one formatter subprocess per invocation.
//!
//! # Lifecycle
//!
//! ```text
//! Spawning ──spawn error──────────────────────────→ Errored
//!    │
//!    ▼
//! Running: join!( write stdin + close,
//!                 drain stdout,
//!                 drain stderr,
//!                 wait for exit )  inside timeout(deadline)
//!    │                                   │
//!    │ all four done                     │ deadline first
//!    ▼                                   ▼
//! Closed(exit_code)              kill group → reap → Killed
//! ```
//!
//! Writing and draining run concurrently: a tool that emits output before
//! it has consumed all of its input would otherwise fill its stdout pipe
//! and stop reading, while we stop writing.
//!
//! The [`Child`] never leaves [`ProcessInvoker::execute`]. On every path it
//! is either waited on or killed and then waited on, and it is spawned with
//! `kill_on_drop` so that a cancelled caller still takes the process down.
//! On Linux the child also receives `PR_SET_PDEATHSIG`, which covers the case
//! where this process is killed without running destructors.

use pipefmt_domain::{
    InvocationOutcome, ProcessTermination, SpawnFailure, ToolDescriptor, classify_termination,
};
use std::process::Stdio;
use std::time::Instant;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, Default)]
pub struct ProcessInvoker;

impl ProcessInvoker {
    pub fn new() -> Self {
        Self
    }

    /// Run the tool over `input` and classify the result.
    pub async fn run(&self, tool: &ToolDescriptor, input: &str) -> InvocationOutcome {
        let termination = self.execute(tool, input).await;
        if let ProcessTermination::Closed {
            exit_code: 0,
            stderr,
            ..
        } = &termination
            && !stderr.trim().is_empty()
        {
            warn!("{} wrote to stderr: {}", tool.program(), stderr.trim_end());
        }
        classify_termination(termination)
    }

    /// Drive the subprocess to a terminal state.
    pub async fn execute(&self, tool: &ToolDescriptor, input: &str) -> ProcessTermination {
        let started = Instant::now();
        let mut command = Command::new(tool.program());
        command
            .args(tool.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        isolate(&mut command);

        debug!("Spawning {}", tool);
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to spawn {}: {}", tool.program(), e);
                return ProcessTermination::Errored(SpawnFailure::new(e.to_string()));
            }
        };
        let pid = child.id();

        let (Some(stdin), Some(stdout), Some(stderr)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            terminate(&mut child, pid).await;
            return ProcessTermination::Errored(SpawnFailure::new(
                "child stdio was not captured",
            ));
        };

        let running = tokio::time::timeout(tool.timeout(), async {
            tokio::join!(
                feed(stdin, input),
                drain(stdout),
                drain(stderr),
                child.wait()
            )
        })
        .await;

        let (written, out, err, status) = match running {
            Ok(finished) => finished,
            Err(_) => {
                warn!(
                    "{} did not finish within {:?}, killing pid {:?}",
                    tool.program(),
                    tool.timeout(),
                    pid
                );
                terminate(&mut child, pid).await;
                return ProcessTermination::Killed {
                    after: tool.timeout(),
                };
            }
        };

        let status = match status {
            Ok(status) => status,
            Err(e) => {
                // The process may still be alive if waiting itself failed
                terminate(&mut child, pid).await;
                return ProcessTermination::Errored(SpawnFailure::new(format!(
                    "failed to wait for formatter: {}",
                    e
                )));
            }
        };

        let mut pipe_errors = Vec::new();
        if let Err(e) = written {
            pipe_errors.push(format!("writing stdin: {}", e));
        }
        let stdout = out.unwrap_or_else(|e| {
            pipe_errors.push(format!("reading stdout: {}", e));
            Vec::new()
        });
        let stderr = err.unwrap_or_else(|e| {
            pipe_errors.push(format!("reading stderr: {}", e));
            Vec::new()
        });

        let exit_code = status.code().unwrap_or_else(|| {
            debug!("{} terminated by a signal ({})", tool.program(), status);
            -1
        });
        trace!(
            "{} exited with {} after {:?} ({} bytes out, {} bytes err)",
            tool.program(),
            exit_code,
            started.elapsed(),
            stdout.len(),
            stderr.len()
        );

        // Lossy stdout would be written into the document, so it is a
        // stream failure rather than a result.
        let stdout = String::from_utf8(stdout).unwrap_or_else(|e| {
            pipe_errors.push(format!(
                "stdout is not valid UTF-8 (invalid byte at offset {})",
                e.utf8_error().valid_up_to()
            ));
            String::new()
        });

        ProcessTermination::Closed {
            exit_code,
            stdout,
            stderr: decode(stderr, "stderr"),
            pipe_error: if pipe_errors.is_empty() {
                None
            } else {
                Some(pipe_errors.join("; "))
            },
        }
    }
}

/// Write the whole input, then close stdin so the tool sees end-of-input.
async fn feed(mut stdin: ChildStdin, input: &str) -> std::io::Result<()> {
    stdin.write_all(input.as_bytes()).await?;
    stdin.shutdown().await?;
    drop(stdin);
    Ok(())
}

async fn drain<R: AsyncRead + Unpin>(mut stream: R) -> std::io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(buf)
}

fn decode(bytes: Vec<u8>, stream: &str) -> String {
    String::from_utf8(bytes).unwrap_or_else(|e| {
        warn!("Formatter {} is not valid UTF-8, decoding lossily", stream);
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

/// Put the child in its own process group and tie its life to ours.
#[cfg(unix)]
fn isolate(command: &mut Command) {
    command.process_group(0);

    #[cfg(target_os = "linux")]
    unsafe {
        command.pre_exec(|| {
            libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGKILL);
            Ok(())
        });
    }
}

#[cfg(not(unix))]
fn isolate(_command: &mut Command) {}

/// Kill the child (and anything it forked) and reap it.
async fn terminate(child: &mut Child, pid: Option<u32>) {
    #[cfg(unix)]
    if let Some(pid) = pid.and_then(|p| i32::try_from(p).ok()) {
        // SAFETY: the group id is the pid of a child we have not reaped yet
        unsafe {
            libc::killpg(pid, libc::SIGKILL);
        }
    }
    #[cfg(not(unix))]
    let _ = pid;

    if let Err(e) = child.start_kill() {
        trace!("start_kill: {}", e);
    }
    if let Err(e) = child.wait().await {
        warn!("Failed to reap formatter process: {}", e);
    }
}
