//! Availability prober.
//!
//! Confirms that a formatter can be executed by running its version query
//! under a short fixed bound. The bound is independent of the formatting
//! deadline so a hung tool cannot stall a caller for ten seconds just to
//! find out it is unusable.

use pipefmt_domain::{MissingReason, ProbeResult, ToolDescriptor};
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::{debug, trace};

/// Upper bound for one version probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
pub struct ToolProber {
    timeout: Duration,
}

impl Default for ToolProber {
    fn default() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
        }
    }
}

impl ToolProber {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the probe bound (tests use a short one).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn probe(&self, tool: &ToolDescriptor) -> ProbeResult {
        let resolved = match which::which(tool.program()) {
            Ok(path) => path,
            Err(e) => {
                debug!("Could not resolve '{}': {}", tool.program(), e);
                return ProbeResult::Missing(MissingReason::NotFound);
            }
        };
        trace!("Resolved {} to {}", tool.program(), resolved.display());

        let mut child = match Command::new(&resolved)
            .args(tool.version_args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
        {
            Ok(child) => child,
            Err(e) => return ProbeResult::Missing(missing_from_spawn_error(&e)),
        };

        let Some(mut stdout) = child.stdout.take() else {
            let _ = child.start_kill();
            let _ = child.wait().await;
            return ProbeResult::Missing(MissingReason::SpawnError(
                "stdout was not captured".to_string(),
            ));
        };

        let finished = tokio::time::timeout(self.timeout, async {
            let mut buf = Vec::new();
            let (read, status) = tokio::join!(stdout.read_to_end(&mut buf), child.wait());
            (read.map(|_| buf), status)
        })
        .await;

        match finished {
            Ok((read, Ok(status))) => {
                if !status.success() {
                    return ProbeResult::Missing(MissingReason::ExitedWithError(
                        status.code().unwrap_or(-1),
                    ));
                }
                let version = read
                    .map(|buf| String::from_utf8_lossy(&buf).trim().to_string())
                    .unwrap_or_default();
                debug!("Probe of {} succeeded: {}", tool.program(), version);
                ProbeResult::Available { version }
            }
            Ok((_, Err(e))) => ProbeResult::Missing(MissingReason::SpawnError(e.to_string())),
            Err(_) => {
                debug!(
                    "Version probe of {} exceeded {:?}, killing it",
                    tool.program(),
                    self.timeout
                );
                let _ = child.start_kill();
                let _ = child.wait().await;
                ProbeResult::Missing(MissingReason::TimedOut)
            }
        }
    }
}

fn missing_from_spawn_error(e: &std::io::Error) -> MissingReason {
    match e.kind() {
        ErrorKind::NotFound => MissingReason::NotFound,
        ErrorKind::PermissionDenied => MissingReason::NotExecutable,
        _ => MissingReason::SpawnError(e.to_string()),
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::time::Instant;

    fn sh(script: &str) -> ToolDescriptor {
        ToolDescriptor::new("sh", Duration::from_secs(10)).with_version_args(["-c", script])
    }

    #[tokio::test]
    async fn test_available_reports_version() {
        let result = ToolProber::new().probe(&sh("echo 'mockfmt 0.1.18'")).await;
        assert_eq!(
            result,
            ProbeResult::Available {
                version: "mockfmt 0.1.18".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_unresolvable_tool_is_not_found() {
        let tool = ToolDescriptor::new("definitely-not-a-formatter-xyz", Duration::from_secs(1));
        let result = ToolProber::new().probe(&tool).await;
        assert_eq!(result, ProbeResult::Missing(MissingReason::NotFound));
    }

    #[tokio::test]
    async fn test_failing_version_query_is_missing() {
        let result = ToolProber::new().probe(&sh("exit 3")).await;
        assert_eq!(result, ProbeResult::Missing(MissingReason::ExitedWithError(3)));
    }

    #[tokio::test]
    async fn test_hung_probe_is_bounded() {
        let prober = ToolProber::new().with_timeout(Duration::from_millis(200));
        let started = Instant::now();

        let result = prober.probe(&sh("exec sleep 30")).await;

        assert_eq!(result, ProbeResult::Missing(MissingReason::TimedOut));
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_spawn_error_mapping() {
        let denied = std::io::Error::from(ErrorKind::PermissionDenied);
        assert_eq!(missing_from_spawn_error(&denied), MissingReason::NotExecutable);
        let other = std::io::Error::other("EMFILE");
        assert!(matches!(
            missing_from_spawn_error(&other),
            MissingReason::SpawnError(_)
        ));
    }
}
