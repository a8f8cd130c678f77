//! Local formatter gateway: prober and invoker behind the application port.

use super::invoker::ProcessInvoker;
use super::prober::ToolProber;
use async_trait::async_trait;
use pipefmt_application::FormatterGateway;
use pipefmt_domain::{InvocationOutcome, ProbeResult, ToolDescriptor};

/// Runs the formatter as a local subprocess.
#[derive(Debug, Clone, Default)]
pub struct LocalFormatterGateway {
    prober: ToolProber,
    invoker: ProcessInvoker,
}

impl LocalFormatterGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prober(mut self, prober: ToolProber) -> Self {
        self.prober = prober;
        self
    }
}

#[async_trait]
impl FormatterGateway for LocalFormatterGateway {
    async fn probe(&self, tool: &ToolDescriptor) -> ProbeResult {
        self.prober.probe(tool).await
    }

    async fn run(&self, tool: &ToolDescriptor, input: &str) -> InvocationOutcome {
        self.invoker.run(tool, input).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::document::{FileDocumentHost, MemoryDocumentHost};
    use pipefmt_application::{FormatDocumentError, FormatDocumentInput, FormatDocumentUseCase};
    use pipefmt_domain::{Applied, DocumentId, FormatError, FormatterSettings};
    use std::sync::Arc;
    use std::time::{Duration, Instant};

    const SOURCE: &str = "fn  main(){}";

    fn sh_settings(script: &str, timeout: Duration) -> FormatterSettings {
        FormatterSettings::default()
            .with_tool_path("sh")
            .with_args(["-c", script])
            .with_version_args(["-c", "echo sh"])
            .with_timeout(timeout)
    }

    fn memory_use_case() -> (
        FormatDocumentUseCase<LocalFormatterGateway, MemoryDocumentHost>,
        Arc<MemoryDocumentHost>,
        DocumentId,
    ) {
        let host = Arc::new(MemoryDocumentHost::new());
        let id = DocumentId::new("main.rs");
        host.insert(id.clone(), SOURCE, Some("rust"));
        let use_case =
            FormatDocumentUseCase::new(Arc::new(LocalFormatterGateway::new()), Arc::clone(&host));
        (use_case, host, id)
    }

    #[tokio::test]
    async fn test_gateway_probes_and_runs_cat() {
        let gateway = LocalFormatterGateway::new();
        let tool = ToolDescriptor::new("cat", Duration::from_secs(5)).with_version_args(["/dev/null"]);

        assert!(gateway.probe(&tool).await.is_available());
        assert_eq!(
            gateway.run(&tool, "view! {}").await,
            InvocationOutcome::Formatted("view! {}".to_string())
        );
    }

    #[tokio::test]
    async fn test_formatting_replaces_and_persists_document() {
        let (use_case, host, id) = memory_use_case();
        let settings = sh_settings("tr a-z A-Z", Duration::from_secs(10));

        let applied = use_case
            .execute(FormatDocumentInput::new(id.clone(), settings))
            .await
            .unwrap();

        assert_eq!(applied, Applied::Replaced { bytes: SOURCE.len() });
        assert_eq!(host.content(&id).as_deref(), Some("FN  MAIN(){}"));
        assert_eq!(host.persist_count(&id), 1);
    }

    #[tokio::test]
    async fn test_echo_tool_leaves_document_unsaved() {
        let (use_case, host, id) = memory_use_case();
        let settings = sh_settings("cat", Duration::from_secs(10));

        let applied = use_case
            .execute(FormatDocumentInput::new(id.clone(), settings))
            .await
            .unwrap();

        assert_eq!(applied, Applied::Unchanged);
        assert_eq!(host.content(&id).as_deref(), Some(SOURCE));
        assert_eq!(host.persist_count(&id), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_tool_leaves_document_unchanged() {
        let (use_case, host, id) = memory_use_case();
        let settings = FormatterSettings::default().with_tool_path("definitely-not-a-formatter-xyz");

        let err = use_case
            .execute(FormatDocumentInput::new(id.clone(), settings))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FormatDocumentError::Format(FormatError::ToolMissing { ref tool })
                if tool == "definitely-not-a-formatter-xyz"
        ));
        assert_eq!(host.content(&id).as_deref(), Some(SOURCE));
        assert_eq!(host.persist_count(&id), 0);
    }

    #[tokio::test]
    async fn test_rejected_input_leaves_document_unchanged() {
        let (use_case, host, id) = memory_use_case();
        let settings = sh_settings(
            "cat >/dev/null; echo 'error: bad syntax' >&2; exit 1",
            Duration::from_secs(10),
        );

        let err = use_case
            .execute(FormatDocumentInput::new(id.clone(), settings))
            .await
            .unwrap_err();

        assert_eq!(
            err.format_error(),
            Some(&FormatError::NonZeroExit {
                code: 1,
                stderr: "error: bad syntax".to_string()
            })
        );
        assert_eq!(host.content(&id).as_deref(), Some(SOURCE));
        assert_eq!(host.persist_count(&id), 0);
    }

    #[tokio::test]
    async fn test_hung_tool_times_out_and_leaves_document_unchanged() {
        let (use_case, host, id) = memory_use_case();
        let timeout = Duration::from_millis(300);
        let settings = sh_settings("exec sleep 30", timeout);
        let started = Instant::now();

        let err = use_case
            .execute(FormatDocumentInput::new(id.clone(), settings))
            .await
            .unwrap_err();

        assert_eq!(err.format_error(), Some(&FormatError::TimedOut { timeout }));
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(host.content(&id).as_deref(), Some(SOURCE));
        assert_eq!(host.persist_count(&id), 0);
    }

    #[tokio::test]
    async fn test_file_document_is_rewritten_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.rs");
        std::fs::write(&path, SOURCE).unwrap();
        let use_case = FormatDocumentUseCase::new(
            Arc::new(LocalFormatterGateway::new()),
            Arc::new(FileDocumentHost::new()),
        );
        let settings = sh_settings("tr a-z A-Z", Duration::from_secs(10));

        use_case
            .execute(FormatDocumentInput::new(
                path.to_string_lossy().into_owned(),
                settings,
            ))
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "FN  MAIN(){}");
    }
}
