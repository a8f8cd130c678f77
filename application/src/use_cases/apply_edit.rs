//! Edit applicator: reconciles an outcome with the host document.
//!
//! Only a `Formatted` outcome ever reaches the host's edit API. Every other
//! variant is handed back unmodified and the document is not touched.
//!
//! ```text
//! Formatted(text)
//!   ├─ document changed since the request? → NotApplied::Stale
//!   ├─ text == current?                    → Applied::Unchanged (no edit, no save)
//!   └─ replace_all → persist               → Applied::Replaced
//!                    (host error)          → NotApplied::ApplyFailed
//! anything else                            → NotApplied::Outcome(outcome)
//! ```

use crate::ports::document_host::DocumentHost;
use pipefmt_domain::{Applied, FormatRequest, InvocationOutcome, NotApplied};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct EditApplicator<H: DocumentHost + ?Sized> {
    host: Arc<H>,
}

impl<H: DocumentHost + ?Sized> EditApplicator<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }

    pub async fn apply(
        &self,
        request: &FormatRequest,
        outcome: InvocationOutcome,
    ) -> Result<Applied, NotApplied> {
        let formatted = match outcome {
            InvocationOutcome::Formatted(text) => text,
            other => return Err(NotApplied::Outcome(other)),
        };

        let document = request.document();

        // The formatter saw `request.text()`; anything typed since then
        // would be overwritten by an older snapshot.
        let current = self
            .host
            .text(document)
            .await
            .map_err(|e| NotApplied::ApplyFailed(e.to_string()))?;
        if current != request.text() {
            warn!(
                "Document {} changed while the formatter ran, discarding result",
                document
            );
            return Err(NotApplied::Stale);
        }

        if formatted == current {
            debug!("Document {} already formatted", document);
            return Ok(Applied::Unchanged);
        }

        self.host
            .replace_all(document, &formatted)
            .await
            .map_err(|e| NotApplied::ApplyFailed(e.to_string()))?;
        self.host
            .persist(document)
            .await
            .map_err(|e| NotApplied::ApplyFailed(e.to_string()))?;

        debug!("Replaced {} ({} bytes)", document, formatted.len());
        Ok(Applied::Replaced {
            bytes: formatted.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::MockHost;
    use pipefmt_domain::DocumentId;
    use std::time::Duration;

    fn request(text: &str) -> FormatRequest {
        FormatRequest::new(DocumentId::new("main.rs"), text)
    }

    #[tokio::test]
    async fn test_formatted_replaces_and_persists() {
        let host = Arc::new(MockHost::default().with_document("main.rs", "fn  main(){}"));
        let applicator = EditApplicator::new(Arc::clone(&host));

        let applied = applicator
            .apply(
                &request("fn  main(){}"),
                InvocationOutcome::Formatted("fn main() {}\n".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(applied, Applied::Replaced { bytes: 13 });
        assert_eq!(host.content("main.rs"), "fn main() {}\n");
        assert_eq!(host.persist_count(), 1);
    }

    #[tokio::test]
    async fn test_identical_output_is_not_saved() {
        let host = Arc::new(MockHost::default().with_document("main.rs", "fn main() {}\n"));
        let applicator = EditApplicator::new(Arc::clone(&host));

        let applied = applicator
            .apply(
                &request("fn main() {}\n"),
                InvocationOutcome::Formatted("fn main() {}\n".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(applied, Applied::Unchanged);
        assert_eq!(host.replace_count(), 0);
        assert_eq!(host.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_outcomes_leave_document_untouched() {
        let host = Arc::new(MockHost::default().with_document("main.rs", "original"));
        let applicator = EditApplicator::new(Arc::clone(&host));

        let outcomes = vec![
            InvocationOutcome::ToolMissing {
                tool: "leptosfmt".to_string(),
            },
            InvocationOutcome::NonZeroExit {
                code: 1,
                stderr: "error: bad syntax".to_string(),
            },
            InvocationOutcome::TimedOut {
                timeout: Duration::from_millis(10),
            },
            InvocationOutcome::SpawnFailed("EACCES".to_string()),
            InvocationOutcome::BrokenPipe("stdin".to_string()),
        ];

        for outcome in outcomes {
            let label = outcome.label();
            let result = applicator.apply(&request("original"), outcome).await;
            match result {
                Err(NotApplied::Outcome(returned)) => assert_eq!(returned.label(), label),
                other => panic!("unexpected result for {}: {:?}", label, other),
            }
        }

        assert_eq!(host.content("main.rs"), "original");
        assert_eq!(host.replace_count(), 0);
        assert_eq!(host.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_stale_document_is_not_overwritten() {
        let host = Arc::new(MockHost::default().with_document("main.rs", "edited meanwhile"));
        let applicator = EditApplicator::new(Arc::clone(&host));

        let result = applicator
            .apply(
                &request("old snapshot"),
                InvocationOutcome::Formatted("OLD SNAPSHOT".to_string()),
            )
            .await;

        assert_eq!(result, Err(NotApplied::Stale));
        assert_eq!(host.content("main.rs"), "edited meanwhile");
    }

    #[tokio::test]
    async fn test_host_refusal_is_apply_failed() {
        let host = Arc::new(MockHost::rejecting_replace().with_document("main.rs", "a"));
        let applicator = EditApplicator::new(Arc::clone(&host));

        let result = applicator
            .apply(&request("a"), InvocationOutcome::Formatted("b".to_string()))
            .await;

        assert!(matches!(result, Err(NotApplied::ApplyFailed(_))));
        assert_eq!(host.persist_count(), 0);
    }

    #[tokio::test]
    async fn test_persist_refusal_is_apply_failed() {
        let host = Arc::new(MockHost::rejecting_persist().with_document("main.rs", "a"));
        let applicator = EditApplicator::new(Arc::clone(&host));

        let result = applicator
            .apply(&request("a"), InvocationOutcome::Formatted("b".to_string()))
            .await;

        assert!(matches!(result, Err(NotApplied::ApplyFailed(msg)) if msg.contains("disk full")));
    }
}
