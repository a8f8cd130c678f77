//! Handle Persisted use case
//!
//! Reacts to a "document persisted" event from the host. Settings are read
//! here, at the trigger point, so a toggle issued between two saves is
//! honored by the second one.
//!
//! An already-formatted document yields [`Applied::Unchanged`] and is not
//! persisted again, so the save triggered by a successful format produces
//! at most one further (no-op) invocation.

use super::format_document::{FormatDocumentError, FormatDocumentInput, FormatDocumentUseCase};
use crate::ports::document_host::DocumentHost;
use crate::ports::formatter_gateway::FormatterGateway;
use crate::ports::notifier::FormatNotifier;
use crate::ports::settings::{SettingsError, SettingsPort};
use pipefmt_domain::{Applied, DocumentId};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// What happened in response to a persist event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// Format-on-persist is turned off
    Disabled,
    /// The document's language is not handled by the formatter
    Skipped { language: Option<String> },
    /// The formatter ran and its result was applied
    Formatted(Applied),
}

#[derive(Error, Debug)]
pub enum HandlePersistedError {
    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    Format(#[from] FormatDocumentError),
}

pub struct HandlePersistedUseCase<G, H, S>
where
    G: FormatterGateway + 'static,
    H: DocumentHost + 'static,
    S: SettingsPort + ?Sized,
{
    format: FormatDocumentUseCase<G, H>,
    settings: Arc<S>,
}

impl<G, H, S> HandlePersistedUseCase<G, H, S>
where
    G: FormatterGateway + 'static,
    H: DocumentHost + 'static,
    S: SettingsPort + ?Sized,
{
    pub fn new(format: FormatDocumentUseCase<G, H>, settings: Arc<S>) -> Self {
        Self { format, settings }
    }

    pub async fn execute(
        &self,
        document: DocumentId,
        notifier: &dyn FormatNotifier,
    ) -> Result<PersistOutcome, HandlePersistedError> {
        let settings = self.settings.load()?;

        if !settings.format_on_persist {
            debug!("Format on save disabled, ignoring {}", document);
            return Ok(PersistOutcome::Disabled);
        }

        let language = self.format.host().language_id(&document).await;
        if !settings.covers_language(language.as_deref()) {
            debug!(
                "Skipping {} (language {:?} not in {:?})",
                document, language, settings.languages
            );
            return Ok(PersistOutcome::Skipped { language });
        }

        let applied = self
            .format
            .execute_with_notifier(FormatDocumentInput { document, settings }, notifier)
            .await?;
        Ok(PersistOutcome::Formatted(applied))
    }
}
