//! File-backed document host.
//!
//! A [`DocumentId`] is a file path. Edits land in an in-memory buffer and
//! reach the disk only on `persist`, which writes a sibling temporary file
//! and renames it over the original. A reader never sees a half-written
//! document, and a failed persist leaves the original file intact.

use async_trait::async_trait;
use pipefmt_application::{DocumentHost, HostError};
use pipefmt_domain::DocumentId;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tracing::{debug, trace};

#[derive(Debug, Default)]
pub struct FileDocumentHost {
    /// Replaced but not yet persisted content
    pending: Mutex<HashMap<DocumentId, String>>,
}

impl FileDocumentHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn pending(&self) -> std::sync::MutexGuard<'_, HashMap<DocumentId, String>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn io_error(document: &DocumentId, source: std::io::Error) -> HostError {
        HostError::Io {
            document: document.to_string(),
            source,
        }
    }
}

#[async_trait]
impl DocumentHost for FileDocumentHost {
    async fn text(&self, document: &DocumentId) -> Result<String, HostError> {
        if let Some(text) = self.pending().get(document) {
            return Ok(text.clone());
        }
        let path = Path::new(document.as_str());
        tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HostError::UnknownDocument(document.to_string())
            } else {
                Self::io_error(document, e)
            }
        })
    }

    async fn replace_all(&self, document: &DocumentId, text: &str) -> Result<(), HostError> {
        let path = Path::new(document.as_str());
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|e| Self::io_error(document, e))?;
        if metadata.permissions().readonly() {
            return Err(HostError::ReadOnly(document.to_string()));
        }
        self.pending().insert(document.clone(), text.to_string());
        trace!("Buffered {} bytes for {}", text.len(), document);
        Ok(())
    }

    async fn persist(&self, document: &DocumentId) -> Result<(), HostError> {
        let Some(text) = self.pending().get(document).cloned() else {
            trace!("Nothing to persist for {}", document);
            return Ok(());
        };

        // Write through symlinks: renaming over the link itself would
        // replace it with a regular file and leave the target untouched.
        let path = tokio::fs::canonicalize(document.as_str())
            .await
            .map_err(|e| Self::io_error(document, e))?;
        let temp = temp_path(&path);
        let result = async {
            let mut file = tokio::fs::File::create(&temp).await?;
            file.write_all(text.as_bytes()).await?;
            file.sync_all().await?;
            drop(file);
            if let Ok(metadata) = tokio::fs::metadata(&path).await {
                tokio::fs::set_permissions(&temp, metadata.permissions()).await?;
            }
            tokio::fs::rename(&temp, &path).await
        }
        .await;

        if let Err(e) = result {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(Self::io_error(document, e));
        }

        self.pending().remove(document);
        debug!("Wrote {} ({} bytes)", path.display(), text.len());
        Ok(())
    }

    async fn language_id(&self, document: &DocumentId) -> Option<String> {
        let extension = Path::new(document.as_str()).extension()?.to_str()?;
        language_for_extension(extension).map(str::to_string)
    }
}

/// `dir/.name.<pid>.pipefmt-tmp`, next to the target so the rename stays on
/// one filesystem. The pid keeps concurrent pipefmt processes apart.
fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    path.with_file_name(format!(".{}.{}.pipefmt-tmp", name, std::process::id()))
}

/// Language id for a file extension, following common editor ids.
pub fn language_for_extension(extension: &str) -> Option<&'static str> {
    let language = match extension.to_ascii_lowercase().as_str() {
        "rs" => "rust",
        "toml" => "toml",
        "md" | "markdown" => "markdown",
        "json" => "json",
        "js" | "mjs" | "cjs" => "javascript",
        "ts" => "typescript",
        "html" | "htm" => "html",
        "css" => "css",
        "py" => "python",
        "go" => "go",
        _ => return None,
    };
    Some(language)
}
