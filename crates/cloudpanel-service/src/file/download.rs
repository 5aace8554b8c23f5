//! Where downloaded payloads end up.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{debug, warn};

use cloudpanel_client::disposition::FALLBACK_FILENAME;
use cloudpanel_core::error::AppError;

/// Destination for downloaded files.
#[async_trait]
pub trait DownloadSink: Send + Sync + std::fmt::Debug + 'static {
    /// Store `content` under `filename`; returns where it was stored.
    async fn save(&self, filename: &str, content: &Bytes) -> Result<PathBuf, AppError>;
}

/// Reduce a server-provided name to a single safe path component.
pub fn safe_filename(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '\0'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        FALLBACK_FILENAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Saves downloads into a directory.
///
/// The payload is written to a hidden `.{name}.part` file first and renamed
/// into place once complete, so a partially written file never carries the
/// final name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    directory: PathBuf,
}

impl DirectorySink {
    /// Creates a sink writing into `directory`, created on first use.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Target directory.
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn save(&self, filename: &str, content: &Bytes) -> Result<PathBuf, AppError> {
        let name = safe_filename(filename);
        let target = self.directory.join(&name);
        let part = self.directory.join(format!(".{name}.part"));

        tokio::fs::create_dir_all(&self.directory).await?;

        if let Err(e) = tokio::fs::write(&part, content).await {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e.into());
        }
        if let Err(e) = tokio::fs::rename(&part, &target).await {
            warn!(path = %part.display(), error = %e, "Failed to move download into place");
            let _ = tokio::fs::remove_file(&part).await;
            return Err(e.into());
        }

        debug!(path = %target.display(), size = content.len(), "Download saved");
        Ok(target)
    }
}
