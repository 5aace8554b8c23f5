//! Upload, delete, and download of owned files.

use std::path::PathBuf;

use tracing::{error, info, warn};

use cloudpanel_client::{ClientError, UploadFile, UploadReceipt};
use cloudpanel_core::error::AppError;
use cloudpanel_core::i18n::Message;
use cloudpanel_core::types::FileId;
use cloudpanel_view::{AlertLevel, Region};

use super::download::DownloadSink;
use crate::context::PanelContext;

/// Single-request mutations on owned files.
///
/// Every method reports its outcome through the dialogs before returning.
/// Refresh cascades are the caller's job.
#[derive(Debug, Clone)]
pub struct FileActionService {
    ctx: PanelContext,
}

impl FileActionService {
    /// Creates a new file action service.
    pub fn new(ctx: PanelContext) -> Self {
        Self { ctx }
    }

    /// Upload the selected file. `None` means nothing was selected.
    pub async fn upload(&self, selection: Option<UploadFile>) -> Result<UploadReceipt, AppError> {
        let Some(file) = selection else {
            self.ctx
                .alert(
                    AlertLevel::Warning,
                    Message::WarningTitle,
                    self.ctx.text(Message::NoFileSelected),
                )
                .await;
            return Err(AppError::precondition("No file selected"));
        };

        let file_name = file.file_name.clone();
        match self.ctx.api.upload(file).await {
            Ok(receipt) => {
                info!(file_name = %file_name, "Upload accepted");
                let text = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| self.ctx.text(Message::UploadSucceeded).to_string());
                self.ctx
                    .alert(AlertLevel::Success, Message::SuccessTitle, text)
                    .await;
                Ok(receipt)
            }
            Err(e) => {
                error!(file_name = %file_name, error = %e, "Upload failed");
                let text = e
                    .server_error()
                    .map(str::to_string)
                    .unwrap_or_else(|| self.ctx.text(Message::UploadFailed).to_string());
                self.ctx
                    .alert(AlertLevel::Error, Message::ErrorTitle, text)
                    .await;
                Err(e.into())
            }
        }
    }

    /// Delete a file and drop its row right away.
    pub async fn delete(&self, id: FileId) -> Result<(), AppError> {
        match self.ctx.api.delete_file(id).await {
            Ok(()) => {
                let key = id.to_string();
                self.ctx.view.remove_row(Region::FileList, &key).await;
                self.ctx
                    .bindings
                    .write()
                    .await
                    .unbind_target(Region::FileList, &key);
                self.ctx
                    .alert(
                        AlertLevel::Success,
                        Message::SuccessTitle,
                        self.ctx.text(Message::DeleteSucceeded),
                    )
                    .await;
                Ok(())
            }
            Err(e) if e.blocked_by_shares() => {
                warn!(file_id = %id, "Delete refused: file has active shares");
                self.ctx
                    .alert(
                        AlertLevel::Warning,
                        Message::WarningTitle,
                        self.ctx.text(Message::DeleteBlockedByShares),
                    )
                    .await;
                Err(e.into())
            }
            Err(e) => {
                error!(file_id = %id, error = %e, "Delete failed");
                let text = match &e {
                    e if e.is_network() => self.ctx.text(Message::DeleteNetworkError).to_string(),
                    ClientError::MissingCsrfToken => self.ctx.text(Message::CsrfMissing).to_string(),
                    other => other
                        .server_error()
                        .map(str::to_string)
                        .unwrap_or_else(|| self.ctx.text(Message::DeleteFailed).to_string()),
                };
                self.ctx
                    .alert(AlertLevel::Error, Message::ErrorTitle, text)
                    .await;
                Err(e.into())
            }
        }
    }

    /// Download a file into `sink`.
    pub async fn download(
        &self,
        id: FileId,
        sink: &dyn DownloadSink,
    ) -> Result<PathBuf, AppError> {
        let download = match self.ctx.api.download_file(id).await {
            Ok(download) => download,
            Err(e) => {
                error!(file_id = %id, error = %e, "Download failed");
                let text = match e.body() {
                    Some(body) if body.is_json => body
                        .error
                        .clone()
                        .or_else(|| body.details.clone())
                        .unwrap_or_else(|| self.ctx.text(Message::DownloadFailed).to_string()),
                    _ => self.ctx.text(Message::DownloadUnexpected).to_string(),
                };
                self.ctx
                    .alert(AlertLevel::Error, Message::ErrorTitle, text)
                    .await;
                return Err(e.into());
            }
        };

        match sink.save(&download.filename, &download.content).await {
            Ok(path) => {
                info!(file_id = %id, path = %path.display(), "Download stored");
                self.ctx
                    .alert(
                        AlertLevel::Success,
                        Message::DownloadSaved,
                        path.display().to_string(),
                    )
                    .await;
                Ok(path)
            }
            Err(e) => {
                error!(file_id = %id, error = %e, "Failed to store download");
                self.ctx
                    .alert(
                        AlertLevel::Error,
                        Message::ErrorTitle,
                        self.ctx.text(Message::DownloadUnexpected),
                    )
                    .await;
                Err(e)
            }
        }
    }
}
