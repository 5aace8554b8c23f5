//! Code editor document operations.
//!
//! The document source is an argument of every call; the service keeps no
//! notion of a "current" source.

use tracing::{error, info};

use cloudpanel_client::ClientError;
use cloudpanel_core::error::AppError;
use cloudpanel_core::i18n::Message;
use cloudpanel_entity::{CodeDocument, DocumentSource};
use cloudpanel_view::AlertLevel;

use crate::context::PanelContext;

/// List, load, save, and delete editor documents.
#[derive(Debug, Clone)]
pub struct EditorService {
    ctx: PanelContext,
}

impl EditorService {
    /// Creates a new editor service.
    pub fn new(ctx: PanelContext) -> Self {
        Self { ctx }
    }

    /// Document names in `source`.
    pub async fn list(&self, source: DocumentSource) -> Result<Vec<String>, AppError> {
        match self.ctx.api.list_documents(source).await {
            Ok(names) => Ok(names),
            Err(e) => {
                error!(%source, error = %e, "Error loading file list");
                Err(e.into())
            }
        }
    }

    /// Open one document.
    pub async fn load(&self, source: DocumentSource, filename: &str) -> Result<CodeDocument, AppError> {
        let filename = self.require_name(filename).await?;
        match self.ctx.api.load_document(source, filename).await {
            Ok(document) => Ok(document),
            Err(e) => Err(self.fail(Message::DocumentLoadFailed, e).await),
        }
    }

    /// Save a document, then return the refreshed list for the same source.
    pub async fn save(
        &self,
        source: DocumentSource,
        document: &CodeDocument,
    ) -> Result<Vec<String>, AppError> {
        self.require_name(&document.filename).await?;
        if let Err(e) = self.ctx.api.save_document(source, document).await {
            return Err(self.fail(Message::DocumentSaveFailed, e).await);
        }

        info!(%source, filename = %document.filename, "Document saved");
        self.ctx
            .alert(
                AlertLevel::Success,
                Message::SuccessTitle,
                self.ctx.text(Message::DocumentSaved),
            )
            .await;
        self.list(source).await
    }

    /// Delete a document, then return the refreshed list for the same source.
    pub async fn delete(&self, source: DocumentSource, filename: &str) -> Result<Vec<String>, AppError> {
        let filename = self.require_name(filename).await?;
        if let Err(e) = self.ctx.api.delete_document(source, filename).await {
            return Err(self.fail(Message::DeleteFailed, e).await);
        }

        info!(%source, %filename, "Document deleted");
        self.ctx
            .alert(
                AlertLevel::Success,
                Message::SuccessTitle,
                self.ctx.text(Message::DocumentDeleted),
            )
            .await;
        self.list(source).await
    }

    async fn require_name<'a>(&self, filename: &'a str) -> Result<&'a str, AppError> {
        let trimmed = filename.trim();
        if trimmed.is_empty() {
            self.ctx
                .alert(
                    AlertLevel::Warning,
                    Message::WarningTitle,
                    self.ctx.text(Message::FilenameRequired),
                )
                .await;
            return Err(AppError::precondition("Filename is required"));
        }
        Ok(trimmed)
    }

    async fn fail(&self, prefix: Message, e: ClientError) -> AppError {
        error!(error = %e, "{}", self.ctx.text(prefix));
        let detail = e
            .server_error()
            .map(str::to_string)
            .unwrap_or_else(|| e.to_string());
        self.ctx
            .alert(
                AlertLevel::Error,
                Message::ErrorTitle,
                format!("{}: {detail}", self.ctx.text(prefix)),
            )
            .await;
        e.into()
    }
}
