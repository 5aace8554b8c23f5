//! The REST surface consumed by the panel.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use cloudpanel_core::types::{FileId, ShareId, UserId};
use cloudpanel_entity::{
    CodeDocument, DocumentSource, FileRecord, ShareOutcomeBody, ShareRecord, SkippedShare,
    StorageInfo, UserMatch,
};

use crate::error::ClientError;

/// A file selected for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Name sent in the multipart part.
    pub file_name: String,
    /// MIME type of the content.
    pub mime_type: String,
    /// Raw content.
    pub content: Bytes,
}

/// Success body of `POST /cloud/upload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    /// Id of the stored file.
    #[serde(default)]
    pub id: Option<FileId>,
    /// Name the server stored the file under.
    #[serde(default)]
    pub filename: Option<String>,
    /// Server confirmation text.
    #[serde(default)]
    pub message: Option<String>,
}

/// A downloaded payload and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct Download {
    /// File name from `Content-Disposition`, or the generic fallback.
    pub filename: String,
    /// Payload.
    pub content: Bytes,
}

/// Inbound shares split into renderable and skipped entries.
#[derive(Debug, Clone, Default)]
pub struct SharedListing {
    /// Entries to render.
    pub records: Vec<ShareRecord>,
    /// Entries carrying an error marker or no id.
    pub skipped: Vec<SkippedShare>,
}

/// Every server call the panel makes.
///
/// Mutating calls that need the anti-forgery token fail with
/// [`ClientError::MissingCsrfToken`] before sending anything when it is
/// unknown.
#[async_trait]
pub trait CloudApi: Send + Sync + std::fmt::Debug + 'static {
    /// `GET /cloud/files`.
    async fn list_files(&self) -> Result<Vec<FileRecord>, ClientError>;

    /// `GET /cloud/storage-info`.
    async fn storage_info(&self) -> Result<StorageInfo, ClientError>;

    /// `POST /cloud/upload` (multipart field `file`).
    async fn upload(&self, file: UploadFile) -> Result<UploadReceipt, ClientError>;

    /// `DELETE /cloud/files/{id}`.
    async fn delete_file(&self, id: FileId) -> Result<(), ClientError>;

    /// `GET /cloud/files/{id}/download`.
    async fn download_file(&self, id: FileId) -> Result<Download, ClientError>;

    /// `GET /cloud/files/search-users?query=`.
    async fn search_users(&self, query: &str) -> Result<Vec<UserMatch>, ClientError>;

    /// `POST /cloud/files/{id}/share` with `{recipient_ids}`.
    async fn share_file(
        &self,
        id: FileId,
        recipients: &[UserId],
    ) -> Result<ShareOutcomeBody, ClientError>;

    /// `GET /cloud/files/shared`.
    async fn list_shared(&self) -> Result<SharedListing, ClientError>;

    /// `POST /cloud/files/shared/{id}/accept`; returns the server message.
    async fn accept_share(&self, id: ShareId) -> Result<Option<String>, ClientError>;

    /// `POST /cloud/files/shared/{id}/reject`; returns the server message.
    async fn reject_share(&self, id: ShareId) -> Result<Option<String>, ClientError>;

    /// Names of the documents in `source`.
    async fn list_documents(&self, source: DocumentSource) -> Result<Vec<String>, ClientError>;

    /// Load one document from `source`.
    async fn load_document(
        &self,
        source: DocumentSource,
        filename: &str,
    ) -> Result<CodeDocument, ClientError>;

    /// Save a document into `source`; returns the server message.
    async fn save_document(
        &self,
        source: DocumentSource,
        document: &CodeDocument,
    ) -> Result<Option<String>, ClientError>;

    /// Delete a document from `source`; returns the server message.
    async fn delete_document(
        &self,
        source: DocumentSource,
        filename: &str,
    ) -> Result<Option<String>, ClientError>;
}
