//! In-crate test doubles.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::{Mutex, oneshot};

use cloudpanel_client::{
    ClientError, CloudApi, Download, ErrorBody, SharedListing, UploadFile, UploadReceipt,
};
use cloudpanel_core::config::display::DisplayConfig;
use cloudpanel_core::types::{FileId, ShareId, UserId};
use cloudpanel_entity::{
    CodeDocument, CreatedShare, DocumentSource, FileRecord, ShareOutcomeBody, ShareRecord,
    SkippedShare, StorageInfo, UserMatch,
};
use cloudpanel_view::{MemoryView, ScriptedDialogs};

use crate::context::PanelContext;

/// Produces the error an operation fails with.
pub type Failure = fn() -> ClientError;

/// A rejection carrying a JSON body.
pub fn rejected(status: u16, body: &str) -> ClientError {
    ClientError::Rejected {
        status,
        body: ErrorBody::parse(body.to_string()),
    }
}

#[derive(Debug, Default)]
struct State {
    files: Vec<FileRecord>,
    storage: StorageInfo,
    users: Vec<UserMatch>,
    shares: Vec<ShareRecord>,
    skipped: Vec<SkippedShare>,
    documents: HashMap<(DocumentSource, String), CodeDocument>,
    download: Option<Download>,
    failures: HashMap<&'static str, Failure>,
    list_gates: Vec<oneshot::Receiver<()>>,
    list_snapshots: Vec<Vec<FileRecord>>,
    quiet_share: bool,
}

/// Stateful fake server recording every call in order.
#[derive(Debug, Default)]
pub struct FakeApi {
    state: Mutex<State>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_files(self, files: Vec<FileRecord>) -> Self {
        self.state.lock().await.files = files;
        self
    }

    pub async fn set_storage(&self, storage: StorageInfo) {
        self.state.lock().await.storage = storage;
    }

    pub async fn set_users(&self, users: Vec<UserMatch>) {
        self.state.lock().await.users = users;
    }

    pub async fn set_shares(&self, shares: Vec<ShareRecord>, skipped: Vec<SkippedShare>) {
        let mut state = self.state.lock().await;
        state.shares = shares;
        state.skipped = skipped;
    }

    /// Share responses leave out the confirmation message.
    pub async fn omit_share_message(&self) {
        self.state.lock().await.quiet_share = true;
    }

    pub async fn set_download(&self, download: Download) {
        self.state.lock().await.download = Some(download);
    }

    pub async fn put_document(&self, source: DocumentSource, document: CodeDocument) {
        self.state
            .lock()
            .await
            .documents
            .insert((source, document.filename.clone()), document);
    }

    /// Make `op` fail until cleared.
    pub async fn fail(&self, op: &'static str, failure: Failure) {
        self.state.lock().await.failures.insert(op, failure);
    }

    pub async fn clear_failure(&self, op: &'static str) {
        self.state.lock().await.failures.remove(op);
    }

    /// The next `list_files` call returns `snapshot` once `gate` fires.
    pub async fn gate_next_list(&self, snapshot: Vec<FileRecord>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        let mut state = self.state.lock().await;
        state.list_gates.push(rx);
        state.list_snapshots.push(snapshot);
        tx
    }

    /// Gates not yet picked up by a `list_files` call.
    pub async fn gates_pending(&self) -> usize {
        self.state.lock().await.list_gates.len()
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, op: &str) -> usize {
        self.calls
            .lock()
            .await
            .iter()
            .filter(|c| c.split(':').next() == Some(op))
            .count()
    }

    async fn record(&self, call: String) -> Result<(), ClientError> {
        let op = call.split(':').next().unwrap_or_default().to_string();
        self.calls.lock().await.push(call);
        match self.state.lock().await.failures.get(op.as_str()) {
            Some(failure) => Err(failure()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CloudApi for FakeApi {
    async fn list_files(&self) -> Result<Vec<FileRecord>, ClientError> {
        self.record("list_files".into()).await?;

        let gated = {
            let mut state = self.state.lock().await;
            if state.list_gates.is_empty() {
                None
            } else {
                Some((state.list_gates.remove(0), state.list_snapshots.remove(0)))
            }
        };
        if let Some((gate, snapshot)) = gated {
            let _ = gate.await;
            return Ok(snapshot);
        }
        Ok(self.state.lock().await.files.clone())
    }

    async fn storage_info(&self) -> Result<StorageInfo, ClientError> {
        self.record("storage_info".into()).await?;
        Ok(self.state.lock().await.storage.clone())
    }

    async fn upload(&self, file: UploadFile) -> Result<UploadReceipt, ClientError> {
        self.record(format!("upload:{}", file.file_name)).await?;
        let mut state = self.state.lock().await;
        let id = FileId(state.files.len() as i64 + 100);
        state.files.push(FileRecord::from_value(&serde_json::json!({
            "id": id.get(),
            "filename": file.file_name,
            "size": file.content.len(),
            "type": file.mime_type,
        })));
        Ok(UploadReceipt {
            id: Some(id),
            filename: Some(file.file_name),
            message: Some("File uploaded successfully".into()),
        })
    }

    async fn delete_file(&self, id: FileId) -> Result<(), ClientError> {
        self.record(format!("delete_file:{id}")).await?;
        self.state
            .lock()
            .await
            .files
            .retain(|f| f.id != Some(id));
        Ok(())
    }

    async fn download_file(&self, id: FileId) -> Result<Download, ClientError> {
        self.record(format!("download_file:{id}")).await?;
        Ok(self.state.lock().await.download.clone().unwrap_or(Download {
            filename: "downloaded_file".into(),
            content: Bytes::new(),
        }))
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserMatch>, ClientError> {
        self.record(format!("search_users:{query}")).await?;
        Ok(self.state.lock().await.users.clone())
    }

    async fn share_file(
        &self,
        id: FileId,
        recipients: &[UserId],
    ) -> Result<ShareOutcomeBody, ClientError> {
        let list: Vec<String> = recipients.iter().map(ToString::to_string).collect();
        self.record(format!("share_file:{id}:{}", list.join(","))).await?;
        let quiet = self.state.lock().await.quiet_share;
        Ok(ShareOutcomeBody {
            message: (!quiet).then(|| format!("File shared with {} user(s)", recipients.len())),
            shared_files: recipients
                .iter()
                .map(|r| CreatedShare {
                    id: None,
                    original_file_id: Some(id),
                    recipient_id: Some(*r),
                    status: Some("pending".into()),
                })
                .collect(),
        })
    }

    async fn list_shared(&self) -> Result<SharedListing, ClientError> {
        self.record("list_shared".into()).await?;
        let state = self.state.lock().await;
        Ok(SharedListing {
            records: state.shares.clone(),
            skipped: state.skipped.clone(),
        })
    }

    async fn accept_share(&self, id: ShareId) -> Result<Option<String>, ClientError> {
        self.record(format!("accept_share:{id}")).await?;
        let mut state = self.state.lock().await;
        if let Some(pos) = state.shares.iter().position(|s| s.id == id) {
            let share = state.shares.remove(pos);
            let new_id = state.files.len() as i64 + 200;
            state.files.push(FileRecord::from_value(&serde_json::json!({
                "id": new_id,
                "filename": share.file_name,
            })));
        }
        Ok(Some("File accepted successfully".into()))
    }

    async fn reject_share(&self, id: ShareId) -> Result<Option<String>, ClientError> {
        self.record(format!("reject_share:{id}")).await?;
        self.state.lock().await.shares.retain(|s| s.id != id);
        Ok(Some("File share rejected".into()))
    }

    async fn list_documents(&self, source: DocumentSource) -> Result<Vec<String>, ClientError> {
        self.record(format!("list_documents:{source}")).await?;
        let state = self.state.lock().await;
        let mut names: Vec<String> = state
            .documents
            .keys()
            .filter(|(s, _)| *s == source)
            .map(|(_, name)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn load_document(
        &self,
        source: DocumentSource,
        filename: &str,
    ) -> Result<CodeDocument, ClientError> {
        self.record(format!("load_document:{source}:{filename}")).await?;
        self.state
            .lock()
            .await
            .documents
            .get(&(source, filename.to_string()))
            .cloned()
            .ok_or_else(|| rejected(404, r#"{"error": "File not found"}"#))
    }

    async fn save_document(
        &self,
        source: DocumentSource,
        document: &CodeDocument,
    ) -> Result<Option<String>, ClientError> {
        self.record(format!("save_document:{source}:{}", document.filename))
            .await?;
        self.state
            .lock()
            .await
            .documents
            .insert((source, document.filename.clone()), document.clone());
        Ok(Some("File saved successfully".into()))
    }

    async fn delete_document(
        &self,
        source: DocumentSource,
        filename: &str,
    ) -> Result<Option<String>, ClientError> {
        self.record(format!("delete_document:{source}:{filename}")).await?;
        self.state
            .lock()
            .await
            .documents
            .remove(&(source, filename.to_string()));
        Ok(Some("File deleted successfully".into()))
    }
}

/// A context wired to in-memory surfaces.
pub struct Harness {
    pub api: Arc<FakeApi>,
    pub view: Arc<MemoryView>,
    pub dialogs: Arc<ScriptedDialogs>,
    pub ctx: PanelContext,
}

impl Harness {
    pub fn new(api: FakeApi) -> Self {
        let api = Arc::new(api);
        let view = Arc::new(MemoryView::new());
        let dialogs = Arc::new(ScriptedDialogs::new());
        let ctx = PanelContext::new(
            api.clone(),
            view.clone(),
            dialogs.clone(),
            &DisplayConfig::default(),
        );
        Self {
            api,
            view,
            dialogs,
            ctx,
        }
    }
}

pub fn file(id: i64, name: &str) -> FileRecord {
    FileRecord::from_value(&serde_json::json!({"id": id, "filename": name, "size": 2048}))
}

pub fn share(id: i64, name: &str) -> ShareRecord {
    ShareRecord::from_value(&serde_json::json!({
        "id": id,
        "file_name": name,
        "sender_username": "alice",
        "status": "pending"
    }))
    .unwrap_or_else(|skip| panic!("fixture share skipped: {}", skip.reason))
}

pub fn user(id: i64, name: &str) -> UserMatch {
    UserMatch {
        id: UserId(id),
        username: name.into(),
        email: format!("{name}@example.com"),
    }
}
