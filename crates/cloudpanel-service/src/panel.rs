//! The panel orchestrator.
//!
//! [`CloudPanel`] owns one instance of each flow and runs the refresh
//! cascade that follows every successful mutation, so the file list, the
//! shared list, and the quota bar always come from the latest fetch.

use std::ops::BitOr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use cloudpanel_client::{UploadFile, UploadReceipt};
use cloudpanel_core::error::AppError;
use cloudpanel_core::i18n::Message;
use cloudpanel_core::types::{FileId, ShareId};
use cloudpanel_entity::FileRecord;
use cloudpanel_view::{Action, Alert, AlertLevel, Binding};

use crate::context::PanelContext;
use crate::editor::EditorService;
use crate::file::{DownloadSink, FileActionService, FileListService};
use crate::share::{ShareOutcome, ShareWorkflow, SharedInboxService};
use crate::storage::QuotaService;

/// A set of regions to re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Refresh {
    /// Shared-with-me list.
    pub shared: bool,
    /// Owned file list, without the quota follow-up.
    pub files: bool,
    /// Quota bar.
    pub quota: bool,
}

impl Refresh {
    pub const NONE: Self = Self {
        shared: false,
        files: false,
        quota: false,
    };
    pub const SHARED: Self = Self {
        shared: true,
        ..Self::NONE
    };
    pub const FILES: Self = Self {
        files: true,
        ..Self::NONE
    };
    pub const QUOTA: Self = Self {
        quota: true,
        ..Self::NONE
    };
    pub const ALL: Self = Self {
        shared: true,
        files: true,
        quota: true,
    };
}

impl BitOr for Refresh {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self {
            shared: self.shared || rhs.shared,
            files: self.files || rhs.files,
            quota: self.quota || rhs.quota,
        }
    }
}

/// Every panel flow behind one handle.
#[derive(Debug, Clone)]
pub struct CloudPanel {
    ctx: PanelContext,
    files: FileListService,
    actions: FileActionService,
    workflow: ShareWorkflow,
    inbox: SharedInboxService,
    quota: QuotaService,
    editor: EditorService,
    sink: Arc<dyn DownloadSink>,
}

impl CloudPanel {
    /// Creates a panel; downloads are stored through `sink`.
    pub fn new(ctx: PanelContext, sink: Arc<dyn DownloadSink>) -> Self {
        Self {
            files: FileListService::new(ctx.clone()),
            actions: FileActionService::new(ctx.clone()),
            workflow: ShareWorkflow::new(ctx.clone()),
            inbox: SharedInboxService::new(ctx.clone()),
            quota: QuotaService::new(ctx.clone()),
            editor: EditorService::new(ctx.clone()),
            ctx,
            sink,
        }
    }

    pub fn files(&self) -> &FileListService {
        &self.files
    }

    pub fn inbox(&self) -> &SharedInboxService {
        &self.inbox
    }

    pub fn quota(&self) -> &QuotaService {
        &self.quota
    }

    pub fn editor(&self) -> &EditorService {
        &self.editor
    }

    /// Re-fetch the regions in `set`, in the order shared, files, quota.
    ///
    /// Each member runs once; a failure in one does not skip the others.
    pub async fn refresh(&self, set: Refresh) {
        debug!(?set, "Running refresh cascade");
        if set.shared {
            let _ = self.inbox.refresh().await;
        }
        if set.files {
            let _ = self.files.refresh().await;
        }
        if set.quota {
            self.quota.refresh().await;
        }
    }

    /// Initial population of all three regions.
    pub async fn load(&self) {
        self.refresh(Refresh::ALL).await;
    }

    /// Re-fetch the file list; on success the quota follows.
    pub async fn refresh_files(&self) -> Result<Vec<FileRecord>, AppError> {
        let files = self.files.refresh().await?;
        self.quota.refresh().await;
        Ok(files)
    }

    pub async fn upload(&self, selection: Option<UploadFile>) -> Result<UploadReceipt, AppError> {
        let receipt = self.actions.upload(selection).await?;
        let _ = self.refresh_files().await;
        Ok(receipt)
    }

    /// Delete a file. The row goes right away; the list is re-fetched after.
    pub async fn delete(&self, id: FileId) -> Result<(), AppError> {
        self.actions.delete(id).await?;
        let _ = self.refresh_files().await;
        Ok(())
    }

    /// Downloads do not change server state, so nothing is refreshed.
    pub async fn download(&self, id: FileId) -> Result<PathBuf, AppError> {
        self.actions.download(id, self.sink.as_ref()).await
    }

    /// Run the share workflow for a file id as rendered.
    pub async fn share(&self, raw_id: &str) -> ShareOutcome {
        let outcome = self.workflow.run(raw_id).await;
        if outcome.is_shared() {
            let _ = self.refresh_files().await;
        }
        outcome
    }

    /// Accept a share and re-fetch every region exactly once.
    pub async fn accept(&self, id: ShareId) -> Result<(), AppError> {
        self.inbox.accept(id).await?;
        self.refresh(Refresh::ALL).await;
        Ok(())
    }

    /// Reject a share; only the shared list can change.
    pub async fn reject(&self, id: ShareId) -> Result<(), AppError> {
        self.inbox.reject(id).await?;
        self.refresh(Refresh::SHARED).await;
        Ok(())
    }

    /// Actions currently bound to rendered rows.
    pub async fn bindings(&self) -> Vec<Binding> {
        self.ctx.bindings.read().await.all()
    }

    /// Trigger a bound action.
    pub async fn dispatch(&self, binding: &Binding) -> Result<(), AppError> {
        info!(action = %binding.action, target = %binding.target, "Dispatching action");
        match binding.action {
            Action::Share => {
                self.share(&binding.target).await;
                Ok(())
            }
            Action::Download => {
                let id = self.parse_target(&binding.target).await?;
                self.download(FileId(id)).await.map(|_| ())
            }
            Action::Delete => {
                let id = self.parse_target(&binding.target).await?;
                self.delete(FileId(id)).await
            }
            Action::Accept => {
                let id = self.parse_target(&binding.target).await?;
                self.accept(ShareId(id)).await
            }
            Action::Reject => {
                let id = self.parse_target(&binding.target).await?;
                self.reject(ShareId(id)).await
            }
        }
    }

    async fn parse_target(&self, raw: &str) -> Result<i64, AppError> {
        if let Ok(id) = raw.trim().parse::<i64>() {
            return Ok(id);
        }
        self.ctx
            .show(
                Alert::new(
                    AlertLevel::Error,
                    self.ctx.text(Message::InvalidFileTitle),
                    self.ctx.text(Message::InvalidTarget),
                )
                .with_footer(format!(
                    "{}: {raw}",
                    self.ctx.text(Message::ReceivedFileId)
                )),
            )
            .await;
        Err(AppError::validation(format!("Invalid target id: {raw:?}")))
    }
}
