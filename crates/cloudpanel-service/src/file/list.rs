//! Owned file list synchronization.

use tracing::{debug, error, warn};

use cloudpanel_core::error::AppError;
use cloudpanel_core::i18n::Message;
use cloudpanel_entity::FileRecord;
use cloudpanel_view::{AlertLevel, Region, render};

use crate::context::PanelContext;

/// Re-renders the owned files table from the server.
#[derive(Debug, Clone)]
pub struct FileListService {
    ctx: PanelContext,
}

impl FileListService {
    /// Creates a new file list service.
    pub fn new(ctx: PanelContext) -> Self {
        Self { ctx }
    }

    /// Fetch the file list and replace the table with it.
    ///
    /// On failure an alert is shown and the previous rows stay as they are.
    /// A response overtaken by a newer refresh is returned but not rendered.
    pub async fn refresh(&self) -> Result<Vec<FileRecord>, AppError> {
        let ticket = self.ctx.sequencer.issue(Region::FileList);
        debug!(generation = ticket.generation, "Refreshing file list");

        let files = match self.ctx.api.list_files().await {
            Ok(files) => files,
            Err(e) => {
                error!(error = %e, "Failed to fetch files");
                self.ctx
                    .alert(
                        AlertLevel::Error,
                        Message::ErrorTitle,
                        self.ctx.text(Message::FilesLoadFailed),
                    )
                    .await;
                return Err(e.into());
            }
        };

        if !self.ctx.sequencer.is_current(ticket) {
            warn!(
                region = %Region::FileList,
                generation = ticket.generation,
                latest = self.ctx.sequencer.latest(Region::FileList),
                "Discarding stale response"
            );
            return Ok(files);
        }

        let table = render::file_table(&files, self.ctx.locale);
        self.ctx
            .bindings
            .write()
            .await
            .rebind(Region::FileList, &table);
        self.ctx.view.replace(Region::FileList, table).await;

        debug!(count = files.len(), "File list rendered");
        Ok(files)
    }
}
