//! Files other users have shared with the current user.

use tracing::{debug, error, info, warn};

use cloudpanel_client::ClientError;
use cloudpanel_core::error::AppError;
use cloudpanel_core::i18n::Message;
use cloudpanel_core::types::ShareId;
use cloudpanel_entity::ShareRecord;
use cloudpanel_view::{AlertLevel, Region, render};

use crate::context::PanelContext;

/// Shared-with-me list plus the accept and reject decisions on it.
#[derive(Debug, Clone)]
pub struct SharedInboxService {
    ctx: PanelContext,
}

/// Which decision was taken on a share.
#[derive(Debug, Clone, Copy)]
enum Decision {
    Accept,
    Reject,
}

impl Decision {
    fn succeeded(self) -> Message {
        match self {
            Self::Accept => Message::AcceptSucceeded,
            Self::Reject => Message::RejectSucceeded,
        }
    }

    fn failed(self) -> Message {
        match self {
            Self::Accept => Message::AcceptFailed,
            Self::Reject => Message::RejectFailed,
        }
    }
}

impl SharedInboxService {
    /// Creates a new inbox service.
    pub fn new(ctx: PanelContext) -> Self {
        Self { ctx }
    }

    /// Fetch shared files and replace the shared table.
    ///
    /// Entries without an id are skipped with a warning. On failure the
    /// region shows an inline error and previously rendered rows stay.
    pub async fn refresh(&self) -> Result<Vec<ShareRecord>, AppError> {
        let ticket = self.ctx.sequencer.issue(Region::SharedList);
        debug!(generation = ticket.generation, "Refreshing shared files");

        let listing = match self.ctx.api.list_shared().await {
            Ok(listing) => listing,
            Err(e) => {
                error!(error = %e, "Error loading shared files");
                if self.ctx.sequencer.is_current(ticket) {
                    self.ctx
                        .view
                        .notice(Region::SharedList, Some(render::shared_error(self.ctx.locale)))
                        .await;
                }
                return Err(e.into());
            }
        };

        for skipped in &listing.skipped {
            warn!(reason = %skipped.reason, entry = %skipped.raw, "Skipping shared file entry");
        }

        if !self.ctx.sequencer.is_current(ticket) {
            warn!(
                region = %Region::SharedList,
                generation = ticket.generation,
                latest = self.ctx.sequencer.latest(Region::SharedList),
                "Discarding stale response"
            );
            return Ok(listing.records);
        }

        let table = render::shared_table(&listing.records, self.ctx.locale);
        self.ctx
            .bindings
            .write()
            .await
            .rebind(Region::SharedList, &table);
        self.ctx.view.replace(Region::SharedList, table).await;
        self.ctx.view.notice(Region::SharedList, None).await;

        debug!(count = listing.records.len(), "Shared files rendered");
        Ok(listing.records)
    }

    /// Accept a share; the file joins the user's own storage.
    pub async fn accept(&self, id: ShareId) -> Result<(), AppError> {
        let result = self.ctx.api.accept_share(id).await;
        self.report(id, Decision::Accept, result).await
    }

    /// Reject a share.
    pub async fn reject(&self, id: ShareId) -> Result<(), AppError> {
        let result = self.ctx.api.reject_share(id).await;
        self.report(id, Decision::Reject, result).await
    }

    async fn report(
        &self,
        id: ShareId,
        decision: Decision,
        result: Result<Option<String>, ClientError>,
    ) -> Result<(), AppError> {
        match result {
            Ok(_) => {
                info!(share_id = %id, ?decision, "Share decision recorded");
                self.ctx
                    .alert(
                        AlertLevel::Success,
                        Message::SuccessTitle,
                        self.ctx.text(decision.succeeded()),
                    )
                    .await;
                Ok(())
            }
            Err(e) => {
                error!(share_id = %id, ?decision, error = %e, "Share decision failed");
                let text = match &e {
                    ClientError::Rejected { body, .. } => body
                        .error
                        .clone()
                        .unwrap_or_else(|| self.ctx.text(decision.failed()).to_string()),
                    ClientError::MissingCsrfToken => self.ctx.text(Message::CsrfMissing).to_string(),
                    _ => self.ctx.text(Message::Unexpected).to_string(),
                };
                self.ctx
                    .alert(AlertLevel::Error, Message::ErrorTitle, text)
                    .await;
                Err(e.into())
            }
        }
    }
}
