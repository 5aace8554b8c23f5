//! Interactive share workflow.
//!
//! One run walks the states below, ending in exactly one [`ShareOutcome`]:
//!
//! ```text
//! Idle -> ValidateTarget -> SearchPrompt -> Searching -> ResolveTarget
//!      -> [RecipientSelection] -> Sharing -> Done
//! ```
//!
//! Every failure ends the run with a dialog; there is no retry. Cancelling
//! the search prompt or the recipient picker ends it silently.

use std::fmt;

use tracing::{debug, error, info, warn};

use cloudpanel_client::ClientError;
use cloudpanel_core::i18n::Message;
use cloudpanel_core::types::{FileId, UserId};
use cloudpanel_entity::{CreatedShare, UserMatch};
use cloudpanel_view::{Alert, AlertLevel, TextPrompt, render};

use crate::context::PanelContext;

/// Position of a run in the workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareState {
    /// Nothing started.
    Idle,
    /// Checking the raw file id.
    ValidateTarget,
    /// Waiting for a search query.
    SearchPrompt,
    /// User search in flight.
    Searching,
    /// Deciding between a direct share and the picker.
    ResolveTarget,
    /// Waiting for the recipient picker.
    RecipientSelection,
    /// Share request in flight.
    Sharing,
    /// Finished, whatever the outcome.
    Done,
}

impl fmt::Display for ShareState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    /// Share created; one entry per recipient.
    Shared(Vec<CreatedShare>),
    /// The user closed a prompt.
    Cancelled,
    /// The search matched nobody.
    NoUsersFound,
    /// The file id was missing or not a number; nothing was sent.
    InvalidTarget,
    /// The search or the share request failed.
    Failed,
}

impl ShareOutcome {
    /// Whether a share was created.
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

/// State tracker for one run.
#[derive(Debug)]
struct Run {
    state: ShareState,
    raw_id: String,
}

impl Run {
    fn advance(&mut self, next: ShareState) {
        debug!(raw_file_id = %self.raw_id, from = %self.state, to = %next, "Share transition");
        self.state = next;
    }

    fn finish(&mut self, outcome: ShareOutcome) -> ShareOutcome {
        self.advance(ShareState::Done);
        outcome
    }
}

/// Drives the search, pick, and share dialogs for one file.
#[derive(Debug, Clone)]
pub struct ShareWorkflow {
    ctx: PanelContext,
}

impl ShareWorkflow {
    /// Creates a new share workflow.
    pub fn new(ctx: PanelContext) -> Self {
        Self { ctx }
    }

    /// Run the workflow for the file id exactly as it was rendered.
    pub async fn run(&self, raw_id: &str) -> ShareOutcome {
        let mut run = Run {
            state: ShareState::Idle,
            raw_id: raw_id.to_string(),
        };

        run.advance(ShareState::ValidateTarget);
        let Some(file_id) = parse_target(raw_id) else {
            warn!(raw_file_id = %raw_id, "Invalid file id for sharing");
            self.ctx
                .show(
                    Alert::new(
                        AlertLevel::Error,
                        self.ctx.text(Message::InvalidFileTitle),
                        self.ctx.text(Message::InvalidFileText),
                    )
                    .with_footer(format!(
                        "{}: {raw_id}",
                        self.ctx.text(Message::ReceivedFileId)
                    )),
                )
                .await;
            return run.finish(ShareOutcome::InvalidTarget);
        };

        run.advance(ShareState::SearchPrompt);
        let query = self
            .ctx
            .dialogs
            .prompt_text(TextPrompt {
                title: self.ctx.text(Message::ShareTitle).to_string(),
                label: self.ctx.text(Message::SearchLabel).to_string(),
                placeholder: self.ctx.text(Message::SearchPlaceholder).to_string(),
                required_message: Some(self.ctx.text(Message::SearchRequired).to_string()),
            })
            .await;
        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            return run.finish(ShareOutcome::Cancelled);
        };

        run.advance(ShareState::Searching);
        let users = match self.ctx.api.search_users(query.trim()).await {
            Ok(users) => users,
            Err(e) => {
                error!(error = %e, "User search failed");
                self.ctx
                    .alert(
                        AlertLevel::Error,
                        Message::SearchFailedTitle,
                        self.ctx.text(Message::SearchFailedText),
                    )
                    .await;
                return run.finish(ShareOutcome::Failed);
            }
        };
        if users.is_empty() {
            self.ctx
                .alert(
                    AlertLevel::Info,
                    Message::NoUsersFoundTitle,
                    self.ctx.text(Message::NoUsersFoundText),
                )
                .await;
            return run.finish(ShareOutcome::NoUsersFound);
        }

        run.advance(ShareState::ResolveTarget);
        let recipients = if let [only] = users.as_slice() {
            vec![only.id]
        } else {
            run.advance(ShareState::RecipientSelection);
            match self.pick_recipients(&users).await {
                Some(picked) if !picked.is_empty() => picked,
                _ => return run.finish(ShareOutcome::Cancelled),
            }
        };

        run.advance(ShareState::Sharing);
        let outcome = self.share(file_id, &recipients).await;
        run.finish(outcome)
    }

    async fn pick_recipients(&self, users: &[UserMatch]) -> Option<Vec<UserId>> {
        let picker = render::recipient_picker(users);
        let options: Vec<String> = picker.child_elements().map(|l| l.text_content()).collect();

        let picked = self
            .ctx
            .dialogs
            .choose_many(self.ctx.text(Message::SelectRecipients), &options)
            .await?;
        Some(
            picked
                .into_iter()
                .filter_map(|i| users.get(i).map(|u| u.id))
                .collect(),
        )
    }

    async fn share(&self, file_id: FileId, recipients: &[UserId]) -> ShareOutcome {
        match self.ctx.api.share_file(file_id, recipients).await {
            Ok(body) => {
                info!(
                    file_id = %file_id,
                    recipients = recipients.len(),
                    "Share workflow completed"
                );
                self.ctx
                    .alert(
                        AlertLevel::Success,
                        Message::ShareSucceededTitle,
                        body.message
                            .filter(|m| !m.is_empty())
                            .unwrap_or_else(|| self.ctx.text(Message::ShareSucceeded).to_string()),
                    )
                    .await;
                ShareOutcome::Shared(body.shared_files)
            }
            Err(e) => {
                error!(file_id = %file_id, error = %e, "Share request failed");
                let detail = match &e {
                    ClientError::MissingCsrfToken => self.ctx.text(Message::CsrfMissing).to_string(),
                    ClientError::Rejected { body, .. } if !body.raw.is_empty() => body.raw.clone(),
                    _ => self.ctx.text(Message::ShareFailedText).to_string(),
                };
                self.ctx
                    .alert(AlertLevel::Error, Message::ShareFailedTitle, detail)
                    .await;
                ShareOutcome::Failed
            }
        }
    }
}

/// A share target must be present and numeric.
fn parse_target(raw: &str) -> Option<FileId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
