//! # cloudpanel-service
//!
//! Panel controllers. Each service performs one flow against the
//! [`CloudApi`](cloudpanel_client::CloudApi), renders the result into the
//! [`View`](cloudpanel_view::View), and reports through
//! [`Dialogs`](cloudpanel_view::Dialogs). [`CloudPanel`] ties them together
//! and runs the refresh cascades that follow every mutation.

pub mod context;
pub mod editor;
pub mod file;
pub mod panel;
pub mod sequencer;
pub mod share;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use context::PanelContext;
pub use editor::EditorService;
pub use file::{DirectorySink, DownloadSink, FileActionService, FileListService};
pub use panel::{CloudPanel, Refresh};
pub use sequencer::{RefreshSequencer, Ticket};
pub use share::{SharedInboxService, ShareOutcome, ShareState, ShareWorkflow};
pub use storage::QuotaService;
