//! Shared-with-me commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use cloudpanel_core::error::AppError;
use cloudpanel_core::types::ShareId;
use cloudpanel_entity::ShareRecord;
use cloudpanel_entity::file::UNNAMED_FILE;
use cloudpanel_view::render::{UNKNOWN_DATE, UNKNOWN_SENDER, UNKNOWN_STATUS};

/// Arguments for shared-file commands
#[derive(Debug, Args)]
pub struct SharedArgs {
    /// Shared-file subcommand
    #[command(subcommand)]
    pub command: SharedCommand,
}

/// Shared-file subcommands
#[derive(Debug, Subcommand)]
pub enum SharedCommand {
    /// List files shared with you
    List,
    /// Accept a share into your storage
    Accept {
        /// Share ID
        id: ShareId,
    },
    /// Reject a share
    Reject {
        /// Share ID
        id: ShareId,
    },
}

/// Share display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ShareRow {
    /// Share ID
    id: i64,
    /// File name
    file: String,
    /// Sender
    sender: String,
    /// Shared at
    shared_at: String,
    /// Status
    status: String,
}

impl From<&ShareRecord> for ShareRow {
    fn from(share: &ShareRecord) -> Self {
        Self {
            id: share.id.get(),
            file: share.file_name.clone().unwrap_or_else(|| UNNAMED_FILE.into()),
            sender: share
                .sender_username
                .clone()
                .unwrap_or_else(|| UNKNOWN_SENDER.into()),
            shared_at: share.shared_at_local().unwrap_or_else(|| UNKNOWN_DATE.into()),
            status: share.status.clone().unwrap_or_else(|| UNKNOWN_STATUS.into()),
        }
    }
}

/// Execute shared-file commands
pub async fn execute(
    args: &SharedArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let panel = super::open_panel(config_path, None).await?;

    match &args.command {
        SharedCommand::List => {
            let shares = panel.inbox().refresh().await?;
            let rows: Vec<ShareRow> = shares.iter().map(ShareRow::from).collect();
            output::print_list(&rows, format, "No files have been shared with you.");
        }
        SharedCommand::Accept { id } => panel.accept(*id).await?,
        SharedCommand::Reject { id } => panel.reject(*id).await?,
    }

    Ok(())
}
