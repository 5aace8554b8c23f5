//! Owned file commands.

use std::path::PathBuf;

use bytes::Bytes;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{self, OutputFormat};
use cloudpanel_client::UploadFile;
use cloudpanel_core::error::AppError;
use cloudpanel_core::types::FileId;
use cloudpanel_entity::FileRecord;
use cloudpanel_service::ShareOutcome;

/// Arguments for file commands
#[derive(Debug, Args)]
pub struct FilesArgs {
    /// File subcommand
    #[command(subcommand)]
    pub command: FilesCommand,
}

/// File subcommands
#[derive(Debug, Subcommand)]
pub enum FilesCommand {
    /// List your files
    List,
    /// Upload a local file
    Upload {
        /// Path to the file to upload
        path: PathBuf,
        /// Override file name
        #[arg(short, long)]
        name: Option<String>,
    },
    /// Delete a file
    Delete {
        /// File ID
        id: FileId,
    },
    /// Download a file
    Download {
        /// File ID
        id: FileId,
        /// Directory to save into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Share a file with other users
    Share {
        /// File ID
        id: String,
    },
}

/// File display row for table output
#[derive(Debug, Serialize, Tabled)]
struct FileRow {
    /// File ID
    id: String,
    /// File name
    name: String,
    /// Size
    size: String,
    /// MIME type
    #[tabled(rename = "type")]
    file_type: String,
    /// Editable in the code editor
    editable: bool,
}

impl From<&FileRecord> for FileRow {
    fn from(file: &FileRecord) -> Self {
        Self {
            id: file.raw_id.clone(),
            name: file.filename.clone(),
            size: file.size_label(),
            file_type: file.file_type.clone(),
            editable: file.editable,
        }
    }
}

/// Execute file commands
pub async fn execute(
    args: &FilesArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let download_dir = match &args.command {
        FilesCommand::Download { output, .. } => output.clone(),
        _ => None,
    };
    let panel = super::open_panel(config_path, download_dir).await?;

    match &args.command {
        FilesCommand::List => {
            let files = panel.files().refresh().await?;
            let rows: Vec<FileRow> = files.iter().map(FileRow::from).collect();
            output::print_list(&rows, format, "No files uploaded yet.");
        }
        FilesCommand::Upload { path, name } => {
            let file_name = name.clone().unwrap_or_else(|| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("upload")
                    .to_string()
            });
            let content = tokio::fs::read(path).await.map_err(|e| {
                AppError::not_found(format!("Failed to read {}: {e}", path.display()))
            })?;
            let mime_type = mime_guess::from_path(&file_name)
                .first_or_octet_stream()
                .to_string();

            let receipt = panel
                .upload(Some(UploadFile {
                    file_name,
                    mime_type,
                    content: Bytes::from(content),
                }))
                .await?;
            if format == OutputFormat::Json {
                output::print_json(&receipt);
            }
        }
        FilesCommand::Delete { id } => panel.delete(*id).await?,
        FilesCommand::Download { id, .. } => {
            let path = panel.download(*id).await?;
            if format == OutputFormat::Json {
                output::print_json(&serde_json::json!({ "path": path }));
            }
        }
        FilesCommand::Share { id } => match panel.share(id).await {
            ShareOutcome::Shared(created) => {
                if format == OutputFormat::Json {
                    output::print_json(&created);
                }
            }
            ShareOutcome::Cancelled => output::print_warning("Share cancelled"),
            ShareOutcome::NoUsersFound => {}
            ShareOutcome::InvalidTarget | ShareOutcome::Failed => {
                return Err(AppError::rejected("File was not shared"));
            }
        },
    }

    Ok(())
}
