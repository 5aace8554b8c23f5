//! CLI command definitions and dispatch.

pub mod editor;
pub mod files;
pub mod quota;
pub mod shared;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::warn;

use crate::output::OutputFormat;
use cloudpanel_client::HttpCloudApi;
use cloudpanel_core::config::AppConfig;
use cloudpanel_core::error::AppError;
use cloudpanel_service::{CloudPanel, DirectorySink, PanelContext};
use cloudpanel_view::{MemoryView, TerminalDialogs};

/// CloudPanel: cloud storage from the command line
#[derive(Debug, Parser)]
#[command(name = "cloudpanel-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Owned files
    Files(files::FilesArgs),
    /// Files shared with you
    Shared(shared::SharedArgs),
    /// Storage usage
    Quota,
    /// Code editor documents
    Editor(editor::EditorArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Files(args) => files::execute(args, &self.config, self.format).await,
            Commands::Shared(args) => shared::execute(args, &self.config, self.format).await,
            Commands::Quota => quota::execute(&self.config, self.format).await,
            Commands::Editor(args) => editor::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, with `CLOUDPANEL_ENV` as overlay
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("CLOUDPANEL_ENV").ok();
    AppConfig::load(config_path, env.as_deref())
}

/// Helper: connect a panel to the configured server
///
/// Downloads go to `download_dir` when given, else to the configured
/// directory. Rendering is kept in memory; commands print their own output.
pub async fn open_panel(
    config_path: &str,
    download_dir: Option<PathBuf>,
) -> Result<CloudPanel, AppError> {
    let config = load_config(config_path)?;
    let api = HttpCloudApi::new(&config.server)?;

    match api.bootstrap_csrf().await {
        Ok(true) => {}
        Ok(false) => warn!("No CSRF token available; mutating commands will be refused"),
        Err(e) => warn!(error = %e, "Failed to fetch CSRF token"),
    }

    let ctx = PanelContext::new(
        Arc::new(api),
        Arc::new(MemoryView::new()),
        Arc::new(TerminalDialogs::new()),
        &config.display,
    );
    let directory = download_dir.unwrap_or_else(|| PathBuf::from(&config.downloads.directory));
    Ok(CloudPanel::new(ctx, Arc::new(DirectorySink::new(directory))))
}
