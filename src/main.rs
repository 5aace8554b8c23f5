//! CloudPanel: interactive cloud storage session
//!
//! Loads the file list, the shared-with-me list, and the quota, then offers
//! every rendered action in a menu until the user quits.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use dialoguer::{Input, Select};
use tracing_subscriber::{EnvFilter, fmt};

use cloudpanel_client::{HttpCloudApi, UploadFile};
use cloudpanel_core::config::AppConfig;
use cloudpanel_core::error::AppError;
use cloudpanel_service::{CloudPanel, DirectorySink, PanelContext};
use cloudpanel_view::{TerminalDialogs, TerminalView};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Session error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("CLOUDPANEL_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    let env = std::env::var("CLOUDPANEL_ENV").unwrap_or_else(|_| "development".to_string());

    AppConfig::load(&config_path, Some(&env))
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// A menu entry.
enum Choice {
    Bound(usize),
    Upload,
    Refresh,
    Quit,
}

/// Main session loop
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!(
        "Starting CloudPanel v{} against {}",
        env!("CARGO_PKG_VERSION"),
        config.server.base_url
    );

    let api = HttpCloudApi::new(&config.server)?;
    match api.bootstrap_csrf().await {
        Ok(true) => tracing::debug!("CSRF token ready"),
        Ok(false) => tracing::warn!("No CSRF token found; changes will be refused"),
        Err(e) => tracing::warn!(error = %e, "Failed to fetch CSRF token"),
    }

    let ctx = PanelContext::new(
        Arc::new(api),
        Arc::new(TerminalView::new()),
        Arc::new(TerminalDialogs::new()),
        &config.display,
    );
    let sink = DirectorySink::new(PathBuf::from(&config.downloads.directory));
    let panel = CloudPanel::new(ctx, Arc::new(sink));

    panel.load().await;

    loop {
        let bindings = panel.bindings().await;
        let mut items: Vec<String> = bindings.iter().map(|b| b.label.clone()).collect();
        items.extend(["Upload a file", "Refresh", "Quit"].map(String::from));

        let choice = match select(items).await? {
            Some(i) if i < bindings.len() => Choice::Bound(i),
            Some(i) if i == bindings.len() => Choice::Upload,
            Some(i) if i == bindings.len() + 1 => Choice::Refresh,
            _ => Choice::Quit,
        };

        // Failures were already reported through the dialogs.
        match choice {
            Choice::Bound(i) => {
                let _ = panel.dispatch(&bindings[i]).await;
            }
            Choice::Upload => match pick_upload().await {
                Ok(selection) => {
                    let _ = panel.upload(selection).await;
                }
                Err(e) => tracing::error!(error = %e, "Could not read upload"),
            },
            Choice::Refresh => panel.load().await,
            Choice::Quit => break,
        }
    }

    tracing::info!("Session ended");
    Ok(())
}

async fn select(items: Vec<String>) -> Result<Option<usize>, AppError> {
    tokio::task::spawn_blocking(move || {
        Select::new()
            .with_prompt("Choose an action")
            .items(&items)
            .default(0)
            .interact_opt()
    })
    .await
    .map_err(|e| AppError::internal(format!("Menu task failed: {e}")))?
    .map_err(|e| AppError::internal(format!("Menu failed: {e}")))
}

/// Ask for a local path; an empty answer means nothing was selected.
async fn pick_upload() -> Result<Option<UploadFile>, AppError> {
    let path: String = tokio::task::spawn_blocking(|| {
        Input::<String>::new()
            .with_prompt("File to upload")
            .allow_empty(true)
            .interact_text()
    })
    .await
    .map_err(|e| AppError::internal(format!("Prompt task failed: {e}")))?
    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;

    let path = path.trim();
    if path.is_empty() {
        return Ok(None);
    }

    let path = Path::new(path);
    let content = tokio::fs::read(path).await.map_err(|e| {
        AppError::not_found(format!("Failed to read {}: {e}", path.display()))
    })?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();
    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .to_string();

    Ok(Some(UploadFile {
        file_name,
        mime_type,
        content: Bytes::from(content),
    }))
}
