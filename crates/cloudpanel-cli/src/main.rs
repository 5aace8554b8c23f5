//! CloudPanel CLI entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

use cloudpanel_core::config::logging::LoggingConfig;

mod commands;
mod output;

use commands::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(&logging_config(&cli.config));

    if let Err(e) = cli.execute().await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}

/// Logging section of the selected config file.
///
/// An unreadable file falls back to defaults here; the command itself
/// reports the load error.
fn logging_config(config_path: &str) -> LoggingConfig {
    commands::load_config(config_path)
        .map(|config| config.logging)
        .unwrap_or_default()
}

/// Initialize the tracing subscriber on stderr, keeping stdout for output.
fn init_logging(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}
