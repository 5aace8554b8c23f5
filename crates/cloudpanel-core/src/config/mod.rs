//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every section has defaults so an empty file is valid.

pub mod display;
pub mod logging;
pub mod server;

use serde::{Deserialize, Serialize};

use self::display::{DisplayConfig, DownloadConfig};
use self::logging::LoggingConfig;
use self::server::ServerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// Deserialization target for the merged configuration sources
/// (base file, optional environment overlay, `CLOUDPANEL__*` variables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Remote server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Presentation settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Where downloaded files are written.
    #[serde(default)]
    pub downloads: DownloadConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// Merges `path`, then `config/{env}` when an environment name is given,
    /// then environment variables prefixed with `CLOUDPANEL__`
    /// (e.g. `CLOUDPANEL__SERVER__BASE_URL`). Missing files are skipped.
    pub fn load(path: &str, env: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(path).required(false));

        if let Some(env) = env {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("CLOUDPANEL")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
