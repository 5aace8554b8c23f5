//! Presentation and download settings.

use serde::{Deserialize, Serialize};

use crate::i18n::Locale;

/// How results are presented to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Language of alerts and dialogs.
    #[serde(default)]
    pub locale: Locale,
    /// Total shown by the quota fallback when storage info is unavailable.
    #[serde(default = "default_fallback_total_gb")]
    pub fallback_total_gb: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            fallback_total_gb: default_fallback_total_gb(),
        }
    }
}

/// Download destination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory downloaded files are saved into.
    #[serde(default = "default_directory")]
    pub directory: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_fallback_total_gb() -> u64 {
    5
}

fn default_directory() -> String {
    "downloads".to_string()
}
