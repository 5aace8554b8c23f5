//! Storage quota value objects.

use serde::{Deserialize, Serialize};

const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Body of `GET /cloud/storage-info`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StorageInfo {
    /// Bytes currently used.
    #[serde(default)]
    pub used_storage: u64,
    /// Total quota in bytes.
    #[serde(default)]
    pub total_storage: u64,
    /// Server-computed usage percentage.
    #[serde(default)]
    pub percent_used: Option<f64>,
    /// Number of stored files.
    #[serde(default)]
    pub total_files: Option<u64>,
}

/// Quota derived from the latest storage-info response. No history is kept.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuotaInfo {
    /// Bytes currently used.
    pub used_bytes: u64,
    /// Total quota in bytes.
    pub total_bytes: u64,
    /// Usage percentage as reported by the server, zero when absent.
    pub percent_used: f64,
}

impl From<&StorageInfo> for QuotaInfo {
    fn from(info: &StorageInfo) -> Self {
        Self {
            used_bytes: info.used_storage,
            total_bytes: info.total_storage,
            percent_used: info
                .percent_used
                .filter(|p| p.is_finite())
                .unwrap_or(0.0),
        }
    }
}

/// What the quota display shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum QuotaView {
    /// Usage from a successful fetch.
    Known(QuotaInfo),
    /// The fetch failed; show a zero baseline against the configured total.
    Unavailable {
        /// Total shown in the fallback label.
        total_gb: u64,
    },
}

impl QuotaView {
    /// Percentage driving the bar width.
    pub fn percent(&self) -> f64 {
        match self {
            Self::Known(info) => info.percent_used,
            Self::Unavailable { .. } => 0.0,
        }
    }

    /// Percentage as shown in the bar, e.g. `"12.5%"` or `"0%"`.
    pub fn percent_label(&self) -> String {
        format!("{}%", self.percent())
    }

    /// `used / total GB used`, used with two decimals and total with none.
    pub fn usage_label(&self) -> String {
        match self {
            Self::Known(info) => format!(
                "{:.2} / {:.0} GB used",
                info.used_bytes as f64 / GIB,
                info.total_bytes as f64 / GIB
            ),
            Self::Unavailable { total_gb } => format!("0 / {total_gb} GB used"),
        }
    }
}
