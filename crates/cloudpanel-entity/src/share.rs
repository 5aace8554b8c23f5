//! Inbound and outbound share view-models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cloudpanel_core::error::{AppError, ErrorKind};
use cloudpanel_core::types::{FileId, ShareId, UserId};

use crate::coalesce::{coalesce_i64, coalesce_string, coalesce_u64, is_truthy};

/// Lifecycle state of a share. Transitions are decided by the server only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShareStatus {
    /// Waiting for the recipient to accept or reject.
    Pending,
    /// Accepted; the recipient now owns a copy.
    Accepted,
    /// Rejected by the recipient.
    Rejected,
}

impl fmt::Display for ShareStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Accepted => write!(f, "accepted"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ShareStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(AppError::validation(format!("Unknown share status: {other}"))),
        }
    }
}

/// One row of the shared-with-me table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRecord {
    /// Share identifier, target of accept/reject.
    pub id: ShareId,
    /// Name of the shared file.
    pub file_name: Option<String>,
    /// Username of the sender.
    pub sender_username: Option<String>,
    /// When the share was created.
    pub shared_at: Option<DateTime<Utc>>,
    /// Status string as sent by the server.
    pub status: Option<String>,
    /// Content type of the shared file.
    pub file_type: Option<String>,
    /// Size of the shared file in bytes.
    pub file_size: Option<u64>,
}

/// An inbound entry that was not rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedShare {
    /// Why the entry was skipped.
    pub reason: String,
    /// The entry as received.
    pub raw: Value,
}

impl ShareRecord {
    /// Build a record from one inbound entry.
    ///
    /// Entries carrying an inline `error` marker, or lacking a usable id,
    /// are returned as [`SkippedShare`] instead.
    pub fn from_value(entry: &Value) -> Result<Self, SkippedShare> {
        if let Some(marker) = entry.get("error").filter(|v| is_truthy(v)) {
            return Err(SkippedShare {
                reason: marker
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| marker.to_string()),
                raw: entry.clone(),
            });
        }

        let Some(id) = coalesce_i64(entry, &["id"]) else {
            return Err(SkippedShare {
                reason: "missing share id".to_string(),
                raw: entry.clone(),
            });
        };

        Ok(Self {
            id: ShareId(id),
            file_name: coalesce_string(entry, &["file_name", "filename"]),
            sender_username: coalesce_string(entry, &["sender_username"]),
            shared_at: coalesce_string(entry, &["shared_at"]).and_then(|s| parse_timestamp(&s)),
            status: coalesce_string(entry, &["status"]),
            file_type: coalesce_string(entry, &["file_type"]),
            file_size: coalesce_u64(entry, &["file_size"]),
        })
    }

    /// Split a `/cloud/files/shared` response into renderable and skipped entries.
    pub fn list_from_value(body: Value) -> Result<(Vec<Self>, Vec<SkippedShare>), AppError> {
        let items = match body {
            Value::Array(items) => items,
            Value::Null => Vec::new(),
            other => {
                return Err(AppError::new(
                    ErrorKind::Serialization,
                    format!("Expected an array of shared files, got: {other}"),
                ));
            }
        };

        let mut records = Vec::with_capacity(items.len());
        let mut skipped = Vec::new();
        for item in &items {
            match Self::from_value(item) {
                Ok(record) => records.push(record),
                Err(skip) => skipped.push(skip),
            }
        }
        Ok((records, skipped))
    }

    /// Typed status, `None` when absent or unrecognized.
    pub fn state(&self) -> Option<ShareStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Share time in the local timezone.
    pub fn shared_at_local(&self) -> Option<String> {
        self.shared_at.map(|t| {
            t.with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
        })
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(raw) {
        return Some(t.with_timezone(&Utc));
    }
    raw.parse::<NaiveDateTime>().ok().map(|t| t.and_utc())
}

/// A share entry created by a share request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreatedShare {
    /// Share id; the server may omit it before commit.
    #[serde(default)]
    pub id: Option<ShareId>,
    /// The file that was shared.
    #[serde(default)]
    pub original_file_id: Option<FileId>,
    /// Recipient of this entry.
    #[serde(default)]
    pub recipient_id: Option<UserId>,
    /// Status string.
    #[serde(default)]
    pub status: Option<String>,
}

/// Success body of `POST /cloud/files/{id}/share`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ShareOutcomeBody {
    /// Server confirmation text.
    #[serde(default)]
    pub message: Option<String>,
    /// Entries created, one per new recipient.
    #[serde(default)]
    pub shared_files: Vec<CreatedShare>,
}
