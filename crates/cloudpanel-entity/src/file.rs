//! Owned file view-model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use cloudpanel_core::error::AppError;
use cloudpanel_core::types::FileId;

use crate::coalesce::{coalesce_bool, coalesce_string, coalesce_u64};

/// Recognized keys per logical field, in precedence order.
pub mod keys {
    /// Identifier keys.
    pub const ID: &[&str] = &["id", "file_id"];
    /// Display name keys.
    pub const NAME: &[&str] = &["filename", "file_name"];
    /// Size-in-bytes keys.
    pub const SIZE: &[&str] = &["size", "file_size"];
    /// Content type keys.
    pub const TYPE: &[&str] = &["type", "file_type"];
    /// Editable flag keys.
    pub const EDITABLE: &[&str] = &["editable", "is_editable"];
}

/// Placeholder name when no name field is present.
pub const UNNAMED_FILE: &str = "Unnamed File";

/// Placeholder type when no type field is present.
pub const UNKNOWN_TYPE: &str = "Unknown";

/// One row of the owned-files table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Parsed identifier, `None` when the server sent none or a non-numeric one.
    pub id: Option<FileId>,
    /// Identifier exactly as received, empty when absent.
    pub raw_id: String,
    /// Display name.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    /// Content type.
    pub file_type: String,
    /// Whether the file can be opened in the code editor.
    pub editable: bool,
    /// Upload timestamp as sent by the server.
    pub uploaded_at: Option<String>,
}

impl FileRecord {
    /// Normalize one raw server record.
    pub fn from_value(record: &Value) -> Self {
        let raw_id = coalesce_string(record, keys::ID).unwrap_or_default();
        Self {
            id: raw_id.parse().ok(),
            raw_id,
            filename: coalesce_string(record, keys::NAME)
                .unwrap_or_else(|| UNNAMED_FILE.to_string()),
            size: coalesce_u64(record, keys::SIZE).unwrap_or(0),
            file_type: coalesce_string(record, keys::TYPE)
                .unwrap_or_else(|| UNKNOWN_TYPE.to_string()),
            editable: coalesce_bool(record, keys::EDITABLE),
            uploaded_at: coalesce_string(record, &["uploaded_at"]),
        }
    }

    /// Normalize a whole `/cloud/files` response.
    ///
    /// `null` is treated as an empty listing.
    pub fn list_from_value(body: Value) -> Result<Vec<Self>, AppError> {
        match body {
            Value::Array(items) => Ok(items.iter().map(Self::from_value).collect()),
            Value::Null => Ok(Vec::new()),
            other => Err(AppError::new(
                cloudpanel_core::error::ErrorKind::Serialization,
                format!("Expected an array of files, got: {other}"),
            )),
        }
    }

    /// Size in kibibytes with two decimals, e.g. `"1.50 KB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}
