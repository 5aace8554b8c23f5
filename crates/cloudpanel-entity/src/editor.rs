//! Code editor documents.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coalesce::coalesce_string;

/// Which store a document lives in. Passed explicitly to every editor call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentSource {
    /// Files in the user's cloud storage (`/cloud/file/*`).
    Cloud,
    /// The per-user code directory (`/cloud/code/*`).
    Code,
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cloud => write!(f, "cloud"),
            Self::Code => write!(f, "code"),
        }
    }
}

/// A document opened in or saved from the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeDocument {
    /// File name including extension.
    pub filename: String,
    /// Full text content.
    pub content: String,
    /// Editor language, e.g. `python`.
    pub language: String,
}

impl CodeDocument {
    /// Build a document from a load response.
    ///
    /// Cloud responses carry `file_type`, code responses carry `language`;
    /// both are mapped through [`language_mode`].
    pub fn from_load_body(requested_name: &str, body: &Value) -> Self {
        let filename =
            coalesce_string(body, &["filename"]).unwrap_or_else(|| requested_name.to_string());
        let hint = coalesce_string(body, &["language", "file_type"])
            .or_else(|| extension(&filename).map(str::to_string))
            .unwrap_or_default();
        Self {
            content: coalesce_string(body, &["content"]).unwrap_or_default(),
            language: language_mode(&hint).to_string(),
            filename,
        }
    }
}

/// Editor mode for a file type or extension hint.
pub fn language_mode(hint: &str) -> &'static str {
    match hint.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
        "py" | "python" => "python",
        "js" | "javascript" => "javascript",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "md" | "markdown" => "markdown",
        _ => "text",
    }
}

fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}
