//! Client-side failure taxonomy.
//!
//! Three classes matter to callers: failures caught before anything was
//! sent ([`ClientError::MissingCsrfToken`], [`ClientError::InvalidUrl`]),
//! transport failures ([`ClientError::Transport`]), and server rejections
//! ([`ClientError::Rejected`]) whose JSON body is kept for message selection.

use serde_json::Value;
use thiserror::Error;

use cloudpanel_core::error::{AppError, ErrorKind};

/// Parsed error body of a non-success response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorBody {
    /// `error` field.
    pub error: Option<String>,
    /// `details` field.
    pub details: Option<String>,
    /// `message` field.
    pub message: Option<String>,
    /// `active_shares` marker on delete refusals.
    pub active_shares: bool,
    /// Whether the body parsed as JSON at all.
    pub is_json: bool,
    /// The body exactly as received.
    pub raw: String,
}

impl ErrorBody {
    /// Parse a response body; non-JSON bodies keep only `raw`.
    pub fn parse(raw: String) -> Self {
        let Ok(value) = serde_json::from_str::<Value>(&raw) else {
            return Self {
                raw,
                ..Default::default()
            };
        };

        let text = |key: &str| {
            value
                .get(key)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        Self {
            error: text("error"),
            details: text("details"),
            message: text("message"),
            active_shares: value.get("active_shares").is_some_and(|v| match v {
                Value::Bool(b) => *b,
                Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
                Value::Array(items) => !items.is_empty(),
                Value::Null => false,
                _ => true,
            }),
            is_json: true,
            raw,
        }
    }

    fn summary(&self) -> &str {
        self.error
            .as_deref()
            .or(self.message.as_deref())
            .unwrap_or(&self.raw)
    }
}

/// Errors returned by [`CloudApi`](crate::CloudApi) implementations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A mutating call needs an anti-forgery token and none is known.
    #[error("CSRF token is missing")]
    MissingCsrfToken,

    /// The request URL could not be built.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),

    /// The request never completed.
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("Server rejected request ({status}): {}", .body.summary())]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Parsed response body.
        body: ErrorBody,
    },

    /// A success response carried an unexpected body.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// A success status whose body reports `success: false`.
    #[error("{0}")]
    Unsuccessful(String),
}

impl ClientError {
    /// Whether the request never completed.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether the server refused a delete because the file is still shared.
    pub fn blocked_by_shares(&self) -> bool {
        matches!(self, Self::Rejected { body, .. } if body.active_shares)
    }

    /// The `error` field of a rejection body.
    pub fn server_error(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } => body.error.as_deref(),
            Self::Unsuccessful(text) => Some(text),
            _ => None,
        }
    }

    /// The parsed rejection body, if any.
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Rejected { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if err.is_builder() {
            Self::InvalidUrl(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let kind = match &err {
            ClientError::MissingCsrfToken | ClientError::InvalidUrl(_) => ErrorKind::Precondition,
            ClientError::Transport(_) => ErrorKind::Network,
            ClientError::Rejected { body, .. } if body.active_shares => ErrorKind::Conflict,
            ClientError::Rejected { status: 404, .. } => ErrorKind::NotFound,
            ClientError::Rejected { .. } | ClientError::Unsuccessful(_) => ErrorKind::Rejected,
            ClientError::Decode(_) => ErrorKind::Serialization,
        };
        let message = err.to_string();
        AppError::with_source(kind, message, err)
    }
}
