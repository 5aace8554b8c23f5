//! Remote server configuration.

use serde::{Deserialize, Serialize};

/// Connection settings for the cloud-storage server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL every request path is joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Static anti-forgery token. When absent the token is scraped from
    /// [`csrf_page`](Self::csrf_page).
    #[serde(default)]
    pub csrf_token: Option<String>,
    /// Page carrying `<meta name="csrf-token">`.
    #[serde(default = "default_csrf_page")]
    pub csrf_page: String,
    /// Request timeout in seconds. `None` keeps the transport default.
    #[serde(default)]
    pub request_timeout_seconds: Option<u64>,
    /// Raw `Cookie` header value for an already-authenticated session.
    #[serde(default)]
    pub session_cookie: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            csrf_token: None,
            csrf_page: default_csrf_page(),
            request_timeout_seconds: None,
            session_cookie: None,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_csrf_page() -> String {
    "/cloud".to_string()
}
