//! User search results.

use serde::{Deserialize, Serialize};

use cloudpanel_core::types::UserId;

/// A candidate recipient returned by the user search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMatch {
    /// User id sent back in `recipient_ids`.
    pub id: UserId,
    /// Username.
    pub username: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

impl UserMatch {
    /// Picker label, `username (email)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.username, self.email)
    }
}
