//! Anti-forgery token handling.
//!
//! The server embeds its token in the page as
//! `<meta name="csrf-token" content="...">` and expects it back in the
//! `X-CSRFToken` header on mutating requests.

use std::sync::{Arc, RwLock};

/// Header the token is sent in.
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Shared holder for the current anti-forgery token.
#[derive(Debug, Clone, Default)]
pub struct CsrfStore {
    token: Arc<RwLock<Option<String>>>,
}

impl CsrfStore {
    /// Create a store, optionally seeded with a token.
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token.filter(|t| !t.is_empty()))),
        }
    }

    /// The current token, if any.
    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace the current token. Empty strings clear it.
    pub fn set(&self, token: Option<String>) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = token.filter(|t| !t.is_empty());
    }

    /// Whether a token is known.
    pub fn is_set(&self) -> bool {
        self.get().is_some()
    }
}

/// Extract the `content` of the first `<meta name="csrf-token">` tag.
///
/// Attribute order, case, and quote style do not matter.
pub fn extract_meta_token(html: &str) -> Option<String> {
    let lower = html.to_ascii_lowercase();
    let mut offset = 0;

    while let Some(start) = lower[offset..].find("<meta") {
        let tag_start = offset + start;
        let tag_end = lower[tag_start..]
            .find('>')
            .map(|end| tag_start + end)
            .unwrap_or(html.len());
        let tag = &html[tag_start..tag_end];

        let is_csrf = attribute(tag, "name").is_some_and(|name| name.eq_ignore_ascii_case("csrf-token"));
        if is_csrf {
            return attribute(tag, "content").filter(|c| !c.is_empty());
        }
        offset = tag_end;
    }
    None
}

/// Value of `key` inside a single tag's source text.
fn attribute(tag: &str, key: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let mut search = 0;

    while let Some(found) = lower[search..].find(key) {
        let at = search + found;
        search = at + key.len();

        let preceded_by_space = at > 0
            && lower[..at]
                .chars()
                .next_back()
                .is_some_and(char::is_whitespace);
        if !preceded_by_space {
            continue;
        }

        let rest = tag[at + key.len()..].trim_start();
        let Some(rest) = rest.strip_prefix('=') else {
            continue;
        };
        let rest = rest.trim_start();

        return Some(match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => rest[1..]
                .split(quote)
                .next()
                .unwrap_or_default()
                .to_string(),
            _ => rest
                .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
                .next()
                .unwrap_or_default()
                .to_string(),
        });
    }
    None
}
