//! The surfaces the panel renders into and prompts through.

use std::fmt;

use async_trait::async_trait;

use crate::element::Element;

/// An independently refreshed part of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    /// Owned files table.
    FileList,
    /// Shared-with-me table.
    SharedList,
    /// Storage quota bar.
    Quota,
}

impl Region {
    /// Stable name used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FileList => "file_list",
            Self::SharedList => "shared_list",
            Self::Quota => "quota",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of an alert dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    /// Operation completed.
    Success,
    /// Neutral information.
    Info,
    /// Refused, with a hint what to do.
    Warning,
    /// Operation failed.
    Error,
}

/// A modal message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    /// Severity.
    pub level: AlertLevel,
    /// Heading.
    pub title: String,
    /// Body text.
    pub text: String,
    /// Optional diagnostic line under the body.
    pub footer: Option<String>,
}

impl Alert {
    /// Create an alert without footer.
    pub fn new(level: AlertLevel, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            text: text.into(),
            footer: None,
        }
    }

    /// Attach a footer line.
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }
}

/// A single-line text prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPrompt {
    /// Dialog heading.
    pub title: String,
    /// Input label.
    pub label: String,
    /// Placeholder shown in the empty field.
    pub placeholder: String,
    /// When set, blank input is refused inline with this message and the
    /// prompt stays open.
    pub required_message: Option<String>,
}

/// Where rendered element trees go.
#[async_trait]
pub trait View: Send + Sync + fmt::Debug + 'static {
    /// Replace the whole content of `region`.
    async fn replace(&self, region: Region, content: Element);

    /// Remove the row identified by `key` from `region`. Returns whether a
    /// row was removed.
    async fn remove_row(&self, region: Region, key: &str) -> bool;

    /// Show or clear a status notice next to `region` without touching its
    /// content.
    async fn notice(&self, region: Region, notice: Option<Element>);
}

/// Modal interaction with the user.
#[async_trait]
pub trait Dialogs: Send + Sync + fmt::Debug + 'static {
    /// Show a message and wait until it is dismissed.
    async fn alert(&self, alert: Alert);

    /// Ask for one line of text. `None` means the user cancelled.
    async fn prompt_text(&self, prompt: TextPrompt) -> Option<String>;

    /// Let the user tick any number of `options`. `None` means the user
    /// cancelled; an empty selection is returned as `Some(vec![])`.
    async fn choose_many(&self, title: &str, options: &[String]) -> Option<Vec<usize>>;
}
