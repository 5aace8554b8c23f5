//! Terminal surfaces: tables via `tabled`, dialogs via `dialoguer`.

use std::collections::HashMap;

use async_trait::async_trait;
use dialoguer::{Input, MultiSelect};
use tabled::builder::Builder;
use tokio::sync::Mutex;
use tracing::warn;

use crate::bindings::{FILE_ID_ATTR, SHARE_ID_ATTR};
use crate::element::Element;
use crate::surface::{Alert, AlertLevel, Dialogs, Region, TextPrompt, View};

/// Column headers per region; action cells are not printed.
fn headers(region: Region) -> &'static [&'static str] {
    match region {
        Region::FileList => &["Name", "Size", "Type"],
        Region::SharedList => &["File", "Sender", "Shared At", "Status"],
        Region::Quota => &[],
    }
}

/// Text table for a rendered region.
///
/// Rows are the `tr` elements of the tree; cells holding buttons are left out.
/// Trees without rows (empty states, the quota bar) print as plain text.
pub fn format_region(region: Region, root: &Element) -> String {
    let rows: Vec<&Element> = root
        .descendants()
        .into_iter()
        .filter(|el| el.tag() == "tr")
        .collect();

    if rows.is_empty() {
        return root.text_content();
    }

    let mut builder = Builder::default();
    builder.push_record(headers(region).iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(
            row.child_elements()
                .filter(|cell| cell.tag() == "td")
                .filter(|cell| {
                    !cell
                        .descendants()
                        .iter()
                        .any(|el| el.tag() == "button")
                })
                .map(Element::text_content),
        );
    }
    builder.build().to_string()
}

/// A [`View`] that prints every re-render to stdout.
#[derive(Debug, Default)]
pub struct TerminalView {
    last: Mutex<HashMap<Region, Element>>,
}

impl TerminalView {
    /// Create a terminal view.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl View for TerminalView {
    async fn replace(&self, region: Region, content: Element) {
        println!("{}", format_region(region, &content));
        self.last.lock().await.insert(region, content);
    }

    async fn remove_row(&self, region: Region, key: &str) -> bool {
        let mut last = self.last.lock().await;
        let Some(root) = last.get_mut(&region) else {
            return false;
        };
        root.remove_children_where(|row| {
            row.get_attr(FILE_ID_ATTR) == Some(key) || row.get_attr(SHARE_ID_ATTR) == Some(key)
        }) > 0
    }

    async fn notice(&self, _region: Region, notice: Option<Element>) {
        if let Some(notice) = notice {
            println!("⚠ {}", notice.text_content());
        }
    }
}

/// [`Dialogs`] backed by interactive terminal prompts.
///
/// Prompts run on the blocking pool; any prompt error counts as a cancel.
#[derive(Debug, Default)]
pub struct TerminalDialogs;

impl TerminalDialogs {
    /// Create terminal dialogs.
    pub fn new() -> Self {
        Self
    }
}

fn symbol(level: AlertLevel) -> &'static str {
    match level {
        AlertLevel::Success => "✓",
        AlertLevel::Info => "ℹ",
        AlertLevel::Warning => "⚠",
        AlertLevel::Error => "✗",
    }
}

#[async_trait]
impl Dialogs for TerminalDialogs {
    async fn alert(&self, alert: Alert) {
        let line = format!("{} {}: {}", symbol(alert.level), alert.title, alert.text);
        if alert.level == AlertLevel::Error {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
        if let Some(footer) = alert.footer {
            println!("  {footer}");
        }
    }

    async fn prompt_text(&self, prompt: TextPrompt) -> Option<String> {
        let result = tokio::task::spawn_blocking(move || {
            println!("{}", prompt.title);
            let required = prompt.required_message.clone();
            Input::<String>::new()
                .with_prompt(format!("{} [{}]", prompt.label, prompt.placeholder))
                .allow_empty(true)
                .validate_with(move |input: &String| -> Result<(), String> {
                    match &required {
                        Some(message) if input.trim().is_empty() => Err(message.clone()),
                        _ => Ok(()),
                    }
                })
                .interact_text()
        })
        .await;

        match result {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                warn!(error = %e, "Text prompt aborted");
                None
            }
            Err(e) => {
                warn!(error = %e, "Text prompt task failed");
                None
            }
        }
    }

    async fn choose_many(&self, title: &str, options: &[String]) -> Option<Vec<usize>> {
        let title = title.to_string();
        let options = options.to_vec();
        let result = tokio::task::spawn_blocking(move || {
            MultiSelect::new()
                .with_prompt(title)
                .items(&options)
                .interact_opt()
        })
        .await;

        match result {
            Ok(Ok(choice)) => choice,
            Ok(Err(e)) => {
                warn!(error = %e, "Selection aborted");
                None
            }
            Err(e) => {
                warn!(error = %e, "Selection task failed");
                None
            }
        }
    }
}
