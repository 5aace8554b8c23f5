//! In-memory surfaces for headless runs and tests.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::bindings::{FILE_ID_ATTR, SHARE_ID_ATTR};
use crate::element::Element;
use crate::surface::{Alert, Dialogs, Region, TextPrompt, View};

#[derive(Debug, Default)]
struct ViewState {
    content: HashMap<Region, Element>,
    notices: HashMap<Region, Element>,
    renders: HashMap<Region, usize>,
}

/// A [`View`] that keeps the latest tree per region.
#[derive(Debug, Default)]
pub struct MemoryView {
    state: Mutex<ViewState>,
}

impl MemoryView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content of `region`.
    pub async fn content(&self, region: Region) -> Option<Element> {
        self.state.lock().await.content.get(&region).cloned()
    }

    /// Current notice of `region`.
    pub async fn notice_of(&self, region: Region) -> Option<Element> {
        self.state.lock().await.notices.get(&region).cloned()
    }

    /// How many times `region` has been replaced.
    pub async fn render_count(&self, region: Region) -> usize {
        self.state
            .lock()
            .await
            .renders
            .get(&region)
            .copied()
            .unwrap_or(0)
    }

    /// HTML of `region`, empty when nothing was rendered.
    pub async fn html(&self, region: Region) -> String {
        self.content(region)
            .await
            .map(|el| el.to_html())
            .unwrap_or_default()
    }
}

#[async_trait]
impl View for MemoryView {
    async fn replace(&self, region: Region, content: Element) {
        let mut state = self.state.lock().await;
        state.content.insert(region, content);
        *state.renders.entry(region).or_insert(0) += 1;
    }

    async fn remove_row(&self, region: Region, key: &str) -> bool {
        let mut state = self.state.lock().await;
        let Some(root) = state.content.get_mut(&region) else {
            return false;
        };
        let removed = root.remove_children_where(|row| {
            row.get_attr(FILE_ID_ATTR) == Some(key) || row.get_attr(SHARE_ID_ATTR) == Some(key)
        });
        removed > 0
    }

    async fn notice(&self, region: Region, notice: Option<Element>) {
        let mut state = self.state.lock().await;
        match notice {
            Some(el) => {
                state.notices.insert(region, el);
            }
            None => {
                state.notices.remove(&region);
            }
        }
    }
}

#[derive(Debug, Default)]
struct Script {
    answers: VecDeque<Option<String>>,
    choices: VecDeque<Option<Vec<usize>>>,
    alerts: Vec<Alert>,
    prompts: Vec<TextPrompt>,
    pickers: Vec<(String, Vec<String>)>,
    inline_rejections: Vec<String>,
}

/// [`Dialogs`] answered from a queue.
///
/// Prompts with an exhausted queue are treated as cancelled.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    script: Mutex<Script>,
}

impl ScriptedDialogs {
    /// Create dialogs with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next text answer; `None` cancels the prompt.
    pub async fn answer(&self, answer: Option<&str>) {
        self.script
            .lock()
            .await
            .answers
            .push_back(answer.map(str::to_string));
    }

    /// Queue the next picker answer; `None` cancels the picker.
    pub async fn choose(&self, choice: Option<Vec<usize>>) {
        self.script.lock().await.choices.push_back(choice);
    }

    /// Alerts shown so far.
    pub async fn alerts(&self) -> Vec<Alert> {
        self.script.lock().await.alerts.clone()
    }

    /// The most recent alert.
    pub async fn last_alert(&self) -> Option<Alert> {
        self.script.lock().await.alerts.last().cloned()
    }

    /// Text prompts opened so far.
    pub async fn prompts(&self) -> Vec<TextPrompt> {
        self.script.lock().await.prompts.clone()
    }

    /// Pickers opened so far, as `(title, options)`.
    pub async fn pickers(&self) -> Vec<(String, Vec<String>)> {
        self.script.lock().await.pickers.clone()
    }

    /// Messages shown inline for refused blank input.
    pub async fn inline_rejections(&self) -> Vec<String> {
        self.script.lock().await.inline_rejections.clone()
    }
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
    async fn alert(&self, alert: Alert) {
        self.script.lock().await.alerts.push(alert);
    }

    async fn prompt_text(&self, prompt: TextPrompt) -> Option<String> {
        let mut script = self.script.lock().await;
        script.prompts.push(prompt.clone());

        loop {
            let answer = script.answers.pop_front().flatten()?;
            match &prompt.required_message {
                Some(message) if answer.trim().is_empty() => {
                    script.inline_rejections.push(message.clone());
                }
                _ => return Some(answer),
            }
        }
    }

    async fn choose_many(&self, title: &str, options: &[String]) -> Option<Vec<usize>> {
        let mut script = self.script.lock().await;
        script.pickers.push((title.to_string(), options.to_vec()));
        script
            .choices
            .pop_front()
            .flatten()
            .map(|picked| picked.into_iter().filter(|i| *i < options.len()).collect())
    }
}
