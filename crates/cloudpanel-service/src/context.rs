//! Shared handles every panel service is constructed with.

use std::sync::Arc;

use tokio::sync::RwLock;

use cloudpanel_client::CloudApi;
use cloudpanel_core::config::display::DisplayConfig;
use cloudpanel_core::i18n::{Locale, Message};
use cloudpanel_view::{ActionBindings, Alert, AlertLevel, Dialogs, View};

use crate::sequencer::RefreshSequencer;

/// Collaborators and settings for one panel instance.
///
/// Cloning is cheap; all clones share the same view, bindings, and
/// sequencer.
#[derive(Debug, Clone)]
pub struct PanelContext {
    /// Server access.
    pub api: Arc<dyn CloudApi>,
    /// Render target.
    pub view: Arc<dyn View>,
    /// Modal interaction.
    pub dialogs: Arc<dyn Dialogs>,
    /// Handlers attached to the rendered rows.
    pub bindings: Arc<RwLock<ActionBindings>>,
    /// Last-issued-wins ordering of region refreshes.
    pub sequencer: Arc<RefreshSequencer>,
    /// Language of alerts and prompts.
    pub locale: Locale,
    /// Total shown by the quota fallback.
    pub fallback_total_gb: u64,
}

impl PanelContext {
    /// Creates a context with fresh bindings and sequencing state.
    pub fn new(
        api: Arc<dyn CloudApi>,
        view: Arc<dyn View>,
        dialogs: Arc<dyn Dialogs>,
        display: &DisplayConfig,
    ) -> Self {
        Self {
            api,
            view,
            dialogs,
            bindings: Arc::new(RwLock::new(ActionBindings::new())),
            sequencer: Arc::new(RefreshSequencer::new()),
            locale: display.locale,
            fallback_total_gb: display.fallback_total_gb,
        }
    }

    /// Localized text of a catalog message.
    pub fn text(&self, message: Message) -> &'static str {
        message.text(self.locale)
    }

    /// Show an alert whose title comes from the catalog.
    pub async fn alert(&self, level: AlertLevel, title: Message, text: impl Into<String>) {
        self.dialogs
            .alert(Alert::new(level, self.text(title), text))
            .await;
    }

    /// Show a prepared alert.
    pub async fn show(&self, alert: Alert) {
        self.dialogs.alert(alert).await;
    }
}
