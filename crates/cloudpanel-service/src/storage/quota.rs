//! Storage quota refresh.

use tracing::{debug, error, warn};

use cloudpanel_entity::{QuotaInfo, QuotaView};
use cloudpanel_view::{Region, render};

use crate::context::PanelContext;

/// Keeps the quota bar in line with the server's storage info.
#[derive(Debug, Clone)]
pub struct QuotaService {
    ctx: PanelContext,
}

impl QuotaService {
    /// Creates a new quota service.
    pub fn new(ctx: PanelContext) -> Self {
        Self { ctx }
    }

    /// Fetch storage info and redraw the quota bar.
    ///
    /// A failed fetch is not reported to the user; the bar falls back to a
    /// zero baseline against the configured total.
    pub async fn refresh(&self) -> QuotaView {
        let ticket = self.ctx.sequencer.issue(Region::Quota);

        let quota = match self.ctx.api.storage_info().await {
            Ok(info) => QuotaView::Known(QuotaInfo::from(&info)),
            Err(e) => {
                error!(error = %e, "Error fetching storage info");
                QuotaView::Unavailable {
                    total_gb: self.ctx.fallback_total_gb,
                }
            }
        };

        if !self.ctx.sequencer.is_current(ticket) {
            warn!(
                region = %Region::Quota,
                generation = ticket.generation,
                latest = self.ctx.sequencer.latest(Region::Quota),
                "Discarding stale response"
            );
            return quota;
        }

        self.ctx
            .view
            .replace(Region::Quota, render::quota_bar(&quota))
            .await;
        debug!(percent = quota.percent(), "Quota rendered");
        quota
    }
}
