//! Storage quota command.

use crate::output::{self, OutputFormat};
use cloudpanel_core::error::AppError;
use cloudpanel_entity::QuotaView;

/// Execute the quota command
pub async fn execute(config_path: &str, format: OutputFormat) -> Result<(), AppError> {
    let panel = super::open_panel(config_path, None).await?;
    let quota = panel.quota().refresh().await;

    match format {
        OutputFormat::Json => output::print_json(&quota),
        OutputFormat::Table => {
            println!("Storage:");
            output::print_kv("Usage", &quota.usage_label());
            output::print_kv("Percent", &quota.percent_label());
            if let QuotaView::Unavailable { .. } = quota {
                output::print_warning("Storage info unavailable; showing fallback");
            }
        }
    }

    Ok(())
}
