//! The notification pipeline: enrich, compose, deliver.

use chrono::Local;

use runbeacon_config::DeliveryConfig;

use crate::compose::{SlackPayload, compose_message};
use crate::context::RunContext;
use crate::error::Result;
use crate::facts::{FactSource, enrich};
use crate::notify::SlackNotifier;

/// Run the full pipeline once for one completed run.
///
/// A failed fact query aborts the run before composition: delivering a
/// message with a broken enrichment step is worse than delivering nothing.
/// The timestamp in the headline is captured here, at composition time.
pub async fn notify_run(
    ctx: &RunContext,
    config: &DeliveryConfig,
    fact_names: &[String],
    source: &dyn FactSource,
    notifier: &SlackNotifier,
) -> Result<()> {
    let attrs = enrich(ctx, fact_names, source).await?;
    let message = compose_message(ctx, config, &attrs, Local::now());
    let payload = SlackPayload::new(config, message);

    tracing::info!(host = %ctx.host, status = %ctx.status, "sending run status to slack");
    notifier.deliver(config, &payload).await?;
    Ok(())
}
