use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use gridwatch_core::models::subscription::Subscription;
use gridwatch_core::render;
use gridwatch_core::rollover::{PollMode, TargetDay, decide};
use gridwatch_db::store::SubscriptionStore;
use gridwatch_providers::{OutageProvider, ProviderMap};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::notify::{Notifier, SendOutcome};

/// Shared collaborators for subscription processing.
///
/// The store, provider registry and notifier are capabilities; tests swap
/// them for mocks and the daemon wires the real ones in.
pub struct PollerContext {
    pub providers: ProviderMap,
    pub store: Arc<dyn SubscriptionStore>,
    pub notifier: Arc<dyn Notifier>,
    pub fetch_timeout: Duration,
    pub send_delay: Duration,
}

/// One full poll cycle over every subscription.
///
/// Failures are scoped to a single subscriber: one broken feed or delivery
/// must never stall the rest of the cycle.
pub async fn run_poll_cycle(ctx: &PollerContext) -> Result<()> {
    let subscriptions = ctx.store.list_all().await?;
    debug!("Polling {} subscriptions", subscriptions.len());

    for subscription in &subscriptions {
        if let Err(e) = process_subscription(ctx, subscription, PollMode::Poll).await {
            error!(
                "Processing failed for chat {}: {:?}",
                subscription.chat_id, e
            );
        }
    }

    Ok(())
}

/// Process a single chat on demand (forced refresh, first subscription).
pub async fn process_chat(ctx: &PollerContext, chat_id: i64, mode: PollMode) -> Result<()> {
    let Some(subscription) = ctx.store.get(chat_id).await? else {
        warn!("No subscription for chat {}", chat_id);
        return Ok(());
    };
    process_subscription(ctx, &subscription, mode).await
}

/// Run the fetch → decide → deliver → persist pipeline for one subscriber.
pub async fn process_subscription(
    ctx: &PollerContext,
    subscription: &Subscription,
    mode: PollMode,
) -> Result<()> {
    let Some(provider) = ctx.providers.get(&subscription.provider) else {
        warn!(
            "Unknown provider {} for chat {}",
            subscription.provider, subscription.chat_id
        );
        return Ok(());
    };

    // A fetch failure or timeout skips this subscriber for the cycle: no
    // state change, no notification.
    let fetch = match timeout(
        ctx.fetch_timeout,
        provider.get_schedule(
            &subscription.region_code,
            &subscription.group,
            &subscription.subgroup,
        ),
    )
    .await
    {
        Ok(Ok(fetch)) => fetch,
        Ok(Err(e)) => {
            warn!("Fetch failed for chat {}: {}", subscription.chat_id, e);
            return Ok(());
        }
        Err(_) => {
            warn!("Fetch timed out for chat {}", subscription.chat_id);
            return Ok(());
        }
    };

    let decision = decide(
        mode,
        &subscription.state,
        fetch.today.as_ref(),
        fetch.tomorrow.as_ref(),
    );

    if !decision.deliveries.is_empty() {
        let region_name = resolve_region_name(provider.as_ref(), &subscription.region_code).await;

        for delivery in &decision.deliveries {
            let (day, region_label) = match delivery.day {
                TargetDay::Today => (fetch.today.as_ref(), region_name.clone()),
                TargetDay::Tomorrow => {
                    (fetch.tomorrow.as_ref(), format!("{region_name} (ЗАВТРА)"))
                }
            };
            let text =
                render::schedule_to_text(&region_label, day, render::framing_header(delivery.framing));

            match ctx.notifier.send(subscription.chat_id, &text).await {
                Ok(SendOutcome::Delivered) => {}
                Ok(SendOutcome::PermanentlyRejected) => {
                    info!(
                        "Chat {} rejected delivery permanently, removing subscription",
                        subscription.chat_id
                    );
                    ctx.store.delete(subscription.chat_id).await?;
                    return Ok(());
                }
                Ok(SendOutcome::TransientFailure) => {
                    warn!("Transient delivery failure for chat {}", subscription.chat_id);
                }
                Err(e) => {
                    warn!("Delivery error for chat {}: {}", subscription.chat_id, e);
                }
            }

            // Advisory pacing between sends, not a correctness requirement.
            if !ctx.send_delay.is_zero() {
                tokio::time::sleep(ctx.send_delay).await;
            }
        }
    }

    // Persisted regardless of delivery success: a rare duplicate message is
    // preferable to stored state drifting from reality.
    if let Some(state) = decision.new_state {
        ctx.store.set_state(subscription.chat_id, &state).await?;
    }

    Ok(())
}

async fn resolve_region_name(provider: &dyn OutageProvider, region_code: &str) -> String {
    match provider.list_regions().await {
        Ok(regions) => regions
            .into_iter()
            .find(|region| region.code == region_code)
            .map(|region| region.name)
            .unwrap_or_else(|| region_code.to_string()),
        Err(e) => {
            warn!("Region lookup failed for {}: {}", region_code, e);
            region_code.to_string()
        }
    }
}
