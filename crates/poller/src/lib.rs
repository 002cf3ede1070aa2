//! # Gridwatch Poller
//!
//! The poll orchestrator: a periodic driver that walks every subscription,
//! fetches today/tomorrow from the bound provider, runs the change-detection
//! engine from `gridwatch-core`, delivers notifications over Telegram and
//! persists the updated per-subscriber state.

/// Configuration for the poller daemon
pub mod config;
/// Delivery capability and the Telegram implementation
pub mod notify;
/// Per-subscription processing pipeline
pub mod process;

use std::sync::Arc;

use eyre::Result;
use gridwatch_db::DbPool;
use gridwatch_db::store::PgSubscriptionStore;
use gridwatch_providers::build_providers;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use crate::config::PollerConfig;
use crate::notify::TelegramNotifier;
use crate::process::PollerContext;

/// Run the poll loop with the provided configuration and database pool.
///
/// Runs until the process is stopped. Cycles never overlap: a tick that
/// fires while a cycle is still running is delayed, which keeps every
/// subscriber's read-decide-write sequence serialized with itself.
pub async fn start_poller(config: PollerConfig, db_pool: DbPool) -> Result<()> {
    let ctx = PollerContext {
        providers: build_providers(config.timezone),
        store: Arc::new(PgSubscriptionStore::new(db_pool)),
        notifier: Arc::new(TelegramNotifier::new(&config.bot_token)),
        fetch_timeout: config.fetch_timeout,
        send_delay: config.send_delay,
    };

    info!("Poller started, checking every {:?}", config.poll_interval);

    let mut ticker = tokio::time::interval(config.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        if let Err(e) = process::run_poll_cycle(&ctx).await {
            error!("Poll cycle failed: {:?}", e);
        }
    }
}
