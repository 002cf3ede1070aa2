use async_trait::async_trait;
use eyre::Result;
use gridwatch_core::models::state::ScheduleState;
use gridwatch_core::models::subscription::Subscription;
use mockall::automock;

use crate::models::DbSubscription;
use crate::repositories::subscriptions;
use crate::DbPool;

/// Storage capability consumed by the poll orchestrator.
///
/// Each subscriber's state is logically owned by that subscriber only; no
/// caller may read or mutate another subscriber's state through this trait.
#[automock]
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    async fn get(&self, chat_id: i64) -> Result<Option<Subscription>>;

    async fn list_all(&self) -> Result<Vec<Subscription>>;

    async fn set_state(&self, chat_id: i64, state: &ScheduleState) -> Result<()>;

    async fn delete(&self, chat_id: i64) -> Result<()>;
}

/// PostgreSQL-backed store over the subscriptions repository.
pub struct PgSubscriptionStore {
    pool: DbPool,
}

impl PgSubscriptionStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionStore for PgSubscriptionStore {
    async fn get(&self, chat_id: i64) -> Result<Option<Subscription>> {
        let subscription = subscriptions::get_subscription(&self.pool, chat_id).await?;
        Ok(subscription.map(DbSubscription::into_subscription))
    }

    async fn list_all(&self) -> Result<Vec<Subscription>> {
        let subscriptions = subscriptions::list_subscriptions(&self.pool).await?;
        Ok(subscriptions
            .into_iter()
            .map(DbSubscription::into_subscription)
            .collect())
    }

    async fn set_state(&self, chat_id: i64, state: &ScheduleState) -> Result<()> {
        subscriptions::set_last_state(&self.pool, chat_id, &state.encode()).await
    }

    async fn delete(&self, chat_id: i64) -> Result<()> {
        subscriptions::delete_subscription(&self.pool, chat_id).await
    }
}
