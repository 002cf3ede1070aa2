use chrono::{DateTime, Utc};
use gridwatch_core::models::state::ScheduleState;
use gridwatch_core::models::subscription::Subscription;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSubscription {
    pub chat_id: i64,
    pub provider: String,
    pub region_code: String,
    pub group_num: String,
    pub subgroup_num: String,
    pub last_state: String,
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl DbSubscription {
    /// The stored-state string is parsed exactly once, here at the storage
    /// boundary; the engine only ever sees the structured record.
    pub fn into_subscription(self) -> Subscription {
        Subscription {
            chat_id: self.chat_id,
            provider: self.provider,
            region_code: self.region_code,
            group: self.group_num,
            subgroup: self.subgroup_num,
            state: ScheduleState::parse(&self.last_state),
            username: self.username,
        }
    }
}
