use serde::{Deserialize, Serialize};

use crate::models::state::ScheduleState;

/// Immutable snapshot of one subscriber for a single poll cycle.
///
/// Owned by the store; the engine reads it, decides, and hands back an
/// updated [`ScheduleState`] to be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub chat_id: i64,
    pub provider: String,
    pub region_code: String,
    pub group: String,
    pub subgroup: String,
    pub state: ScheduleState,
    pub username: Option<String>,
}
