use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Power state of a single sample after provider-specific classification.
///
/// Providers use incompatible raw code sets; each adapter maps its own codes
/// into this shared three-state alphabet before interval extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerState {
    On,
    Outage,
    Switching,
}

impl PowerState {
    /// The slot kind this state produces when a run of it is retained.
    /// `On` runs are implicit gaps and are never stored.
    pub fn slot_kind(self) -> Option<SlotKind> {
        match self {
            PowerState::On => None,
            PowerState::Outage => Some(SlotKind::Outage),
            PowerState::Switching => Some(SlotKind::Switching),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    Outage,
    Switching,
}

impl SlotKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotKind::Outage => "outage",
            SlotKind::Switching => "switching",
        }
    }
}

/// One contiguous run of a single retained power state.
///
/// Times are `HH:MM` labels compared lexically; `"24:00"` is the sentinel
/// end-of-day value. Invariant: `start < end`, and the slots of a day are
/// sorted and non-overlapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: String,
    pub end: String,
    pub kind: SlotKind,
}

/// Schedule for one group/subgroup on one calendar day.
///
/// Produced fresh on every fetch and never mutated afterwards. A day with no
/// published data is represented as an absent `DaySchedule`, never as an
/// empty one; an empty `outages` list means "no outages planned".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub title: String,
    pub group_key: String,
    pub outages: Vec<Slot>,
}

/// Catalog entry describing a region a provider can serve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionMeta {
    pub code: String,
    pub name: String,
    pub groups: Vec<String>,
    pub subgroups: Vec<String>,
}

/// Result of one provider fetch for a single group/subgroup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleFetch {
    pub today: Option<DaySchedule>,
    pub tomorrow: Option<DaySchedule>,
    pub last_update: i64,
}
