//! Slot interval extraction.
//!
//! Converts a day's classified time-of-day samples into an ordered list of
//! non-overlapping outage/transition intervals. Contiguous `On` runs are
//! implicit gaps and produce no slot.

use std::collections::BTreeMap;

use crate::models::outage::{PowerState, Slot};

/// Sentinel end value for a run still open after the last sample.
pub const END_OF_DAY: &str = "24:00";

/// Walk the samples in ascending `HH:MM` order and merge contiguous runs of
/// a single state into slots.
///
/// A run of `Outage`/`Switching` is closed at the first sample whose state
/// differs; a run still open after the last sample closes at `"24:00"`. An
/// all-`On` (or empty) day yields an empty list — a valid "no outages" day.
pub fn extract_slots(samples: &BTreeMap<String, PowerState>) -> Vec<Slot> {
    let mut slots = Vec::new();
    let mut open: Option<(&str, PowerState)> = None;

    for (time, &state) in samples {
        match open {
            None => open = Some((time.as_str(), state)),
            Some((start, prev)) if prev != state => {
                if let Some(kind) = prev.slot_kind() {
                    slots.push(Slot {
                        start: start.to_string(),
                        end: time.clone(),
                        kind,
                    });
                }
                open = Some((time.as_str(), state));
            }
            Some(_) => {}
        }
    }

    if let Some((start, last)) = open {
        if let Some(kind) = last.slot_kind() {
            slots.push(Slot {
                start: start.to_string(),
                end: END_OF_DAY.to_string(),
                kind,
            });
        }
    }

    slots
}
