//! Day schedule fingerprinting.
//!
//! The digest covers the ordered outage list only. Title, group key and date
//! are display metadata and deliberately excluded: they must never trigger a
//! notification on their own.

use sha2::{Digest, Sha256};

use crate::models::outage::DaySchedule;

/// Fingerprint of an absent day.
///
/// A present day always digests to 64 hex characters, even with an empty
/// outage list, so this constant cannot collide with a real digest.
pub const EMPTY_FINGERPRINT: &str = "";

/// Compute the content fingerprint of a day's schedule.
///
/// Pure and deterministic: equal outage lists produce bit-identical digests
/// across repeated calls and independently constructed instances.
pub fn day_fingerprint(day: Option<&DaySchedule>) -> String {
    let Some(day) = day else {
        return EMPTY_FINGERPRINT.to_string();
    };

    let mut hasher = Sha256::new();
    for slot in &day.outages {
        hasher.update(slot.start.as_bytes());
        hasher.update(b"-");
        hasher.update(slot.end.as_bytes());
        hasher.update(b"-");
        hasher.update(slot.kind.as_str().as_bytes());
        hasher.update(b";");
    }
    hex::encode(hasher.finalize())
}
