//! Rollover state machine and notification decider.
//!
//! A subscriber's "today" becomes tomorrow's "tomorrow" becomes the day
//! after's "today". The machine compares freshly fetched days against the
//! stored per-subscriber state and decides, per day, whether a notification
//! must fire and with what framing — announcing genuine late changes while
//! staying silent on a rollover the subscriber was already shown.

use crate::fingerprint::day_fingerprint;
use crate::models::outage::DaySchedule;
use crate::models::state::{DayStamp, ScheduleState};

/// How a processing run was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollMode {
    /// Periodic background check: notify only on real change.
    Poll,
    /// Subscriber asked for the current schedule; always answer.
    Refresh,
    /// Subscriber just signed up; always answer.
    FirstRun,
}

/// Which fetched day a delivery refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetDay {
    Today,
    Tomorrow,
}

/// Message framing attached to a delivery. Rendering maps these to header
/// text; the engine itself never builds user-facing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// First time this day's data is visible at all.
    TodayAppeared,
    /// A tomorrow existed but the rolled-over today no longer matches it.
    TodayUpdated,
    /// Same calendar day, different content.
    TodayChanged,
    TomorrowAppeared,
    TomorrowChanged,
    /// Forced refresh or first subscription.
    Requested,
}

/// Per-day verdict of the rollover comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayVerdict {
    NoAction,
    /// Expected rollover: fresh today matches what was announced as tomorrow.
    Silent,
    Notify(Framing),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub day: TargetDay,
    pub framing: Framing,
}

/// What one processing run must do: messages to deliver (today's first) and
/// the state to persist, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollDecision {
    pub deliveries: Vec<Delivery>,
    pub new_state: Option<ScheduleState>,
}

/// Evaluate the freshly fetched today against the stored state.
pub fn assess_today(
    stored: &ScheduleState,
    today: Option<&DaySchedule>,
    fp_today: &str,
) -> DayVerdict {
    // Transient absence, not a change.
    let Some(today) = today else {
        return DayVerdict::NoAction;
    };

    if stored.today.date != Some(today.date) {
        // Calendar rollover (or a never-seen subscriber). Silent only when
        // this is exactly what was already shown as "tomorrow".
        if !stored.tomorrow.fingerprint.is_empty() && fp_today == stored.tomorrow.fingerprint {
            return DayVerdict::Silent;
        }
        if !stored.tomorrow.fingerprint.is_empty() {
            return DayVerdict::Notify(Framing::TodayUpdated);
        }
        return DayVerdict::Notify(Framing::TodayAppeared);
    }

    if fp_today != stored.today.fingerprint {
        return DayVerdict::Notify(Framing::TodayChanged);
    }

    DayVerdict::NoAction
}

/// Evaluate the freshly fetched tomorrow against the stored state.
pub fn assess_tomorrow(
    stored: &ScheduleState,
    tomorrow: Option<&DaySchedule>,
    fp_tomorrow: &str,
) -> DayVerdict {
    let Some(tomorrow) = tomorrow else {
        return DayVerdict::NoAction;
    };

    if stored.tomorrow.date != Some(tomorrow.date) {
        return DayVerdict::Notify(Framing::TomorrowAppeared);
    }

    if fp_tomorrow != stored.tomorrow.fingerprint {
        return DayVerdict::Notify(Framing::TomorrowChanged);
    }

    DayVerdict::NoAction
}

fn observed_stamp(day: Option<&DaySchedule>, fingerprint: &str) -> DayStamp {
    match day {
        Some(day) => DayStamp::new(Some(day.date), fingerprint),
        None => DayStamp::default(),
    }
}

/// Run the decider for one subscriber and one fetch.
///
/// In `Poll` mode the state is written back whenever either observed
/// `(date, fingerprint)` pair differs from what is stored, notification or
/// not — silent rollovers must still converge the stored state, or the
/// silent-match check stops working on subsequent cycles. Forced modes
/// bypass comparison entirely: they always deliver today and overwrite the
/// stored state unconditionally.
pub fn decide(
    mode: PollMode,
    stored: &ScheduleState,
    today: Option<&DaySchedule>,
    tomorrow: Option<&DaySchedule>,
) -> PollDecision {
    let fp_today = day_fingerprint(today);
    let fp_tomorrow = day_fingerprint(tomorrow);

    let observed = ScheduleState {
        today: observed_stamp(today, &fp_today),
        tomorrow: observed_stamp(tomorrow, &fp_tomorrow),
    };

    match mode {
        PollMode::Poll => {
            let mut deliveries = Vec::new();
            if let DayVerdict::Notify(framing) = assess_today(stored, today, &fp_today) {
                deliveries.push(Delivery {
                    day: TargetDay::Today,
                    framing,
                });
            }
            if let DayVerdict::Notify(framing) = assess_tomorrow(stored, tomorrow, &fp_tomorrow) {
                deliveries.push(Delivery {
                    day: TargetDay::Tomorrow,
                    framing,
                });
            }
            let new_state = (observed != *stored).then_some(observed);
            PollDecision {
                deliveries,
                new_state,
            }
        }
        PollMode::Refresh | PollMode::FirstRun => PollDecision {
            deliveries: vec![Delivery {
                day: TargetDay::Today,
                framing: Framing::Requested,
            }],
            new_state: Some(observed),
        },
    }
}
