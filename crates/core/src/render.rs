//! Telegram-HTML rendering of a day's schedule.
//!
//! Presentation only: the adjacency merge below combines an outage interval
//! with a switching interval that shares its boundary into a single display
//! line, but the canonical slot list stays authoritative and fingerprints
//! are never computed from rendered output.

use crate::models::outage::{DaySchedule, SlotKind};
use crate::rollover::Framing;

/// Header line for a notification, or `None` for a plain requested render.
pub fn framing_header(framing: Framing) -> Option<&'static str> {
    match framing {
        Framing::TodayAppeared => Some("З'явився графік на сьогодні!"),
        Framing::TodayUpdated => Some("УВАГА! Графік змінився (оновлення)!"),
        Framing::TodayChanged => Some("УВАГА! Графік змінився!"),
        Framing::TomorrowAppeared => Some("З'явився/змінився графік на завтра!"),
        Framing::TomorrowChanged => Some("УВАГА! Графік на завтра змінився!"),
        Framing::Requested => None,
    }
}

/// Render one day's schedule as a Telegram HTML message.
pub fn schedule_to_text(region_name: &str, day: Option<&DaySchedule>, header: Option<&str>) -> String {
    let Some(day) = day else {
        return format!("🗺️ {region_name}\n\n⚠️ Немає даних по розкладу.");
    };

    let title_line = match header {
        Some(header) => format!("🔔 <b>{header}</b>\n🗺️ {region_name}"),
        None => format!("🗺️ <b>{region_name}</b>"),
    };

    let mut lines = vec![
        title_line,
        format!("👥 <b>Група:</b> {}", day.group_key),
        format!("🗓️ <b>Дані:</b> {}", day.title),
        String::new(),
    ];

    if day.outages.is_empty() {
        lines.push("✅ Сьогодні відключень не заплановано (за даними джерела).".to_string());
    } else {
        lines.push("⛔ <b>Відключення:</b>".to_string());

        let slots = &day.outages;
        let mut i = 0;
        while i < slots.len() {
            let current = &slots[i];

            if let Some(next) = slots.get(i + 1) {
                // Outage then switching sharing a boundary: restoration window.
                if current.kind == SlotKind::Outage
                    && next.kind == SlotKind::Switching
                    && current.end == next.start
                {
                    lines.push(format!(
                        " • {} — {} 🟡 (увімкнення з {})",
                        current.start, next.end, current.end
                    ));
                    i += 2;
                    continue;
                }
                // Switching then outage sharing a boundary: cutoff window.
                if current.kind == SlotKind::Switching
                    && next.kind == SlotKind::Outage
                    && current.end == next.start
                {
                    lines.push(format!(
                        " • {} — {} 🟡 (вимкнення з {})",
                        current.start, next.end, current.start
                    ));
                    i += 2;
                    continue;
                }
            }

            match current.kind {
                SlotKind::Switching => lines.push(format!(
                    " 🟡 {} — {} (можливе відключення/перемикання)",
                    current.start, current.end
                )),
                SlotKind::Outage => lines.push(format!(" • {} — {}", current.start, current.end)),
            }
            i += 1;
        }
    }

    lines.join("\n")
}
