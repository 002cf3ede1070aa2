use chrono::NaiveDate;
use gridwatch_core::models::state::{DayStamp, ScheduleState};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn test_modern_encoding_round_trips() {
    let state = ScheduleState {
        today: DayStamp::new(Some(date(2026, 1, 19)), "aaa111"),
        tomorrow: DayStamp::new(Some(date(2026, 1, 20)), "bbb222"),
    };

    let encoded = state.encode();
    assert_eq!(encoded, "2026-01-19|aaa111:2026-01-20|bbb222");
    assert_eq!(ScheduleState::parse(&encoded), state);
}

#[test]
fn test_empty_state_round_trips() {
    let state = ScheduleState::default();
    assert!(state.is_empty());

    let encoded = state.encode();
    assert_eq!(encoded, ":");
    assert_eq!(ScheduleState::parse(&encoded), state);
}

#[test]
fn test_blank_string_parses_as_never_seen() {
    // Fresh rows default to an empty string, not ":".
    let state = ScheduleState::parse("");
    assert!(state.is_empty());
}

#[test]
fn test_legacy_fingerprint_only_encoding() {
    // The oldest stored form was a bare fingerprint with no separator at
    // all: unknown date, some fingerprint, nothing known about tomorrow.
    let state = ScheduleState::parse("deadbeef");

    assert_eq!(state.today, DayStamp::new(None, "deadbeef"));
    assert!(state.tomorrow.is_empty());
}

#[test]
fn test_legacy_side_without_date_component() {
    let state = ScheduleState::parse("2026-01-19|aaa111:bbb222");

    assert_eq!(state.today, DayStamp::new(Some(date(2026, 1, 19)), "aaa111"));
    assert_eq!(state.tomorrow, DayStamp::new(None, "bbb222"));
}

#[test]
fn test_legacy_side_re_encodes_without_date() {
    let state = ScheduleState::parse("2026-01-19|aaa111:bbb222");
    assert_eq!(state.encode(), "2026-01-19|aaa111:bbb222");
}

#[rstest]
#[case::garbage_date("notadate|aaa111")]
#[case::numeric_garbage("20260119|aaa111")]
fn test_unparseable_date_degrades_to_unknown(#[case] raw: &str) {
    let state = ScheduleState::parse(raw);

    assert_eq!(state.today.date, None);
    assert_eq!(state.today.fingerprint, "aaa111");
}

#[test]
fn test_one_sided_state() {
    let state = ScheduleState::parse(":2026-01-20|bbb222");

    assert!(state.today.is_empty());
    assert_eq!(
        state.tomorrow,
        DayStamp::new(Some(date(2026, 1, 20)), "bbb222")
    );
    assert_eq!(state.encode(), ":2026-01-20|bbb222");
}
