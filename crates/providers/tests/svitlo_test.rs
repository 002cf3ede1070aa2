use chrono::NaiveDate;
use gridwatch_core::models::outage::SlotKind;
use gridwatch_providers::svitlo::{parse_regions, parse_schedule, unwrap_envelope};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn feed() -> Value {
    json!({
        "regions": [
            {
                "cpu": "ternopilska-oblast",
                "name_ua": "Тернопільська",
                "schedule": {
                    "1.1": {
                        "2026-01-19": {
                            "00:00": 1, "00:30": 1,
                            "01:00": 2, "01:30": 2,
                            "02:00": 1
                        },
                        "2026-01-20": {
                            "00:00": 1,
                            "12:00": 2, "12:30": 2,
                            "13:00": 1
                        }
                    }
                }
            }
        ],
        "date_today": "2026-01-19",
        "date_tomorrow": "2026-01-20"
    })
}

#[test]
fn test_region_catalog_is_derived_from_schedule_keys() {
    let regions = parse_regions(&feed());

    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].code, "ternopilska-oblast");
    assert_eq!(regions[0].name, "Тернопільська");
    assert_eq!(regions[0].groups, vec!["1"]);
    assert_eq!(regions[0].subgroups, vec!["1"]);
}

#[test]
fn test_region_without_schedule_keys_gets_default_split() {
    let data = json!({
        "regions": [{"cpu": "kiev", "name_ua": "Київ", "schedule": {}}]
    });

    let regions = parse_regions(&data);
    assert_eq!(regions[0].groups, vec!["1", "2", "3", "4", "5", "6"]);
    assert_eq!(regions[0].subgroups, vec!["1", "2"]);
}

#[test]
fn test_both_days_are_extracted() {
    let fetch = parse_schedule(&feed(), "ternopilska-oblast", "1", "1");

    let today = fetch.today.expect("today must be present");
    assert_eq!(today.date, NaiveDate::from_ymd_opt(2026, 1, 19).expect("valid date"));
    assert_eq!(today.group_key, "1.1");
    assert_eq!(today.outages.len(), 1);
    assert_eq!(today.outages[0].start, "01:00");
    assert_eq!(today.outages[0].end, "02:00");
    assert_eq!(today.outages[0].kind, SlotKind::Outage);

    let tomorrow = fetch.tomorrow.expect("tomorrow must be present");
    assert_eq!(tomorrow.outages.len(), 1);
    assert_eq!(tomorrow.outages[0].start, "12:00");
    assert_eq!(tomorrow.outages[0].end, "13:00");
}

#[test]
fn test_region_lookup_is_case_insensitive() {
    let fetch = parse_schedule(&feed(), "Ternopilska-Oblast", "1", "1");
    assert!(fetch.today.is_some());
}

#[test]
fn test_unknown_region_or_group_is_absent() {
    let fetch = parse_schedule(&feed(), "lvivska-oblast", "1", "1");
    assert_eq!(fetch.today, None);
    assert_eq!(fetch.tomorrow, None);

    let fetch = parse_schedule(&feed(), "ternopilska-oblast", "4", "2");
    assert_eq!(fetch.today, None);
}

#[test]
fn test_all_zero_day_is_absent_not_empty() {
    let data = json!({
        "regions": [{
            "cpu": "ternopilska-oblast",
            "name_ua": "Тернопільська",
            "schedule": {
                "1.1": {
                    "2026-01-19": {"00:00": 0, "12:00": 0, "23:30": 0}
                }
            }
        }],
        "date_today": "2026-01-19",
        "date_tomorrow": "2026-01-20"
    });

    let fetch = parse_schedule(&data, "ternopilska-oblast", "1", "1");
    assert_eq!(fetch.today, None);
}

#[test]
fn test_all_on_day_is_present_and_calm() {
    let data = json!({
        "regions": [{
            "cpu": "ternopilska-oblast",
            "name_ua": "Тернопільська",
            "schedule": {
                "1.1": {
                    "2026-01-19": {"00:00": 1, "12:00": 1, "23:30": 1}
                }
            }
        }],
        "date_today": "2026-01-19",
        "date_tomorrow": "2026-01-20"
    });

    let fetch = parse_schedule(&data, "ternopilska-oblast", "1", "1");
    let today = fetch.today.expect("a published all-on day is a real day");
    assert_eq!(today.outages, vec![]);
}

#[test]
fn test_body_envelope_is_unwrapped() {
    let body = serde_json::to_string(&feed()).expect("serializable fixture");
    let wrapped = json!({"body": body});

    let unwrapped = unwrap_envelope(wrapped).expect("valid envelope");
    assert_eq!(unwrapped, feed());
}

#[test]
fn test_plain_feed_passes_through_envelope() {
    assert_eq!(unwrap_envelope(feed()).expect("not an envelope"), feed());
}

#[test]
fn test_garbage_envelope_is_malformed() {
    let wrapped = json!({"body": "{not json"});
    assert!(unwrap_envelope(wrapped).is_err());
}
