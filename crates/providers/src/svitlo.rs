use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use gridwatch_core::errors::{EngineError, EngineResult};
use gridwatch_core::extract::extract_slots;
use gridwatch_core::models::outage::{DaySchedule, PowerState, RegionMeta, ScheduleFetch};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::OutageProvider;

pub const PROVIDER_ID: &str = "svitlo";

const DEFAULT_API_URL: &str = "https://svitlo-proxy.svitlo-proxy.workers.dev";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Aggregated-feed adapter: a single fetch carries every region's schedule
/// for today and tomorrow, keyed by region `cpu` and `"<group>.<subgroup>"`.
pub struct SvitloProvider {
    client: Client,
    api_url: String,
}

impl SvitloProvider {
    pub fn new() -> Self {
        Self::with_api_url(DEFAULT_API_URL)
    }

    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
        }
    }

    async fn fetch_feed(&self) -> EngineResult<Value> {
        debug!("Fetching svitlo feed from {}", self.api_url);

        let response = self
            .client
            .get(&self.api_url)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| EngineError::Fetch(format!("svitlo request failed: {e}")))?
            .error_for_status()
            .map_err(|e| EngineError::Fetch(format!("svitlo returned an error status: {e}")))?;

        let data: Value = response
            .json()
            .await
            .map_err(|e| EngineError::MalformedPayload(format!("svitlo response is not JSON: {e}")))?;

        unwrap_envelope(data)
    }
}

impl Default for SvitloProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// The worker proxy wraps the feed as `{"body": "<json string>"}`; a direct
/// fetch returns the feed itself.
pub fn unwrap_envelope(data: Value) -> EngineResult<Value> {
    if let Some(body) = data.get("body").and_then(Value::as_str) {
        return serde_json::from_str(body).map_err(|e| {
            EngineError::MalformedPayload(format!("svitlo body envelope is not JSON: {e}"))
        });
    }
    Ok(data)
}

/// Raw feed codes: 2 = outage, 1 = power, 0 = no data.
fn classify(code: i64) -> PowerState {
    match code {
        2 => PowerState::Outage,
        _ => PowerState::On,
    }
}

fn is_numeric(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_digit())
}

fn numbered(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
    range.map(|n| n.to_string()).collect()
}

/// Derive the region catalog from the feed, reading group/subgroup numbers
/// out of the schedule keys and falling back to the standard 1–6 / 1–2
/// split when a region publishes none.
pub fn parse_regions(data: &Value) -> Vec<RegionMeta> {
    let Some(regions) = data.get("regions").and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut metas = Vec::new();
    for region in regions {
        let Some(code) = region
            .get("cpu")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|code| !code.is_empty())
        else {
            continue;
        };
        let name = region
            .get("name_ua")
            .and_then(Value::as_str)
            .or_else(|| region.get("name").and_then(Value::as_str))
            .unwrap_or(code);

        let mut groups: Vec<String> = Vec::new();
        let mut subgroups: Vec<String> = Vec::new();
        if let Some(schedule) = region.get("schedule").and_then(Value::as_object) {
            for key in schedule.keys() {
                if let Some((group, subgroup)) = key.split_once('.') {
                    if is_numeric(group) && !groups.contains(&group.to_string()) {
                        groups.push(group.to_string());
                    }
                    if is_numeric(subgroup) && !subgroups.contains(&subgroup.to_string()) {
                        subgroups.push(subgroup.to_string());
                    }
                }
            }
        }

        if groups.is_empty() {
            groups = numbered(1..=6);
        } else {
            groups.sort_by_key(|g| g.parse::<u32>().unwrap_or(0));
        }
        if subgroups.is_empty() {
            subgroups = numbered(1..=2);
        } else {
            subgroups.sort_by_key(|sg| sg.parse::<u32>().unwrap_or(0));
        }

        metas.push(RegionMeta {
            code: code.to_string(),
            name: name.to_string(),
            groups,
            subgroups,
        });
    }

    metas
}

/// Pick one region/group out of the aggregated feed and build both days.
pub fn parse_schedule(data: &Value, region_code: &str, group: &str, subgroup: &str) -> ScheduleFetch {
    let absent = ScheduleFetch {
        today: None,
        tomorrow: None,
        last_update: 0,
    };

    let Some(regions) = data.get("regions").and_then(Value::as_array) else {
        return absent;
    };
    let Some(region) = regions.iter().find(|r| {
        r.get("cpu")
            .and_then(Value::as_str)
            .is_some_and(|cpu| cpu.eq_ignore_ascii_case(region_code))
    }) else {
        return absent;
    };

    let group_key = format!("{group}.{subgroup}");
    let Some(group_block) = region.get("schedule").and_then(|s| s.get(&group_key)) else {
        return absent;
    };

    let today = data
        .get("date_today")
        .and_then(Value::as_str)
        .and_then(|date| build_day(group_block, date, format!("Сьогодні: {date}"), &group_key));
    let tomorrow = data
        .get("date_tomorrow")
        .and_then(Value::as_str)
        .and_then(|date| build_day(group_block, date, format!("Завтра: {date}"), &group_key));

    ScheduleFetch {
        today,
        tomorrow,
        last_update: 0,
    }
}

fn build_day(
    group_block: &Value,
    date_str: &str,
    title: String,
    group_key: &str,
) -> Option<DaySchedule> {
    let day_slots = group_block.get(date_str)?.as_object()?;
    if day_slots.is_empty() {
        return None;
    }
    // An all-zero day means the operator has published nothing for it yet;
    // that is data absence, not a calm schedule.
    if day_slots.values().all(|v| v.as_i64().unwrap_or(0) == 0) {
        return None;
    }

    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
    let samples: BTreeMap<String, PowerState> = day_slots
        .iter()
        .map(|(time, value)| (time.clone(), classify(value.as_i64().unwrap_or(0))))
        .collect();

    Some(DaySchedule {
        date,
        title,
        group_key: group_key.to_string(),
        outages: extract_slots(&samples),
    })
}

#[async_trait]
impl OutageProvider for SvitloProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_regions(&self) -> EngineResult<Vec<RegionMeta>> {
        let data = self.fetch_feed().await?;
        Ok(parse_regions(&data))
    }

    async fn get_schedule(
        &self,
        region_code: &str,
        group: &str,
        subgroup: &str,
    ) -> EngineResult<ScheduleFetch> {
        let data = self.fetch_feed().await?;
        Ok(parse_schedule(&data, region_code, group, subgroup))
    }
}
