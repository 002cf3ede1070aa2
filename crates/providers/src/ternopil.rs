use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use gridwatch_core::errors::{EngineError, EngineResult};
use gridwatch_core::extract::extract_slots;
use gridwatch_core::models::outage::{DaySchedule, PowerState, RegionMeta, ScheduleFetch};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::OutageProvider;

pub const PROVIDER_ID: &str = "ternopil";

const DEFAULT_API_URL: &str = "https://api-poweron.toe.com.ua/api/a_gpv_g";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(25);

/// Ternopil oblenergo adapter: a per-group API returning hydra-paginated
/// day graphs for a requested time window.
pub struct TernopilProvider {
    client: Client,
    api_url: String,
    timezone: Tz,
}

impl TernopilProvider {
    pub fn new() -> Self {
        Self::with_timezone(chrono_tz::Europe::Kyiv)
    }

    pub fn with_timezone(timezone: Tz) -> Self {
        Self {
            client: Client::new(),
            api_url: DEFAULT_API_URL.to_string(),
            timezone,
        }
    }

    pub fn with_api_url(api_url: impl Into<String>, timezone: Tz) -> Self {
        Self {
            client: Client::new(),
            api_url: api_url.into(),
            timezone,
        }
    }
}

impl Default for TernopilProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Raw feed codes: 0 = light, 1 = outage, 10 = possible outage/switching.
/// Codes arrive as strings; anything unparsable counts as light.
fn classify(value: &Value) -> PowerState {
    let code = match value {
        Value::String(raw) => raw.parse::<i64>().unwrap_or(0),
        Value::Number(n) => n.as_i64().unwrap_or(0),
        _ => 0,
    };
    match code {
        1 => PowerState::Outage,
        10 => PowerState::Switching,
        _ => PowerState::On,
    }
}

/// Build both days out of a hydra document, keyed by `dateGraph` date.
pub fn parse_schedule(
    data: &Value,
    group_key: &str,
    today: NaiveDate,
    tomorrow: NaiveDate,
) -> ScheduleFetch {
    let mut fetch = ScheduleFetch {
        today: None,
        tomorrow: None,
        last_update: 0,
    };

    let Some(members) = data.get("hydra:member").and_then(Value::as_array) else {
        return fetch;
    };

    for graph in members {
        let Some(date) = graph
            .get("dateGraph")
            .and_then(Value::as_str)
            .and_then(|raw| raw.split('T').next())
            .and_then(|part| NaiveDate::parse_from_str(part, "%Y-%m-%d").ok())
        else {
            continue;
        };
        if date != today && date != tomorrow {
            continue;
        }

        let Some(times) = graph
            .get("dataJson")
            .and_then(|data_json| data_json.get(group_key))
            .and_then(|group| group.get("times"))
            .and_then(Value::as_object)
        else {
            continue;
        };
        // A graph entry with no samples is "nothing published", not a calm
        // schedule.
        if times.is_empty() {
            continue;
        }

        let samples: BTreeMap<String, PowerState> = times
            .iter()
            .map(|(time, value)| (time.clone(), classify(value)))
            .collect();

        let day = DaySchedule {
            date,
            title: format!("Графік на {date}"),
            group_key: group_key.to_string(),
            outages: extract_slots(&samples),
        };

        if date == today {
            fetch.today = Some(day);
        } else {
            fetch.tomorrow = Some(day);
        }
    }

    fetch
}

#[async_trait]
impl OutageProvider for TernopilProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn list_regions(&self) -> EngineResult<Vec<RegionMeta>> {
        Ok(vec![RegionMeta {
            code: "ternopil".to_string(),
            name: "Тернопільська обл.".to_string(),
            groups: (1..=6).map(|g| g.to_string()).collect(),
            subgroups: vec!["1".to_string(), "2".to_string()],
        }])
    }

    async fn get_schedule(
        &self,
        _region_code: &str,
        group: &str,
        subgroup: &str,
    ) -> EngineResult<ScheduleFetch> {
        let now = Utc::now().with_timezone(&self.timezone);
        let today = now.date_naive();
        let tomorrow = today + chrono::Duration::days(1);
        let window_end = today + chrono::Duration::days(2);
        let group_key = format!("{group}.{subgroup}");

        let params = [
            ("after", format!("{today}T00:00:00+00:00")),
            ("before", format!("{window_end}T00:00:00+00:00")),
            ("group[]", group_key.clone()),
            // Cache buster
            ("time", now.timestamp().to_string()),
        ];

        debug!("Fetching ternopil schedule for group {}", group_key);

        let response = self
            .client
            .get(&self.api_url)
            .query(&params)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| EngineError::Fetch(format!("ternopil request failed: {e}")))?
            .error_for_status()
            .map_err(|e| EngineError::Fetch(format!("ternopil returned an error status: {e}")))?;

        let data: Value = response.json().await.map_err(|e| {
            EngineError::MalformedPayload(format!("ternopil response is not JSON: {e}"))
        })?;

        Ok(parse_schedule(&data, &group_key, today, tomorrow))
    }
}
