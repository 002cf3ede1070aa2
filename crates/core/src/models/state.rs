use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Last observed `(date, fingerprint)` for one calendar day of a subscriber.
///
/// An empty stamp means the day has never been seen (or was absent at the
/// last poll). A stamp with a fingerprint but no date comes from the legacy
/// stored encoding, which carried the fingerprint alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStamp {
    pub date: Option<NaiveDate>,
    pub fingerprint: String,
}

impl DayStamp {
    pub fn new(date: Option<NaiveDate>, fingerprint: impl Into<String>) -> Self {
        Self {
            date,
            fingerprint: fingerprint.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_none() && self.fingerprint.is_empty()
    }

    fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::default();
        }
        match raw.split_once('|') {
            Some((date, fingerprint)) => Self {
                // An unparseable date degrades to "unknown date, some fingerprint"
                date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
                fingerprint: fingerprint.to_string(),
            },
            // Legacy encoding: the whole string is the fingerprint
            None => Self {
                date: None,
                fingerprint: raw.to_string(),
            },
        }
    }

    fn encode(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        match self.date {
            Some(date) => format!("{}|{}", date.format("%Y-%m-%d"), self.fingerprint),
            None => self.fingerprint.clone(),
        }
    }
}

/// Persisted per-subscriber schedule state: today and tomorrow as last
/// observed, each tagged with its calendar date.
///
/// The wire form is a single string `"<date>|<fp>:<date>|<fp>"` where either
/// side may be empty. Parsing never fails: unrecognizable input degrades to
/// "never seen" rather than failing the cycle. The string is parsed exactly
/// once, at the storage boundary; everything else works on this record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleState {
    pub today: DayStamp,
    pub tomorrow: DayStamp,
}

impl ScheduleState {
    pub fn parse(raw: &str) -> Self {
        let (today, tomorrow) = match raw.split_once(':') {
            Some((today, tomorrow)) => (today, tomorrow),
            None => (raw, ""),
        };
        Self {
            today: DayStamp::parse(today),
            tomorrow: DayStamp::parse(tomorrow),
        }
    }

    pub fn encode(&self) -> String {
        format!("{}:{}", self.today.encode(), self.tomorrow.encode())
    }

    pub fn is_empty(&self) -> bool {
        self.today.is_empty() && self.tomorrow.is_empty()
    }
}
