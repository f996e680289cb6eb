//! Event types as published in the community events feed.
//!
//! The feed is a JSON array of [`Event`] records with camelCase keys.
//! Expanded occurrences reuse the same type: an occurrence is an event whose
//! `date` is the computed day, whose `uid` carries that day as a suffix, and
//! whose `recurrence` is cleared.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A community calendar event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub uid: String,
    /// Day of the first occurrence
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    /// IANA timezone the start/end times are expressed in
    pub timezone: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Free-form category tag ("meeting", "workshop", ...)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_type: Option<LocationType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
}

impl Event {
    pub fn is_recurring(&self) -> bool {
        self.recurrence.is_some()
    }

    /// Build the occurrence of this event that falls on `date`.
    pub fn occurrence_on(&self, date: NaiveDate) -> Event {
        Event {
            uid: format!("{}-{}", self.uid, date.format("%Y-%m-%d")),
            date,
            recurrence: None,
            ..self.clone()
        }
    }

    /// The event's timezone, if the identifier is a known IANA zone.
    pub fn tz(&self) -> Option<Tz> {
        self.timezone.parse().ok()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Whether an event happens online or at a venue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LocationType {
    Virtual,
    InPerson,
}

impl LocationType {
    pub fn label(&self) -> &'static str {
        match self {
            LocationType::Virtual => "Virtual",
            LocationType::InPerson => "In person",
        }
    }
}

/// Recurrence rule attached to a feed event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    #[serde(default)]
    pub frequency: Frequency,
    /// Step size in units of `frequency`. Values below 1 are malformed, and
    /// so is anything that is not an integer (read as 0).
    #[serde(default = "default_interval", deserialize_with = "lenient_interval")]
    pub interval: i64,
    /// Last day (inclusive) an occurrence may fall on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub until: Option<NaiveDate>,
}

fn default_interval() -> i64 {
    1
}

fn lenient_interval<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_i64().unwrap_or(0))
}

/// Recurrence frequency.
///
/// Unrecognized values are kept as `Unknown` instead of failing the whole
/// feed, so a single bad record only loses its repeats. This covers any
/// JSON value, not just unknown strings: a missing, `null` or numeric
/// frequency is `Unknown` too.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "serde_json::Value", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Unknown(String),
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Unknown(String::new())
    }
}

impl From<serde_json::Value> for Frequency {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(name) => Frequency::from(name),
            other => Frequency::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        match value.as_str() {
            "daily" => Frequency::Daily,
            "weekly" => Frequency::Weekly,
            "monthly" => Frequency::Monthly,
            _ => Frequency::Unknown(value),
        }
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        match value {
            Frequency::Daily => "daily".to_string(),
            Frequency::Weekly => "weekly".to_string(),
            Frequency::Monthly => "monthly".to_string(),
            Frequency::Unknown(other) => other,
        }
    }
}

/// Serde adapter for `HH:MM` times (seconds are accepted on input).
mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, "%H:%M")
            .or_else(|_| NaiveTime::parse_from_str(&s, "%H:%M:%S"))
            .map_err(|_| D::Error::custom(format!("invalid time '{s}', expected HH:MM")))
    }
}
