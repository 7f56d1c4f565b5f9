//! Calendar event types and their wire representations.
//!
//! The stores speak camelCase JSON with ISO-8601 UTC timestamps. Some
//! backends assign Mongo-style `_id` identifiers, so deserialization
//! accepts `_id` as an alias for `id`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A persisted calendar event, as returned by the events store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "wire_time")]
    pub start: DateTime<Utc>,
    #[serde(with = "wire_time")]
    pub end: DateTime<Utc>,
    #[serde(default)]
    pub all_day: bool,
}

/// An outgoing create/update payload.
///
/// Every field is optional and absent fields are omitted from the JSON
/// entirely (never sent as `null`), so a partial update only touches the
/// fields the draft actually defines. Timestamps are typed instants here;
/// they are re-serialized to the UTC wire format on send no matter where
/// the draft came from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "wire_time_opt", skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(with = "wire_time_opt", skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub all_day: Option<bool>,
}

/// Serde adapter for the wire timestamp format.
///
/// Serialization always emits millisecond precision with a `Z` suffix
/// (`2024-03-01T09:00:00.000Z`); deserialization accepts any RFC 3339
/// offset and normalizes to UTC.
pub mod wire_time {
    use super::*;
    use serde::{Deserializer, Serializer, de};

    pub fn serialize<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| de::Error::custom(format!("invalid timestamp: {raw:?}")))
    }
}

/// `Option` variant of [`wire_time`], for draft fields.
pub mod wire_time_opt {
    use super::*;
    use serde::{Deserializer, Serializer};

    pub fn serialize<S>(instant: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match instant {
            Some(instant) => wire_time::serialize(instant, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        wire_time::deserialize(deserializer).map(Some)
    }
}
