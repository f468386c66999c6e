//! Serde adapter for Twitter timestamps.
//!
//! The REST surface renders `Wed May 02 03:04:54 +0000 2007`; the Search
//! surface uses RFC 2822 (`Wed, 02 May 2007 03:04:54 +0000`). Both are
//! accepted; values are written back in the REST form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer};

const REST_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

pub(crate) fn parse(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, REST_FORMAT)
        .or_else(|_| DateTime::parse_from_rfc2822(value))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

pub(crate) fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(dt) => serializer.serialize_str(&dt.format(REST_FORMAT).to_string()),
        None => serializer.serialize_none(),
    }
}

pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => parse(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized timestamp '{s}'"))),
    }
}
