//! Timestamp parsing for claim and revert records
//!
//! Source files carry ISO-8601 timestamps, usually without an offset
//! (`2024-03-01T21:09:01`). Offset-qualified values are normalized to UTC.

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

/// Parses a record timestamp
///
/// # Errors
///
/// Returns an error if the value is neither a naive ISO-8601 date-time
/// nor an RFC 3339 date-time with offset.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime, String> {
    let value = value.trim();
    if let Ok(naive) = NaiveDateTime::from_str(value) {
        return Ok(naive);
    }
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.naive_utc())
        .map_err(|e| format!("invalid timestamp '{value}': {e}"))
}

/// Serde adapter for [`parse_timestamp`]
pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}
