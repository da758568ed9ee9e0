//! # Temporal Types — Fixed-Format Timestamps
//!
//! Enrollment periods are exchanged as naive (zone-less) timestamps in the
//! single textual form `YYYY-MM-DDTHH:MM:SS`. [`Timestamp`] is the only
//! way such a value enters the object graph.
//!
//! ## Invariant
//!
//! Parsing is strict in both senses: the literal must match the format
//! exactly, and it must denote a real calendar instant. A lexically
//! well-formed value such as `2100-01-32T00:00:00` is rejected.

use chrono::{NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidFormatError;

/// The exchange format for every timestamp in a registry document.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A calendar timestamp with seconds precision and no time zone.
///
/// # Construction
///
/// - [`Timestamp::parse()`] — from the exchange format, rejecting anything else.
/// - [`Timestamp::from_ymd_hms()`] — from calendar fields, `None` when out of range.
/// - [`Timestamp::now()`] — current UTC wall-clock time, truncated to seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    /// Parse a timestamp in the `YYYY-MM-DDTHH:MM:SS` format.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidFormatError::InvalidDate`] carrying the original
    /// literal when the string does not match the format or names a
    /// non-existent calendar date or time.
    pub fn parse(s: &str) -> Result<Self, InvalidFormatError> {
        let parsed = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
            .map_err(|_| InvalidFormatError::invalid_date(s))?;

        // chrono accepts leap seconds, unpadded fields and a signed year.
        if parsed.nanosecond() >= 1_000_000_000 {
            return Err(InvalidFormatError::invalid_date(s));
        }
        let ts = Self(parsed);
        if s.len() != 19 || ts.to_iso8601() != s {
            return Err(InvalidFormatError::invalid_date(s));
        }
        Ok(ts)
    }

    /// Build a timestamp from calendar fields.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)?
            .and_hms_opt(hour, min, sec)
            .map(Self)
    }

    /// Current UTC time, truncated to seconds.
    pub fn now() -> Self {
        let now = Utc::now().naive_utc();
        Self(now.with_nanosecond(0).unwrap_or(now))
    }

    /// Access the inner `NaiveDateTime`.
    pub fn as_datetime(&self) -> &NaiveDateTime {
        &self.0
    }

    /// Render in the exchange format.
    pub fn to_iso8601(&self) -> String {
        self.0.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

impl std::str::FromStr for Timestamp {
    type Err = InvalidFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso8601())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
