//! Date keys for the planning board
//!
//! A `DateKey` is the Unix-millisecond timestamp of a day's midnight (UTC).
//! The wire format stores raw millisecond values, and `dailyRoutines` maps
//! are keyed by them; serde_json renders integer map keys as strings, which
//! reproduces the persisted object shape exactly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Milliseconds in one day
const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// A calendar-day key: Unix milliseconds at day boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(i64);

// Accepts the number itself and its stringified map-key form; the latter is
// what surrounding `#[serde(flatten)]` containers hand us for object keys.
impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct KeyVisitor;

        impl serde::de::Visitor<'_> for KeyVisitor {
            type Value = DateKey;

            fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str("a Unix-millisecond timestamp (number or string)")
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<DateKey, E> {
                Ok(DateKey(v))
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<DateKey, E> {
                Ok(DateKey(v as i64))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<DateKey, E> {
                v.parse().map(DateKey).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(KeyVisitor)
    }
}

impl DateKey {
    /// Wrap a raw millisecond timestamp
    pub fn from_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Build a key from a calendar date (midnight UTC)
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let midnight = date.and_hms_opt(0, 0, 0)?;
        Some(Self(midnight.and_utc().timestamp_millis()))
    }

    /// Raw millisecond value
    pub fn as_millis(&self) -> i64 {
        self.0
    }

    /// The following day
    pub fn succ(&self) -> Self {
        Self(self.0 + DAY_MS)
    }

    /// The preceding day
    pub fn pred(&self) -> Self {
        Self(self.0 - DAY_MS)
    }

    /// Inclusive range of day keys from self to end
    pub fn range_to(&self, end: DateKey) -> Vec<DateKey> {
        let mut days = Vec::new();
        let mut cur = *self;
        while cur <= end {
            days.push(cur);
            cur = cur.succ();
        }
        days
    }

    /// Render as a calendar date when the key lands on a day boundary
    pub fn to_date(&self) -> Option<NaiveDate> {
        DateTime::<Utc>::from_timestamp_millis(self.0).map(|dt| dt.date_naive())
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DateKey {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for DateKey {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}
