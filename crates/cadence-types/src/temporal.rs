use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::error::TypeError;

/// Wall-clock instant used for publication dates.
pub type Timestamp = DateTime<Utc>;

/// Parse an ISO 8601 date string.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, `2024-05-01T12:00:00+02:00`),
/// the same with seconds omitted (`2024-05-01T10:00Z`,
/// `2024-05-01T12:00+02:00`), a naive date-time read as UTC
/// (`2024-05-01T10:00:00.250`, `2024-05-01T10:00`), and a bare date read as
/// midnight UTC (`2024-05-01`).
pub fn parse_timestamp(value: &str) -> Result<Timestamp, TypeError> {
    let trimmed = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M%:z") {
        return Ok(dt.with_timezone(&Utc));
    }
    let local = trimmed.strip_suffix(['Z', 'z']).unwrap_or(trimmed);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(local, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(midnight.and_utc());
        }
    }
    Err(TypeError::InvalidTimestamp {
        value: value.to_string(),
    })
}

/// Serde adapter that reads timestamps through [`parse_timestamp`] and
/// writes them as RFC 3339.
pub mod iso_timestamp {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::{parse_timestamp, Timestamp};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    /// Same as the parent module for `Option<Timestamp>` fields.
    pub mod option {
        use serde::{Deserialize, Deserializer, Serializer};

        use super::super::{parse_timestamp, Timestamp};

        pub fn serialize<S: Serializer>(
            ts: &Option<Timestamp>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match ts {
                Some(ts) => super::serialize(ts, serializer),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Timestamp>, D::Error> {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|s| parse_timestamp(&s).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}

/// Source of the current time.
///
/// Publication status is derived from the clock on every operation, so the
/// services take a `Clock` instead of calling `Utc::now()` directly.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The system wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// A clock that only moves when told to. Used in tests and simulations.
pub struct ManualClock {
    now: RwLock<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: RwLock::new(start),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: Timestamp) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now = instant;
    }

    /// Move the clock forward (or backward, for a negative duration).
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.write().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.read().unwrap_or_else(|e| e.into_inner())
    }
}

impl fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualClock").field("now", &self.now()).finish()
    }
}
