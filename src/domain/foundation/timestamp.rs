//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// Naive layouts accepted by [`Timestamp::parse_flexible`], interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses an ISO-8601 timestamp as written by the preference pipeline.
    ///
    /// Accepts RFC 3339 (`Z` or numeric offset), naive date-times with or
    /// without fractional seconds (read as UTC), and bare dates.
    pub fn parse_flexible(raw: &str) -> Result<Self, ValidationError> {
        let raw = raw.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(Self(dt.with_timezone(&Utc)));
        }

        let naive = raw.strip_suffix('Z').unwrap_or(raw);
        for format in NAIVE_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
                return Ok(Self(dt.and_utc()));
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(naive, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return Ok(Self(dt.and_utc()));
            }
        }

        Err(ValidationError::invalid_format(
            "timestamp",
            format!("'{}' is not an ISO-8601 timestamp", raw),
        ))
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Fractional days elapsed from `other` to `self`.
    pub fn days_since(&self, other: &Timestamp) -> f64 {
        let duration = self.duration_since(other);
        let seconds = duration.num_seconds() as f64
            + f64::from(duration.subsec_nanos()) / 1_000_000_000.0;
        seconds / SECONDS_PER_DAY
    }

    /// Creates a new timestamp by subtracting the specified number of days.
    ///
    /// Saturates at the earliest representable instant, so an oversized
    /// window covers all history.
    pub fn minus_days(&self, days: i64) -> Self {
        Duration::try_days(days)
            .and_then(|d| self.0.checked_sub_signed(d))
            .map(Self)
            .unwrap_or(Self(if days >= 0 {
                DateTime::<Utc>::MIN_UTC
            } else {
                DateTime::<Utc>::MAX_UTC
            }))
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Saturates at the latest representable instant.
    pub fn plus_days(&self, days: i64) -> Self {
        Duration::try_days(days)
            .and_then(|d| self.0.checked_add_signed(d))
            .map(Self)
            .unwrap_or(Self(if days >= 0 {
                DateTime::<Utc>::MAX_UTC
            } else {
                DateTime::<Utc>::MIN_UTC
            }))
    }

    /// RFC 3339 rendering with microsecond precision and a `Z` suffix.
    pub fn to_rfc3339(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Micros, true)
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}
