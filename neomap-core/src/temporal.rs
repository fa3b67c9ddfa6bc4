//! Temporal targets (chrono) and duration reconstruction.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::NeomapError;
use crate::traits::{required, FromValue};
use crate::value::{IsoDuration, Value};

/// A time of day with a fixed UTC offset (Neo4j `Time`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OffsetTime {
    pub time: NaiveTime,
    pub offset: FixedOffset,
}

/// A date-time bound to a named time zone (Neo4j `DateTime` with a zone id).
///
/// `datetime` carries the offset in effect at that instant; `zone_id` keeps
/// the zone name as stored, e.g. `Europe/Stockholm`. Values stored with a
/// plain offset use the offset's rendering (`+02:00`) as the zone id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZonedDateTime {
    pub datetime: DateTime<FixedOffset>,
    pub zone_id: String,
}

/// A calendar period: months and days, with no fixed length in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Period {
    pub months: i64,
    pub days: i64,
}

impl Period {
    pub const ZERO: Period = Period { months: 0, days: 0 };

    pub fn new(months: i64, days: i64) -> Self {
        Self { months, days }
    }

    pub fn plus_months(self, months: i64) -> Self {
        Self { months: self.months + months, ..self }
    }

    pub fn plus_days(self, days: i64) -> Self {
        Self { days: self.days + days, ..self }
    }
}

// ---------------------------------------------------------------------------
// Dates and times
// ---------------------------------------------------------------------------

impl FromValue for NaiveDate {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Date(d) => Ok(d),
            other => Err(NeomapError::type_mismatch(field, "Date", &other)),
        }
    }
}

impl FromValue for NaiveTime {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::LocalTime(t) => Ok(t),
            other => Err(NeomapError::type_mismatch(field, "LocalTime", &other)),
        }
    }
}

impl FromValue for OffsetTime {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Time(time, offset) => Ok(OffsetTime { time, offset }),
            other => Err(NeomapError::type_mismatch(field, "Time", &other)),
        }
    }
}

impl FromValue for NaiveDateTime {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::LocalDateTime(dt) => Ok(dt),
            other => Err(NeomapError::type_mismatch(field, "LocalDateTime", &other)),
        }
    }
}

/// Accepts both offset and zone-id date-times.
impl FromValue for DateTime<FixedOffset> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::DateTime(dt) | Value::DateTimeZoneId(dt, _) => Ok(dt),
            other => Err(NeomapError::type_mismatch(field, "DateTime", &other)),
        }
    }
}

/// An instant: any zoned date-time, normalized to UTC.
impl FromValue for DateTime<Utc> {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::DateTime(dt) | Value::DateTimeZoneId(dt, _) => Ok(dt.with_timezone(&Utc)),
            other => Err(NeomapError::type_mismatch(field, "DateTime", &other)),
        }
    }
}

impl FromValue for ZonedDateTime {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::DateTimeZoneId(datetime, zone_id) => Ok(ZonedDateTime { datetime, zone_id }),
            Value::DateTime(datetime) => Ok(ZonedDateTime {
                zone_id: datetime.offset().to_string(),
                datetime,
            }),
            other => Err(NeomapError::type_mismatch(field, "DateTimeZoneId", &other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Durations
// ---------------------------------------------------------------------------

/// Build a clock duration from zero by adding days, seconds and nanoseconds.
/// Months have no fixed length and are ignored.
pub fn clock_duration(field: &str, d: IsoDuration) -> Result<chrono::Duration, NeomapError> {
    let overflow = || NeomapError::malformed(field, format!("duration {d} does not fit a clock duration"));
    let days = chrono::Duration::try_days(d.days).ok_or_else(overflow)?;
    let seconds = chrono::Duration::try_seconds(d.seconds).ok_or_else(overflow)?;
    let nanos = chrono::Duration::nanoseconds(d.nanoseconds);
    chrono::Duration::zero()
        .checked_add(&days)
        .and_then(|acc| acc.checked_add(&seconds))
        .and_then(|acc| acc.checked_add(&nanos))
        .ok_or_else(overflow)
}

/// Build a calendar period from zero by adding months and days.
pub fn calendar_period(d: IsoDuration) -> Period {
    Period::ZERO.plus_months(d.months).plus_days(d.days)
}

impl FromValue for chrono::Duration {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Duration(d) => clock_duration(field, d),
            other => Err(NeomapError::type_mismatch(field, "Duration", &other)),
        }
    }
}

/// Like [`chrono::Duration`], but negative durations are malformed.
impl FromValue for std::time::Duration {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Duration(d) => clock_duration(field, d)?.to_std().map_err(|_| {
                NeomapError::malformed(field, format!("duration {d} is negative"))
            }),
            other => Err(NeomapError::type_mismatch(field, "Duration", &other)),
        }
    }
}

impl FromValue for Period {
    fn from_value(field: &str, value: Option<Value>) -> Result<Self, NeomapError> {
        match required(field, value)? {
            Value::Duration(d) => Ok(calendar_period(d)),
            other => Err(NeomapError::type_mismatch(field, "Duration", &other)),
        }
    }
}
