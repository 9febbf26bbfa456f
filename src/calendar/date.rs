//! Wrapped calendar dates with explicit invalid values.
//!
//! A [`CalendarDate`] is either a timestamp carrying its UTC offset or the
//! invalid date. Calendar arithmetic (start of day, weekday, month
//! boundaries) is done in the offset the timestamp carries. Every
//! comparison involving an invalid date reports `false` and every
//! arithmetic operation on one yields another invalid date.

use std::fmt::{self, Write};

use chrono::{
    DateTime, Datelike, Duration, FixedOffset, Local, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike, Utc,
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::holidays::HolidayCalendar;

/// Naive layouts accepted by [`CalendarDate::parse_iso`] when the input has no offset.
const NAIVE_ISO_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Units for truncation, comparison and arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeUnit {
    /// A clock minute.
    Minute,
    /// A clock hour.
    Hour,
    /// A calendar day.
    Day,
    /// An ISO week, starting on Monday.
    Week,
    /// A calendar month.
    Month,
    /// A calendar year.
    Year,
}

/// A calendar date value, possibly invalid.
///
/// Built only through named constructors: [`now`](Self::now),
/// [`from_datetime`](Self::from_datetime), [`from_utc`](Self::from_utc),
/// [`parse_iso`](Self::parse_iso),
/// [`parse_with_format`](Self::parse_with_format) and [`invalid`](Self::invalid).
///
/// # Example
///
/// ```
/// use care_pay_engine::calendar::{CalendarDate, TimeUnit};
///
/// let start = CalendarDate::parse_iso("2026-01-17T20:00:00+01:00");
/// let end = start.add(3, TimeUnit::Hour);
/// assert!(end.is_after(&start));
/// assert_eq!(start.weekday(), Some(6)); // Saturday
///
/// let broken = CalendarDate::parse_with_format("17/13/2026", "%d/%m/%Y");
/// assert!(!broken.is_valid());
/// assert!(!broken.is_before(&start));
/// assert!(!broken.add(1, TimeUnit::Day).is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    inner: Option<DateTime<FixedOffset>>,
}

impl CalendarDate {
    /// Returns the current instant in the local offset.
    pub fn now() -> Self {
        Self::from_datetime(Local::now().fixed_offset())
    }

    /// Wraps an absolute timestamp.
    pub fn from_datetime(datetime: DateTime<FixedOffset>) -> Self {
        Self {
            inner: Some(datetime),
        }
    }

    /// Wraps a UTC timestamp, viewed in the given offset.
    pub fn from_utc(datetime: DateTime<Utc>, offset: FixedOffset) -> Self {
        Self::from_datetime(datetime.with_timezone(&offset))
    }

    /// Returns the explicit invalid date.
    pub fn invalid() -> Self {
        Self { inner: None }
    }

    /// Parses an ISO 8601 string.
    ///
    /// RFC 3339 strings keep their offset. Strings without an offset, either
    /// a date-time or a plain `YYYY-MM-DD` date, are read as UTC.
    pub fn parse_iso(value: &str) -> Self {
        let value = value.trim();
        if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
            return Self::from_datetime(datetime);
        }

        let naive = NAIVE_ISO_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d")
                    .ok()
                    .map(|date| date.and_time(NaiveTime::MIN))
            });

        match naive {
            Some(naive) => Self::from_datetime(naive.and_utc().fixed_offset()),
            None => Self::invalid(),
        }
    }

    /// Parses `value` using a strftime-style `pattern`.
    ///
    /// Patterns with an offset specifier keep the parsed offset; patterns
    /// without one are read as UTC, and date-only patterns as midnight UTC.
    pub fn parse_with_format(value: &str, pattern: &str) -> Self {
        if let Ok(datetime) = DateTime::parse_from_str(value, pattern) {
            return Self::from_datetime(datetime);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, pattern) {
            return Self::from_datetime(naive.and_utc().fixed_offset());
        }
        match NaiveDate::parse_from_str(value, pattern) {
            Ok(date) => Self::from_datetime(date.and_time(NaiveTime::MIN).and_utc().fixed_offset()),
            Err(_) => Self::invalid(),
        }
    }

    /// Returns true unless this is the invalid date.
    pub fn is_valid(&self) -> bool {
        self.inner.is_some()
    }

    /// Returns the wrapped timestamp, if valid.
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.inner
    }

    /// Returns the wrapped timestamp or [`EngineError::InvalidDate`].
    pub fn require(&self) -> EngineResult<DateTime<FixedOffset>> {
        self.inner.ok_or_else(|| EngineError::InvalidDate {
            input: self.to_string(),
        })
    }

    /// Returns the calendar day in the carried offset, if valid.
    pub fn date_naive(&self) -> Option<NaiveDate> {
        self.inner.map(|datetime| datetime.date_naive())
    }

    /// Returns true if both dates are valid and `self` is strictly later.
    pub fn is_after(&self, other: &CalendarDate) -> bool {
        matches!((self.inner, other.inner), (Some(a), Some(b)) if a > b)
    }

    /// Returns true if both dates are valid and `self` is strictly earlier.
    pub fn is_before(&self, other: &CalendarDate) -> bool {
        matches!((self.inner, other.inner), (Some(a), Some(b)) if a < b)
    }

    /// Returns true if both dates are valid and `self` is later or equal.
    pub fn is_same_or_after(&self, other: &CalendarDate) -> bool {
        matches!((self.inner, other.inner), (Some(a), Some(b)) if a >= b)
    }

    /// Returns true if both dates are valid and `self` is earlier or equal.
    pub fn is_same_or_before(&self, other: &CalendarDate) -> bool {
        matches!((self.inner, other.inner), (Some(a), Some(b)) if a <= b)
    }

    /// Returns true if `other` falls within the same `unit` as `self`,
    /// where the unit is taken in `self`'s offset.
    pub fn is_same(&self, other: &CalendarDate, unit: TimeUnit) -> bool {
        other.is_same_or_after(&self.start_of(unit)) && other.is_same_or_before(&self.end_of(unit))
    }

    /// Truncates to the first instant of `unit`.
    pub fn start_of(&self, unit: TimeUnit) -> Self {
        Self {
            inner: self.inner.and_then(|datetime| truncate(datetime, unit)),
        }
    }

    /// Returns the last millisecond of `unit`.
    pub fn end_of(&self, unit: TimeUnit) -> Self {
        let next = self.start_of(unit).add(1, unit);
        Self {
            inner: next
                .inner
                .and_then(|datetime| datetime.checked_sub_signed(Duration::milliseconds(1))),
        }
    }

    /// Moves forward by `amount` units. Month arithmetic clamps to the
    /// last day of the target month.
    pub fn add(&self, amount: i64, unit: TimeUnit) -> Self {
        Self {
            inner: self.inner.and_then(|datetime| shift(datetime, amount, unit)),
        }
    }

    /// Moves backward by `amount` units.
    pub fn subtract(&self, amount: i64, unit: TimeUnit) -> Self {
        match amount.checked_neg() {
            Some(negated) => self.add(negated, unit),
            None => Self::invalid(),
        }
    }

    /// Replaces the time of day, keeping the calendar day and offset.
    pub fn at_time(&self, time: NaiveTime) -> Self {
        Self {
            inner: self.inner.and_then(|datetime| {
                datetime
                    .offset()
                    .from_local_datetime(&datetime.date_naive().and_time(time))
                    .single()
            }),
        }
    }

    /// Returns the ISO weekday, 1 for Monday through 7 for Sunday.
    pub fn weekday(&self) -> Option<u32> {
        self.inner
            .map(|datetime| datetime.weekday().number_from_monday())
    }

    /// Returns true if the calendar day, ignoring time of day, is a holiday.
    pub fn is_holiday(&self, calendar: &dyn HolidayCalendar) -> bool {
        self.date_naive()
            .is_some_and(|date| calendar.is_holiday(date))
    }

    /// Returns the whole minutes from `self` to `other`.
    pub fn minutes_until(&self, other: &CalendarDate) -> Option<i64> {
        match (self.inner, other.inner) {
            (Some(a), Some(b)) => Some((b - a).num_minutes()),
            _ => None,
        }
    }

    /// Formats with a strftime-style pattern. Returns `None` for invalid
    /// dates and for patterns chrono cannot render.
    pub fn format(&self, pattern: &str) -> Option<String> {
        let datetime = self.inner?;
        let mut out = String::new();
        write!(out, "{}", datetime.format(pattern)).ok()?;
        Some(out)
    }
}

impl From<DateTime<FixedOffset>> for CalendarDate {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Self::from_datetime(datetime)
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "Invalid date"),
        }
    }
}

fn truncate(datetime: DateTime<FixedOffset>, unit: TimeUnit) -> Option<DateTime<FixedOffset>> {
    let local = datetime.naive_local();
    let date = local.date();
    let naive = match unit {
        TimeUnit::Minute => date.and_hms_opt(local.hour(), local.minute(), 0)?,
        TimeUnit::Hour => date.and_hms_opt(local.hour(), 0, 0)?,
        TimeUnit::Day => date.and_time(NaiveTime::MIN),
        TimeUnit::Week => {
            let days_from_monday = i64::from(date.weekday().num_days_from_monday());
            date.checked_sub_signed(Duration::days(days_from_monday))?
                .and_time(NaiveTime::MIN)
        }
        TimeUnit::Month => date.with_day(1)?.and_time(NaiveTime::MIN),
        TimeUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1)?.and_time(NaiveTime::MIN),
    };
    datetime.offset().from_local_datetime(&naive).single()
}

fn shift(
    datetime: DateTime<FixedOffset>,
    amount: i64,
    unit: TimeUnit,
) -> Option<DateTime<FixedOffset>> {
    let delta = match unit {
        TimeUnit::Minute => Duration::try_minutes(amount)?,
        TimeUnit::Hour => Duration::try_hours(amount)?,
        TimeUnit::Day => Duration::try_days(amount)?,
        TimeUnit::Week => Duration::try_weeks(amount)?,
        TimeUnit::Month => return shift_months(datetime, amount),
        TimeUnit::Year => return shift_months(datetime, amount.checked_mul(12)?),
    };
    datetime.checked_add_signed(delta)
}

fn shift_months(datetime: DateTime<FixedOffset>, amount: i64) -> Option<DateTime<FixedOffset>> {
    let months = Months::new(u32::try_from(amount.unsigned_abs()).ok()?);
    if amount >= 0 {
        datetime.checked_add_months(months)
    } else {
        datetime.checked_sub_months(months)
    }
}
