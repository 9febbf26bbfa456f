//! Time-of-day values in `HH:mm` form.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::date::CalendarDate;

/// A daily clock time such as `21:00`, used for surcharge windows.
///
/// Serialized as an `HH:mm` string.
///
/// # Example
///
/// ```
/// use care_pay_engine::calendar::ClockTime;
///
/// let evening: ClockTime = "21:30".parse().unwrap();
/// assert_eq!(evening.to_string(), "21:30");
/// assert!("24:00".parse::<ClockTime>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Creates a clock time from an hour (0-23) and a minute (0-59).
    pub fn new(hour: u32, minute: u32) -> EngineResult<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0)
            .map(Self)
            .ok_or_else(|| EngineError::InvalidTimeOfDay {
                value: format!("{:02}:{:02}", hour, minute),
            })
    }

    /// Returns the underlying time of day.
    pub fn time(&self) -> NaiveTime {
        self.0
    }

    /// Returns the hour component.
    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    /// Returns the minute component.
    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    /// Anchors this clock time to the calendar day of `day`.
    pub fn on(&self, day: &CalendarDate) -> CalendarDate {
        day.at_time(self.0)
    }
}

impl FromStr for ClockTime {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| EngineError::InvalidTimeOfDay {
                value: s.to_string(),
            })
    }
}

impl TryFrom<String> for ClockTime {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_times() {
        let time: ClockTime = "06:00".parse().unwrap();
        assert_eq!((time.hour(), time.minute()), (6, 0));

        let time: ClockTime = "23:59".parse().unwrap();
        assert_eq!((time.hour(), time.minute()), (23, 59));
    }

    #[test]
    fn test_parse_invalid_times() {
        for value in ["24:00", "12:60", "noon", "", "12"] {
            match value.parse::<ClockTime>() {
                Err(EngineError::InvalidTimeOfDay { value: rejected }) => {
                    assert_eq!(rejected, value)
                }
                other => panic!("Expected InvalidTimeOfDay for {:?}, got {:?}", value, other),
            }
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(ClockTime::new(21, 0).is_ok());
        assert!(ClockTime::new(25, 0).is_err());
    }

    #[test]
    fn test_ordering() {
        let morning = ClockTime::new(6, 0).unwrap();
        let evening = ClockTime::new(21, 0).unwrap();
        assert!(morning < evening);
    }

    #[test]
    fn test_serde_as_hh_mm_string() {
        let time = ClockTime::new(7, 5).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"07:05\"");

        let parsed: ClockTime = serde_json::from_str("\"21:00\"").unwrap();
        assert_eq!(parsed, ClockTime::new(21, 0).unwrap());

        assert!(serde_json::from_str::<ClockTime>("\"9pm\"").is_err());
    }

    #[test]
    fn test_on_anchors_to_day() {
        let day = CalendarDate::parse_iso("2026-01-15T14:37:00+01:00");
        let anchored = ClockTime::new(21, 0).unwrap().on(&day);
        assert_eq!(anchored.to_string(), "2026-01-15T21:00:00+01:00");
    }
}
