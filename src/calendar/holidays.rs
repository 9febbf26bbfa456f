//! Public holiday classification.
//!
//! The engine never consults a process-wide holiday table. Callers pass a
//! [`HolidayCalendar`] into each computation, typically the [`HolidayTable`]
//! loaded with the company configuration.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Decides whether a calendar day is a public holiday.
pub trait HolidayCalendar: Send + Sync {
    /// Returns true if `date` is a public holiday.
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// A month and day of month, written `MM/DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MonthDay {
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Creates a month-day, accepting 02/29.
    pub fn new(month: u32, day: u32) -> EngineResult<Self> {
        // 2000 is a leap year, so every day that exists in some year passes.
        NaiveDate::from_ymd_opt(2000, month, day)
            .map(|_| Self { month, day })
            .ok_or_else(|| EngineError::InvalidHoliday {
                value: format!("{:02}/{:02}", month, day),
            })
    }

    /// Returns the month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Returns the day of month.
    pub fn day(&self) -> u32 {
        self.day
    }

    /// Returns this day in `year`, or `None` for 02/29 outside leap years.
    pub fn in_year(&self, year: i32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, self.month, self.day)
    }

    fn matches(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.day() == self.day
    }
}

impl FromStr for MonthDay {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || EngineError::InvalidHoliday {
            value: s.to_string(),
        };
        let (month, day) = s.trim().split_once('/').ok_or_else(invalid)?;
        let month = month.parse().map_err(|_| invalid())?;
        let day = day.parse().map_err(|_| invalid())?;
        Self::new(month, day).map_err(|_| invalid())
    }
}

impl TryFrom<String> for MonthDay {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MonthDay> for String {
    fn from(value: MonthDay) -> Self {
        value.to_string()
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.day)
    }
}

/// A holiday falling on the same day every year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedHoliday {
    /// The name of the holiday.
    pub name: String,
    /// The day it falls on.
    pub date: MonthDay,
}

/// A holiday at a fixed distance from Easter Sunday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovableHoliday {
    /// The name of the holiday.
    pub name: String,
    /// Days after Easter Sunday (negative for days before).
    pub easter_offset: i64,
}

/// A concrete public holiday in a given year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicHoliday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// The name of the holiday.
    pub name: String,
}

/// A table-driven holiday calendar.
///
/// # Example
///
/// ```
/// use care_pay_engine::calendar::{HolidayCalendar, HolidayTable};
/// use chrono::NaiveDate;
///
/// let holidays = HolidayTable::france();
/// // Easter Monday 2026
/// assert!(holidays.is_holiday(NaiveDate::from_ymd_opt(2026, 4, 6).unwrap()));
/// assert!(!holidays.is_holiday(NaiveDate::from_ymd_opt(2026, 4, 7).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayTable {
    /// The name of the calendar (e.g., "France").
    pub name: String,
    /// Holidays on a fixed day.
    #[serde(default)]
    pub fixed: Vec<FixedHoliday>,
    /// Holidays relative to Easter.
    #[serde(default)]
    pub movable: Vec<MovableHoliday>,
}

impl HolidayTable {
    /// The French public holidays.
    pub fn france() -> Self {
        let fixed = [
            (1, 1, "Jour de l'an"),
            (5, 1, "Fête du travail"),
            (5, 8, "Victoire 1945"),
            (7, 14, "Fête nationale"),
            (8, 15, "Assomption"),
            (11, 1, "Toussaint"),
            (11, 11, "Armistice 1918"),
            (12, 25, "Noël"),
        ]
        .into_iter()
        .map(|(month, day, name)| FixedHoliday {
            name: name.to_string(),
            date: MonthDay { month, day },
        })
        .collect();

        let movable = [
            (1, "Lundi de Pâques"),
            (39, "Ascension"),
            (50, "Lundi de Pentecôte"),
        ]
        .into_iter()
        .map(|(easter_offset, name)| MovableHoliday {
            name: name.to_string(),
            easter_offset,
        })
        .collect();

        Self {
            name: "France".to_string(),
            fixed,
            movable,
        }
    }

    /// Lists the holidays of `year` in date order.
    pub fn holidays_in_year(&self, year: i32) -> Vec<PublicHoliday> {
        let mut holidays: Vec<PublicHoliday> = self
            .fixed
            .iter()
            .filter_map(|h| {
                h.date.in_year(year).map(|date| PublicHoliday {
                    date,
                    name: h.name.clone(),
                })
            })
            .collect();

        if let Some(easter) = easter_sunday(year) {
            holidays.extend(self.movable.iter().filter_map(|h| {
                offset_from_easter(easter, h.easter_offset).map(|date| PublicHoliday {
                    date,
                    name: h.name.clone(),
                })
            }));
        }

        holidays.sort_by(|a, b| a.date.cmp(&b.date));
        holidays
    }
}

impl HolidayCalendar for HolidayTable {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        if self.fixed.iter().any(|h| h.date.matches(date)) {
            return true;
        }
        if self.movable.is_empty() {
            return false;
        }
        easter_sunday(date.year()).is_some_and(|easter| {
            self.movable
                .iter()
                .any(|h| offset_from_easter(easter, h.easter_offset) == Some(date))
        })
    }
}

fn offset_from_easter(easter: NaiveDate, days: i64) -> Option<NaiveDate> {
    easter.checked_add_signed(Duration::try_days(days)?)
}

/// Computes Easter Sunday for a Gregorian `year` (anonymous Gregorian algorithm).
///
/// # Example
///
/// ```
/// use care_pay_engine::calendar::easter_sunday;
/// use chrono::NaiveDate;
///
/// assert_eq!(easter_sunday(2026), NaiveDate::from_ymd_opt(2026, 4, 5));
/// ```
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    if year < 1583 {
        return None;
    }
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    NaiveDate::from_ymd_opt(year, u32::try_from(month).ok()?, u32::try_from(day).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_sunday_known_years() {
        assert_eq!(easter_sunday(2019), Some(make_date(2019, 4, 21)));
        assert_eq!(easter_sunday(2024), Some(make_date(2024, 3, 31)));
        assert_eq!(easter_sunday(2025), Some(make_date(2025, 4, 20)));
        assert_eq!(easter_sunday(2026), Some(make_date(2026, 4, 5)));
        assert_eq!(easter_sunday(1500), None);
    }

    #[test]
    fn test_france_fixed_holidays() {
        let holidays = HolidayTable::france();
        assert!(holidays.is_holiday(make_date(2026, 1, 1)));
        assert!(holidays.is_holiday(make_date(2026, 5, 1)));
        assert!(holidays.is_holiday(make_date(2026, 7, 14)));
        assert!(holidays.is_holiday(make_date(2026, 12, 25)));
        assert!(!holidays.is_holiday(make_date(2026, 12, 24)));
        assert!(!holidays.is_holiday(make_date(2026, 12, 26)));
    }

    #[test]
    fn test_france_movable_holidays_2025() {
        let holidays = HolidayTable::france();
        assert!(holidays.is_holiday(make_date(2025, 4, 21))); // Easter Monday
        assert!(holidays.is_holiday(make_date(2025, 5, 29))); // Ascension
        assert!(holidays.is_holiday(make_date(2025, 6, 9))); // Whit Monday
        assert!(!holidays.is_holiday(make_date(2025, 4, 20))); // Easter Sunday itself
    }

    #[test]
    fn test_holidays_in_year_sorted_and_complete() {
        let holidays = HolidayTable::france().holidays_in_year(2026);
        assert_eq!(holidays.len(), 11);
        assert!(holidays.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(holidays[0].name, "Jour de l'an");
        assert_eq!(holidays[1].date, make_date(2026, 4, 6));
        assert_eq!(holidays.last().unwrap().name, "Noël");
    }

    #[test]
    fn test_leap_day_holiday_skipped_in_common_years() {
        let table = HolidayTable {
            name: "Leap".to_string(),
            fixed: vec![FixedHoliday {
                name: "Leap day".to_string(),
                date: "02/29".parse().unwrap(),
            }],
            movable: vec![],
        };
        assert_eq!(table.holidays_in_year(2024).len(), 1);
        assert!(table.holidays_in_year(2025).is_empty());
        assert!(table.is_holiday(make_date(2024, 2, 29)));
    }

    #[test]
    fn test_month_day_parsing() {
        let day: MonthDay = "12/25".parse().unwrap();
        assert_eq!((day.month(), day.day()), (12, 25));
        assert_eq!(day.to_string(), "12/25");

        assert!("13/01".parse::<MonthDay>().is_err());
        assert!("04/31".parse::<MonthDay>().is_err());
        assert!("12-25".parse::<MonthDay>().is_err());
    }

    #[test]
    fn test_table_deserializes_from_yaml() {
        let yaml = r#"
name: Test
fixed:
  - name: Christmas
    date: "12/25"
movable:
  - name: Good Friday
    easter_offset: -2
"#;
        let table: HolidayTable = serde_yaml::from_str(yaml).unwrap();
        assert!(table.is_holiday(make_date(2026, 12, 25)));
        assert!(table.is_holiday(make_date(2026, 4, 3)));
        assert!(!table.is_holiday(make_date(2026, 4, 6)));
    }

    #[test]
    fn test_table_rejects_bad_month_day_in_yaml() {
        let yaml = r#"
name: Test
fixed:
  - name: Nowhere
    date: "02/30"
"#;
        assert!(serde_yaml::from_str::<HolidayTable>(yaml).is_err());
    }
}
