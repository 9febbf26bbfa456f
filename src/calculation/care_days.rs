//! Care day classification.
//!
//! Fundings count hours only on their care days. A public holiday counts
//! through the holiday code alone: its weekday is ignored, so a funding
//! covering Mondays does not count Easter Monday unless it also covers
//! holidays.

use crate::calendar::{CalendarDate, HolidayCalendar, TimeUnit};
use crate::models::CareDay;

/// Classifies the day of `date` as a care day.
///
/// Returns [`CareDay::Holiday`] for public holidays, the weekday otherwise,
/// and `None` for an invalid date.
///
/// # Example
///
/// ```
/// use care_pay_engine::calculation::classify_care_day;
/// use care_pay_engine::calendar::{CalendarDate, HolidayTable};
/// use care_pay_engine::models::CareDay;
///
/// let holidays = HolidayTable::france();
/// let easter_monday = CalendarDate::parse_iso("2026-04-06T09:00:00+02:00");
/// let next_day = CalendarDate::parse_iso("2026-04-07T09:00:00+02:00");
///
/// assert_eq!(classify_care_day(&easter_monday, &holidays), Some(CareDay::Holiday));
/// assert_eq!(classify_care_day(&next_day, &holidays), Some(CareDay::Tuesday));
/// ```
pub fn classify_care_day(date: &CalendarDate, holidays: &dyn HolidayCalendar) -> Option<CareDay> {
    if date.start_of(TimeUnit::Day).is_holiday(holidays) {
        return Some(CareDay::Holiday);
    }
    date.weekday().and_then(CareDay::from_iso_weekday)
}

/// Returns true if the day of `date` is one of `care_days`.
pub fn is_eligible_care_day(
    date: &CalendarDate,
    care_days: &[CareDay],
    holidays: &dyn HolidayCalendar,
) -> bool {
    classify_care_day(date, holidays).is_some_and(|day| care_days.contains(&day))
}
