//! Calendar utilities for the Care Pay Engine.
//!
//! This module provides the wrapped [`CalendarDate`] used by every other
//! component, the `HH:mm` [`ClockTime`] used by surcharge windows, and the
//! injectable [`HolidayCalendar`] classifier with its table-driven
//! implementation.
//!
//! # Example
//!
//! ```
//! use care_pay_engine::calendar::{CalendarDate, HolidayTable, TimeUnit};
//!
//! let holidays = HolidayTable::france();
//! let bastille_day = CalendarDate::parse_iso("2026-07-14T10:00:00+02:00");
//! assert!(bastille_day.is_holiday(&holidays));
//! assert_eq!(bastille_day.start_of(TimeUnit::Month).format("%Y-%m-%d").unwrap(), "2026-07-01");
//! ```

mod clock_time;
mod date;
mod holidays;

pub use clock_time::ClockTime;
pub use date::{CalendarDate, TimeUnit};
pub use holidays::{
    FixedHoliday, HolidayCalendar, HolidayTable, MonthDay, MovableHoliday, PublicHoliday,
    easter_sunday,
};
