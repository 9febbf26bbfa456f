//! Month boundaries and retrieval windows for funding monitoring.
//!
//! The data source applies these windows when fetching fundings and
//! events. Their semantics belong to the monitoring contract, so they live
//! here rather than with any particular source.
//!
//! Months are calendar months of the company's time zone. A month that
//! crosses a daylight saving change starts in one UTC offset and ends in
//! another.

use chrono::{DateTime, Datelike, Duration, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::calendar::CalendarDate;
use crate::error::{EngineError, EngineResult};
use crate::models::{CareEvent, Funding, FundingVersion};

/// The current and previous month around a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitoringMonth {
    start_of_month: CalendarDate,
    end_of_month: CalendarDate,
    start_of_previous_month: CalendarDate,
}

impl MonitoringMonth {
    /// Returns the month of `zone` containing `reference`.
    ///
    /// Fails with [`EngineError::InvalidDate`] for an invalid reference.
    ///
    /// # Example
    ///
    /// ```
    /// use care_pay_engine::calculation::MonitoringMonth;
    /// use care_pay_engine::calendar::CalendarDate;
    /// use chrono_tz::Europe::Paris;
    ///
    /// let reference = CalendarDate::parse_iso("2026-03-14T10:00:00+01:00");
    /// let month = MonitoringMonth::containing(&reference, Paris).unwrap();
    /// assert_eq!(month.start_of_month().to_string(), "2026-03-01T00:00:00+01:00");
    /// assert_eq!(
    ///     month.start_of_previous_month().to_string(),
    ///     "2026-02-01T00:00:00+01:00"
    /// );
    /// ```
    pub fn containing(reference: &CalendarDate, zone: Tz) -> EngineResult<Self> {
        let local = reference.require()?.with_timezone(&zone).date_naive();
        let first_of_month = local.with_day(1).ok_or_else(|| invalid_month(local))?;
        let first_of_next = first_of_month
            .checked_add_months(Months::new(1))
            .ok_or_else(|| invalid_month(local))?;
        let first_of_previous = first_of_month
            .checked_sub_months(Months::new(1))
            .ok_or_else(|| invalid_month(local))?;

        let start_of_next = local_midnight(first_of_next, zone)?;
        let end_of_month = start_of_next
            .checked_sub_signed(Duration::milliseconds(1))
            .ok_or_else(|| invalid_month(local))?;

        Ok(Self {
            start_of_month: CalendarDate::from_datetime(local_midnight(first_of_month, zone)?),
            end_of_month: CalendarDate::from_datetime(end_of_month),
            start_of_previous_month: CalendarDate::from_datetime(local_midnight(
                first_of_previous,
                zone,
            )?),
        })
    }

    /// First instant of the current month.
    pub fn start_of_month(&self) -> CalendarDate {
        self.start_of_month
    }

    /// Last millisecond of the current month.
    pub fn end_of_month(&self) -> CalendarDate {
        self.end_of_month
    }

    /// First instant of the previous month.
    pub fn start_of_previous_month(&self) -> CalendarDate {
        self.start_of_previous_month
    }

    /// Returns true if `date` falls before the current month.
    pub fn is_before_month(&self, date: &CalendarDate) -> bool {
        date.is_before(&self.start_of_month)
    }
}

/// The first instant of `date` in `zone`, in the offset in force then.
fn local_midnight(date: NaiveDate, zone: Tz) -> EngineResult<DateTime<FixedOffset>> {
    zone.from_local_datetime(&date.and_time(NaiveTime::MIN))
        .earliest()
        .map(|datetime| datetime.fixed_offset())
        .ok_or_else(|| EngineError::InvalidDate {
            input: format!("{} 00:00 {}", date, zone),
        })
}

fn invalid_month(date: NaiveDate) -> EngineError {
    EngineError::InvalidDate {
        input: date.format("%Y-%m").to_string(),
    }
}

/// Fundings whose current version is valid at some point of the month:
/// started by the end of the month and not ended before its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FundingValidityWindow {
    /// First instant of the month.
    pub month_start: CalendarDate,
    /// Last millisecond of the month.
    pub month_end: CalendarDate,
}

impl FundingValidityWindow {
    /// Returns the window for `month`.
    pub fn for_month(month: &MonitoringMonth) -> Self {
        Self {
            month_start: month.start_of_month(),
            month_end: month.end_of_month(),
        }
    }

    /// Returns true if `version` is valid during the month.
    pub fn admits_version(&self, version: &FundingVersion) -> bool {
        let started =
            CalendarDate::from_datetime(version.start_date).is_same_or_before(&self.month_end);
        let not_ended = version.end_date.is_none_or(|end| {
            CalendarDate::from_datetime(end).is_same_or_after(&self.month_start)
        });
        started && not_ended
    }

    /// Returns true if the current version of `funding` is valid during the month.
    pub fn admits(&self, funding: &Funding) -> bool {
        funding
            .current_version()
            .is_some_and(|version| self.admits_version(version))
    }
}

/// Events starting between the first instant of the previous month and
/// the end of the current month, both inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    /// First instant of the previous month.
    pub start: CalendarDate,
    /// Last millisecond of the current month.
    pub end: CalendarDate,
}

impl EventWindow {
    /// Returns the window for `month`.
    pub fn for_month(month: &MonitoringMonth) -> Self {
        Self {
            start: month.start_of_previous_month(),
            end: month.end_of_month(),
        }
    }

    /// Returns true if `event` starts inside the window.
    pub fn admits(&self, event: &CareEvent) -> bool {
        let start = event.start();
        start.is_same_or_after(&self.start) && start.is_same_or_before(&self.end)
    }
}
