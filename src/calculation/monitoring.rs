//! Funding monitoring: monthly care hours per funding.
//!
//! For each funding valid in the reference month, the events of its
//! subscription are split at the first instant of the month into
//! previous-month and current-month events, and each side is totalled
//! over the events that fall on a care day within the funding's validity.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use chrono_tz::Tz;
use rust_decimal::Decimal;
use tracing::{debug, info, trace};
use uuid::Uuid;

use crate::calendar::{CalendarDate, HolidayCalendar};
use crate::error::EngineResult;
use crate::models::{
    CareEvent, EffectiveFunding, Funding, FundingMonitoringResult, PREV_MONTH_NOT_APPLICABLE,
};
use crate::source::MonitoringDataSource;

use super::care_days::is_eligible_care_day;
use super::windows::{EventWindow, FundingValidityWindow, MonitoringMonth};

/// Why an event does not count toward a funding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The event's day is not one of the funding's care days.
    NotCareDay,
    /// The event starts before the funding.
    NotStarted,
    /// The event starts on or after the funding's end.
    Ended,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotCareDay => write!(f, "not a care day"),
            SkipReason::NotStarted => write!(f, "funding not started"),
            SkipReason::Ended => write!(f, "funding ended"),
        }
    }
}

/// Returns why `event` does not count toward `funding`, or `None` if it counts.
pub fn skip_reason(
    event: &CareEvent,
    funding: &EffectiveFunding<'_>,
    holidays: &dyn HolidayCalendar,
) -> Option<SkipReason> {
    let start = event.start();
    if !is_eligible_care_day(&start, &funding.version.care_days, holidays) {
        return Some(SkipReason::NotCareDay);
    }
    if start.is_before(&funding.start()) {
        return Some(SkipReason::NotStarted);
    }
    if funding.end().is_some_and(|end| start.is_same_or_after(&end)) {
        return Some(SkipReason::Ended);
    }
    None
}

/// Totals the care hours of `events` that count toward `funding`.
///
/// Durations are summed in minutes and converted to hours once, so the
/// result is exact and independent of event order.
pub fn month_care_hours(
    events: &[&CareEvent],
    funding: &EffectiveFunding<'_>,
    holidays: &dyn HolidayCalendar,
) -> Decimal {
    let minutes: i64 = events
        .iter()
        .filter(|event| match skip_reason(event, funding, holidays) {
            Some(reason) => {
                trace!(
                    event_id = %event.id,
                    funding_id = %funding.id(),
                    reason = %reason,
                    "Event skipped"
                );
                false
            }
            None => true,
        })
        .map(|event| event.duration_minutes())
        .sum();

    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Computes the monitoring results for already-fetched fundings and events.
///
/// Events are matched to fundings by subscription. `events` are expected to
/// be filtered by the data source already (see [`EventWindow`] and
/// [`CareEvent::counts_for_monitoring`]). Fundings without versions are
/// ignored. Results are ordered by payer name, then funding ID.
///
/// # Example
///
/// ```
/// use care_pay_engine::calculation::{MonitoringMonth, compute_monitoring_for};
/// use care_pay_engine::calendar::{CalendarDate, HolidayTable};
/// use chrono_tz::Europe::Paris;
///
/// let reference = CalendarDate::parse_iso("2026-03-14T10:00:00+01:00");
/// let month = MonitoringMonth::containing(&reference, Paris).unwrap();
/// let results = compute_monitoring_for(&[], &[], &month, &HolidayTable::france());
/// assert!(results.is_empty());
/// ```
pub fn compute_monitoring_for(
    fundings: &[Funding],
    events: &[CareEvent],
    month: &MonitoringMonth,
    holidays: &dyn HolidayCalendar,
) -> Vec<FundingMonitoringResult> {
    let mut effective: Vec<EffectiveFunding<'_>> =
        fundings.iter().filter_map(Funding::effective).collect();
    effective.sort_by(|a, b| {
        a.third_party_payer_name()
            .cmp(b.third_party_payer_name())
            .then_with(|| a.id().cmp(&b.id()))
    });

    effective
        .iter()
        .map(|funding| monitor_funding(funding, events, month, holidays))
        .collect()
}

fn monitor_funding(
    funding: &EffectiveFunding<'_>,
    events: &[CareEvent],
    month: &MonitoringMonth,
    holidays: &dyn HolidayCalendar,
) -> FundingMonitoringResult {
    let (prev_month_events, current_month_events): (Vec<&CareEvent>, Vec<&CareEvent>) = events
        .iter()
        .filter(|event| event.subscription_id == funding.subscription_id())
        .partition(|event| month.is_before_month(&event.start()));

    let current_month_care_hours = month_care_hours(&current_month_events, funding, holidays);
    let prev_month_care_hours = if month.is_before_month(&funding.start()) {
        month_care_hours(&prev_month_events, funding, holidays)
    } else {
        PREV_MONTH_NOT_APPLICABLE
    };

    debug!(
        funding_id = %funding.id(),
        third_party_payer = funding.third_party_payer_name(),
        prev_month_events = prev_month_events.len(),
        current_month_events = current_month_events.len(),
        prev_month_care_hours = %prev_month_care_hours,
        current_month_care_hours = %current_month_care_hours,
        "Funding monitored"
    );

    FundingMonitoringResult {
        third_party_payer: funding.third_party_payer_name().to_string(),
        care_hours: funding.care_hours(),
        prev_month_care_hours,
        current_month_care_hours,
    }
}

/// Fetches fundings and events for a customer and computes their monitoring.
///
/// Months are taken in the company's time zone. Clones share the data
/// source and holiday calendar.
#[derive(Clone)]
pub struct FundingMonitor {
    source: Arc<dyn MonitoringDataSource>,
    holidays: Arc<dyn HolidayCalendar>,
    zone: Tz,
}

impl FundingMonitor {
    /// Creates a monitor over `source`, classifying days with `holidays` and
    /// cutting months in `zone`.
    pub fn new(
        source: Arc<dyn MonitoringDataSource>,
        holidays: Arc<dyn HolidayCalendar>,
        zone: Tz,
    ) -> Self {
        Self {
            source,
            holidays,
            zone,
        }
    }

    /// Computes the monitoring of every funding of `customer_id` valid in
    /// the month containing `reference_date`.
    ///
    /// Returns an empty list when the customer has no such funding. Fails
    /// with [`crate::error::EngineError::InvalidDate`] for an invalid
    /// reference date, and propagates data source errors.
    pub fn compute_monitoring(
        &self,
        customer_id: Uuid,
        reference_date: &CalendarDate,
    ) -> EngineResult<Vec<FundingMonitoringResult>> {
        let started = Instant::now();
        let month = MonitoringMonth::containing(reference_date, self.zone)?;
        let month_label = month.start_of_month().format("%Y-%m").unwrap_or_default();

        let fundings = self
            .source
            .fundings(customer_id, &FundingValidityWindow::for_month(&month))?;
        if fundings.is_empty() {
            info!(
                customer_id = %customer_id,
                month = %month_label,
                "No funding to monitor"
            );
            return Ok(Vec::new());
        }

        let mut subscription_ids: Vec<Uuid> =
            fundings.iter().map(|f| f.subscription_id).collect();
        subscription_ids.sort();
        subscription_ids.dedup();

        let events = self.source.events(
            customer_id,
            &subscription_ids,
            &EventWindow::for_month(&month),
        )?;

        let results = compute_monitoring_for(&fundings, &events, &month, self.holidays.as_ref());

        info!(
            customer_id = %customer_id,
            month = %month_label,
            zone = %self.zone,
            fundings = fundings.len(),
            events = events.len(),
            duration_us = started.elapsed().as_micros(),
            "Funding monitoring computed"
        );

        Ok(results)
    }
}
