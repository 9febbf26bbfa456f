//! Surcharged hours totals for payroll.
//!
//! Payroll pays each surcharge as a number of hours at a percentage. This
//! module resolves the surcharges of a batch of events and totals their
//! hours per rule and percentage.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::HolidayCalendar;
use crate::models::{CareEvent, SurchargePolicy, SurchargeRule};

use super::surcharge_resolver::resolve_event_surcharges;

/// Total surcharged hours for one rule at one percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurchargedHours {
    /// The rule.
    pub rule: SurchargeRule,
    /// The percentage paid.
    pub percentage: Decimal,
    /// Hours surcharged at this percentage.
    pub hours: Decimal,
}

/// Totals the surcharged hours of `events`, in rule priority order.
///
/// Events carrying their own policy are resolved against it; all others
/// against `company_policy`. Different percentages for the same rule (from
/// event overrides) are kept apart.
pub fn summarize_surcharged_hours(
    events: &[CareEvent],
    company_policy: &SurchargePolicy,
    holidays: &dyn HolidayCalendar,
) -> Vec<SurchargedHours> {
    let mut totals: BTreeMap<(SurchargeRule, Decimal), Decimal> = BTreeMap::new();

    for event in events {
        for surcharge in resolve_event_surcharges(event, company_policy, holidays) {
            *totals
                .entry((surcharge.rule, surcharge.percentage))
                .or_insert(Decimal::ZERO) += surcharge.hours(event);
        }
    }

    totals
        .into_iter()
        .map(|((rule, percentage), hours)| SurchargedHours {
            rule,
            percentage,
            hours,
        })
        .collect()
}
