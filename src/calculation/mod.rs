//! Calculation logic for the Care Pay Engine.
//!
//! This module contains the surcharge resolver (fixed-date and windowed
//! rules), care day classification, monitoring month and retrieval windows,
//! funding monitoring, surcharged hours totals and subscription funding
//! validation.

mod care_days;
mod funding_overlap;
mod intersection;
mod monitoring;
mod surcharge_hours;
mod surcharge_resolver;
mod windows;

pub use care_days::{classify_care_day, is_eligible_care_day};
pub use funding_overlap::validate_subscription_fundings;
pub use intersection::Interval;
pub use monitoring::{
    FundingMonitor, SkipReason, compute_monitoring_for, month_care_hours, skip_reason,
};
pub use surcharge_hours::{SurchargedHours, summarize_surcharged_hours};
pub use surcharge_resolver::{
    FIXED_DATE_RULES, FixedDateRule, WINDOWED_RULES, WindowedRule, anchored_window,
    resolve_event_surcharges, resolve_surcharges,
};
pub use windows::{EventWindow, FundingValidityWindow, MonitoringMonth};
