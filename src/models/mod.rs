//! Core data models for the Care Pay Engine.
//!
//! These are the plain data structures exchanged with the data source and
//! the payroll and reporting consumers. They serialize with camelCase field
//! names.

mod care_event;
mod funding;
mod monitoring;
mod surcharge;
mod surcharge_policy;

pub use care_event::{Cancellation, CancellationCondition, CancellationReason, CareEvent, EventType};
pub use funding::{CareDay, EffectiveFunding, Funding, FundingVersion, ThirdPartyPayer};
pub use monitoring::{FundingMonitoringResult, PREV_MONTH_NOT_APPLICABLE};
pub use surcharge::{Surcharge, SurchargeRule, SurchargeSpan};
pub use surcharge_policy::{SurchargePolicy, SurchargeWindow};
