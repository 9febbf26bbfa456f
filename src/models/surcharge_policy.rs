//! Surcharge policy model.
//!
//! A surcharge policy holds the percentage markups a company (or a single
//! event) applies for work on special days and during daily time windows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::ClockTime;

/// A daily clock-time range. The end may be numerically before the start,
/// in which case the range runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurchargeWindow {
    /// Daily start time.
    pub start: ClockTime,
    /// Daily end time.
    pub end: ClockTime,
}

impl SurchargeWindow {
    /// Returns true if the window runs past midnight.
    pub fn crosses_midnight(&self) -> bool {
        self.end < self.start
    }
}

/// Surcharge rates for one company or one event.
///
/// All percentages default to zero, which disables the rule. A windowed
/// rate without both of its clock times is disabled as well.
///
/// # Example
///
/// ```
/// use care_pay_engine::models::SurchargePolicy;
/// use rust_decimal::Decimal;
///
/// let policy: SurchargePolicy = serde_yaml::from_str(r#"
/// name: standard
/// saturday: 20
/// evening: 10
/// eveningStartTime: "21:00"
/// eveningEndTime: "06:00"
/// "#).unwrap();
///
/// assert_eq!(policy.saturday, Decimal::new(20, 0));
/// assert!(policy.evening_window().unwrap().crosses_midnight());
/// assert!(policy.custom_window().is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurchargePolicy {
    /// Name of the policy.
    #[serde(default)]
    pub name: String,
    /// Rate for 25 December.
    #[serde(default)]
    pub twenty_fifth_of_december: Decimal,
    /// Rate for 1 May.
    #[serde(default)]
    pub first_of_may: Decimal,
    /// Rate for any other public holiday.
    #[serde(default)]
    pub public_holiday: Decimal,
    /// Rate for Saturdays.
    #[serde(default)]
    pub saturday: Decimal,
    /// Rate for Sundays.
    #[serde(default)]
    pub sunday: Decimal,
    /// Rate for the evening window.
    #[serde(default)]
    pub evening: Decimal,
    /// Start of the evening window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_start_time: Option<ClockTime>,
    /// End of the evening window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evening_end_time: Option<ClockTime>,
    /// Rate for the custom window.
    #[serde(default)]
    pub custom: Decimal,
    /// Start of the custom window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_start_time: Option<ClockTime>,
    /// End of the custom window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_end_time: Option<ClockTime>,
}

impl SurchargePolicy {
    /// Returns the evening window when both clock times are set.
    pub fn evening_window(&self) -> Option<SurchargeWindow> {
        window(self.evening_start_time, self.evening_end_time)
    }

    /// Returns the custom window when both clock times are set.
    pub fn custom_window(&self) -> Option<SurchargeWindow> {
        window(self.custom_start_time, self.custom_end_time)
    }
}

fn window(start: Option<ClockTime>, end: Option<ClockTime>) -> Option<SurchargeWindow> {
    Some(SurchargeWindow {
        start: start?,
        end: end?,
    })
}
