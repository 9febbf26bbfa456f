//! Resolved surcharge types.
//!
//! A [`Surcharge`] is the resolver's output for one applicable rule. It is
//! consumed by payroll computation and never persisted by this engine.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::care_event::CareEvent;

/// The policy rule a surcharge comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurchargeRule {
    /// 25 December.
    TwentyFifthOfDecember,
    /// 1 May.
    FirstOfMay,
    /// Any other public holiday.
    PublicHoliday,
    /// Saturday.
    Saturday,
    /// Sunday.
    Sunday,
    /// The evening window.
    Evening,
    /// The custom window.
    Custom,
}

impl SurchargeRule {
    /// Returns true for rules keyed to a calendar day rather than a time window.
    pub fn is_fixed_date(&self) -> bool {
        !matches!(self, SurchargeRule::Evening | SurchargeRule::Custom)
    }
}

impl std::fmt::Display for SurchargeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurchargeRule::TwentyFifthOfDecember => write!(f, "25 December"),
            SurchargeRule::FirstOfMay => write!(f, "1 May"),
            SurchargeRule::PublicHoliday => write!(f, "Public holiday"),
            SurchargeRule::Saturday => write!(f, "Saturday"),
            SurchargeRule::Sunday => write!(f, "Sunday"),
            SurchargeRule::Evening => write!(f, "Evening"),
            SurchargeRule::Custom => write!(f, "Custom"),
        }
    }
}

/// The part of an event a windowed surcharge applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurchargeSpan {
    /// Start of the surcharged span.
    pub start_hour: DateTime<FixedOffset>,
    /// End of the surcharged span.
    pub end_hour: DateTime<FixedOffset>,
}

/// One applicable surcharge.
///
/// Fixed-date surcharges cover the whole event and carry no span; they
/// serialize as `{ "rule", "percentage" }`. Windowed surcharges add
/// `startHour` and `endHour`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Surcharge {
    /// The rule that produced this surcharge.
    pub rule: SurchargeRule,
    /// The markup percentage.
    pub percentage: Decimal,
    /// The surcharged span, for windowed rules.
    #[serde(flatten)]
    pub span: Option<SurchargeSpan>,
}

impl Surcharge {
    /// Creates a surcharge covering the whole event.
    pub fn whole_event(rule: SurchargeRule, percentage: Decimal) -> Self {
        Self {
            rule,
            percentage,
            span: None,
        }
    }

    /// Creates a surcharge covering `[start_hour, end_hour]`.
    pub fn windowed(
        rule: SurchargeRule,
        percentage: Decimal,
        start_hour: DateTime<FixedOffset>,
        end_hour: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            rule,
            percentage,
            span: Some(SurchargeSpan {
                start_hour,
                end_hour,
            }),
        }
    }

    /// Returns the surcharged hours: the span for windowed surcharges, the
    /// whole event otherwise.
    pub fn hours(&self, event: &CareEvent) -> Decimal {
        match self.span {
            Some(span) => {
                let minutes = (span.end_hour - span.start_hour).num_minutes();
                Decimal::new(minutes, 0) / Decimal::new(60, 0)
            }
            None => event.duration_hours(),
        }
    }
}
