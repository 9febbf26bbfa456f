//! Funding monitoring result model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Sentinel for `prev_month_care_hours` when the funding did not exist
/// before the current month.
pub const PREV_MONTH_NOT_APPLICABLE: Decimal = Decimal::NEGATIVE_ONE;

/// Monthly care hours of one funding, as shown on the monitoring dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingMonitoringResult {
    /// The payer's display name.
    pub third_party_payer: String,
    /// Contracted monthly care hours.
    pub care_hours: Decimal,
    /// Care hours of the previous month, or [`PREV_MONTH_NOT_APPLICABLE`].
    pub prev_month_care_hours: Decimal,
    /// Care hours of the current month.
    pub current_month_care_hours: Decimal,
}

impl FundingMonitoringResult {
    /// Returns the previous month's hours, or `None` when not applicable.
    pub fn prev_month_hours(&self) -> Option<Decimal> {
        (self.prev_month_care_hours != PREV_MONTH_NOT_APPLICABLE)
            .then_some(self.prev_month_care_hours)
    }
}
