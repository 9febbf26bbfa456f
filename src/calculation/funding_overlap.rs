//! Validation of the fundings attached to one subscription.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{EffectiveFunding, Funding};

/// Checks that no two fundings of a subscription pay for the same care day
/// over overlapping periods.
///
/// Each funding is judged by its current version. Periods are half-open
/// `[start, end)`, an open end running forever, so a funding ending when
/// the next one starts does not overlap it. Fundings of different
/// subscriptions never conflict.
///
/// # Errors
///
/// Returns [`EngineError::OverlappingFundings`] for the first conflicting
/// pair, earlier start first.
pub fn validate_subscription_fundings(fundings: &[Funding]) -> EngineResult<()> {
    let mut effective: Vec<EffectiveFunding<'_>> =
        fundings.iter().filter_map(Funding::effective).collect();
    effective.sort_by_key(|funding| (funding.subscription_id(), funding.version.start_date));

    for (index, first) in effective.iter().enumerate() {
        for second in &effective[index + 1..] {
            if second.subscription_id() != first.subscription_id() {
                break;
            }
            if periods_overlap(first, second) && shares_care_day(first, second) {
                debug!(
                    subscription_id = %first.subscription_id(),
                    first = %first.id(),
                    second = %second.id(),
                    "Overlapping fundings"
                );
                return Err(EngineError::OverlappingFundings {
                    first: first.id(),
                    second: second.id(),
                });
            }
        }
    }

    Ok(())
}

fn periods_overlap(a: &EffectiveFunding<'_>, b: &EffectiveFunding<'_>) -> bool {
    let a_before_b_ends = b.version.end_date.is_none_or(|end| a.version.start_date < end);
    let b_before_a_ends = a.version.end_date.is_none_or(|end| b.version.start_date < end);
    a_before_b_ends && b_before_a_ends
}

fn shares_care_day(a: &EffectiveFunding<'_>, b: &EffectiveFunding<'_>) -> bool {
    a.version.care_days.iter().any(|day| b.covers(*day))
}
