//! The data source seam for funding monitoring.
//!
//! Monitoring reads fundings and events through [`MonitoringDataSource`];
//! how they are stored is the implementor's business. [`InMemoryDataSource`]
//! serves tests and embedding code that already holds its data.

mod memory;

pub use memory::InMemoryDataSource;

use uuid::Uuid;

use crate::calculation::{EventWindow, FundingValidityWindow};
use crate::error::EngineResult;
use crate::models::{CareEvent, Funding};

/// Supplies the fundings and events of a customer.
///
/// Implementations apply the windows they are given and must only return
/// events for which [`CareEvent::counts_for_monitoring`] holds. Failures
/// are reported as [`crate::error::EngineError::DataSource`].
pub trait MonitoringDataSource: Send + Sync {
    /// Returns the fundings of `customer_id` admitted by `window`.
    fn fundings(
        &self,
        customer_id: Uuid,
        window: &FundingValidityWindow,
    ) -> EngineResult<Vec<Funding>>;

    /// Returns the countable events of `customer_id` on `subscription_ids`
    /// admitted by `window`.
    fn events(
        &self,
        customer_id: Uuid,
        subscription_ids: &[Uuid],
        window: &EventWindow,
    ) -> EngineResult<Vec<CareEvent>>;
}
