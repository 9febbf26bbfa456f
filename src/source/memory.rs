use std::collections::HashMap;

use uuid::Uuid;

use crate::calculation::{EventWindow, FundingValidityWindow};
use crate::error::EngineResult;
use crate::models::{CareEvent, Funding};

use super::MonitoringDataSource;

/// A [`MonitoringDataSource`] over fundings and events held in memory.
///
/// # Example
///
/// ```
/// use care_pay_engine::source::InMemoryDataSource;
///
/// let source = InMemoryDataSource::new();
/// assert_eq!(source.event_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryDataSource {
    fundings: HashMap<Uuid, Vec<Funding>>,
    events: Vec<CareEvent>,
}

impl InMemoryDataSource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a funding belonging to `customer_id`.
    pub fn with_funding(mut self, customer_id: Uuid, funding: Funding) -> Self {
        self.fundings.entry(customer_id).or_default().push(funding);
        self
    }

    /// Adds an event. Its customer is the event's own `customer_id`.
    pub fn with_event(mut self, event: CareEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Adds several events.
    pub fn with_events(mut self, events: impl IntoIterator<Item = CareEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Number of stored events, countable or not.
    pub fn event_count(&self) -> usize {
        self.events.len()
    }
}

impl MonitoringDataSource for InMemoryDataSource {
    fn fundings(
        &self,
        customer_id: Uuid,
        window: &FundingValidityWindow,
    ) -> EngineResult<Vec<Funding>> {
        Ok(self
            .fundings
            .get(&customer_id)
            .map(|fundings| {
                fundings
                    .iter()
                    .filter(|funding| window.admits(funding))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn events(
        &self,
        customer_id: Uuid,
        subscription_ids: &[Uuid],
        window: &EventWindow,
    ) -> EngineResult<Vec<CareEvent>> {
        Ok(self
            .events
            .iter()
            .filter(|event| event.customer_id == customer_id)
            .filter(|event| subscription_ids.contains(&event.subscription_id))
            .filter(|event| event.counts_for_monitoring())
            .filter(|event| window.admits(event))
            .cloned()
            .collect())
    }
}
