//! Care event model and related types.
//!
//! A care event is one scheduled or performed intervention at a customer's
//! home. Events are created by scheduling and never mutated by this engine.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::CalendarDate;
use crate::error::{EngineError, EngineResult};

use super::surcharge_policy::SurchargePolicy;

/// The kind of an event. Only interventions enter monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Care delivered at a customer's home.
    Intervention,
    /// Internal work time (meetings, training).
    InternalHour,
    /// Auxiliary absence.
    Absence,
    /// Auxiliary unavailability.
    Unavailability,
}

/// Billing state of a cancelled event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationCondition {
    /// Cancelled, still invoiced and paid to the auxiliary.
    InvoicedAndPaid,
    /// Cancelled, still invoiced but not paid to the auxiliary.
    InvoicedAndNotPaid,
    /// Cancelled, neither invoiced nor paid.
    NotInvoicedAndNotPaid,
}

impl CancellationCondition {
    /// Returns true if the cancelled event is still invoiced to the customer.
    pub fn is_invoiced(&self) -> bool {
        matches!(self, Self::InvoicedAndPaid | Self::InvoicedAndNotPaid)
    }
}

/// Who initiated a cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancellationReason {
    /// The customer cancelled.
    CustomerInitiative,
    /// The auxiliary cancelled.
    AuxiliaryInitiative,
}

/// Cancellation information for an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cancellation {
    /// The billing state after cancellation.
    pub condition: CancellationCondition,
    /// Who cancelled.
    pub reason: CancellationReason,
}

/// One scheduled or performed care event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareEvent {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// The customer receiving care.
    pub customer_id: Uuid,
    /// The subscription the event bills against.
    pub subscription_id: Uuid,
    /// The kind of event.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// When the event starts.
    pub start_date: DateTime<FixedOffset>,
    /// When the event ends. Must be after `start_date`.
    pub end_date: DateTime<FixedOffset>,
    /// Cancellation information, if the event was cancelled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel: Option<Cancellation>,
    /// Event-level surcharge policy overriding the company policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surcharge: Option<SurchargePolicy>,
}

impl CareEvent {
    /// Returns the start as a [`CalendarDate`].
    pub fn start(&self) -> CalendarDate {
        CalendarDate::from_datetime(self.start_date)
    }

    /// Returns the end as a [`CalendarDate`].
    pub fn end(&self) -> CalendarDate {
        CalendarDate::from_datetime(self.end_date)
    }

    /// Returns the event length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_date - self.start_date).num_minutes()
    }

    /// Returns the event length in hours.
    ///
    /// # Example
    ///
    /// ```
    /// use care_pay_engine::models::{CareEvent, EventType};
    /// use chrono::DateTime;
    /// use rust_decimal::Decimal;
    /// use uuid::Uuid;
    ///
    /// let event = CareEvent {
    ///     id: Uuid::new_v4(),
    ///     customer_id: Uuid::new_v4(),
    ///     subscription_id: Uuid::new_v4(),
    ///     event_type: EventType::Intervention,
    ///     start_date: DateTime::parse_from_rfc3339("2026-01-15T09:00:00+01:00").unwrap(),
    ///     end_date: DateTime::parse_from_rfc3339("2026-01-15T10:30:00+01:00").unwrap(),
    ///     cancel: None,
    ///     surcharge: None,
    /// };
    /// assert_eq!(event.duration_hours(), Decimal::new(15, 1)); // 1.5 hours
    /// ```
    pub fn duration_hours(&self) -> Decimal {
        Decimal::new(self.duration_minutes(), 0) / Decimal::new(60, 0)
    }

    /// Checks that the event ends after it starts.
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_date <= self.start_date {
            return Err(EngineError::InvalidEvent {
                event_id: self.id,
                message: "end date must be after start date".to_string(),
            });
        }
        Ok(())
    }

    /// Returns true if the event was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_some()
    }

    /// Returns true if the event enters monitoring aggregates: an
    /// intervention that is either not cancelled or still invoiced.
    pub fn counts_for_monitoring(&self) -> bool {
        self.event_type == EventType::Intervention
            && self
                .cancel
                .is_none_or(|cancel| cancel.condition.is_invoiced())
    }
}
