//! Time interval intersection.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A closed span of time `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// Start of the span.
    pub start: DateTime<FixedOffset>,
    /// End of the span.
    pub end: DateTime<FixedOffset>,
}

impl Interval {
    /// Creates an interval.
    pub fn new(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> Self {
        Self { start, end }
    }

    /// Returns the overlap of two intervals, or `None` when they overlap in
    /// less than a positive span (disjoint, or only touching at an instant).
    ///
    /// # Example
    ///
    /// ```
    /// use care_pay_engine::calculation::Interval;
    /// use chrono::DateTime;
    ///
    /// let at = |s| DateTime::parse_from_rfc3339(s).unwrap();
    /// let event = Interval::new(
    ///     at("2026-01-15T20:00:00+01:00"),
    ///     at("2026-01-15T23:00:00+01:00"),
    /// );
    /// let evening = Interval::new(
    ///     at("2026-01-15T21:00:00+01:00"),
    ///     at("2026-01-16T06:00:00+01:00"),
    /// );
    ///
    /// let overlap = event.intersection(&evening).unwrap();
    /// assert_eq!(overlap.start, at("2026-01-15T21:00:00+01:00"));
    /// assert_eq!(overlap.end, at("2026-01-15T23:00:00+01:00"));
    /// ```
    pub fn intersection(&self, other: &Interval) -> Option<Interval> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(Interval { start, end })
    }

    /// Returns true if `other` lies within this interval.
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
