//! Funding model and related types.
//!
//! A funding is a third-party-payer arrangement financing part of a
//! customer's care hours. Fundings are versioned by the data source; the
//! engine reads the most recently created version.

use chrono::{DateTime, FixedOffset};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::CalendarDate;
use crate::error::EngineError;

/// A day on which a funding counts care hours.
///
/// Serialized as its numeric code: 0 (Monday) through 6 (Sunday), and 7
/// for any public holiday regardless of weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum CareDay {
    /// Monday (code 0).
    Monday,
    /// Tuesday (code 1).
    Tuesday,
    /// Wednesday (code 2).
    Wednesday,
    /// Thursday (code 3).
    Thursday,
    /// Friday (code 4).
    Friday,
    /// Saturday (code 5).
    Saturday,
    /// Sunday (code 6).
    Sunday,
    /// Any public holiday (code 7).
    Holiday,
}

impl CareDay {
    /// Every weekday plus holidays.
    pub const ALL: [CareDay; 8] = [
        CareDay::Monday,
        CareDay::Tuesday,
        CareDay::Wednesday,
        CareDay::Thursday,
        CareDay::Friday,
        CareDay::Saturday,
        CareDay::Sunday,
        CareDay::Holiday,
    ];

    /// Returns the numeric code.
    pub fn code(self) -> u8 {
        match self {
            CareDay::Monday => 0,
            CareDay::Tuesday => 1,
            CareDay::Wednesday => 2,
            CareDay::Thursday => 3,
            CareDay::Friday => 4,
            CareDay::Saturday => 5,
            CareDay::Sunday => 6,
            CareDay::Holiday => 7,
        }
    }

    /// Maps an ISO weekday (1 for Monday through 7 for Sunday) to its care day.
    ///
    /// # Example
    ///
    /// ```
    /// use care_pay_engine::models::CareDay;
    ///
    /// assert_eq!(CareDay::from_iso_weekday(1), Some(CareDay::Monday));
    /// assert_eq!(CareDay::from_iso_weekday(7), Some(CareDay::Sunday));
    /// assert_eq!(CareDay::from_iso_weekday(8), None);
    /// ```
    pub fn from_iso_weekday(weekday: u32) -> Option<Self> {
        let code = u8::try_from(weekday.checked_sub(1)?).ok()?;
        match Self::try_from(code) {
            Ok(CareDay::Holiday) | Err(_) => None,
            Ok(day) => Some(day),
        }
    }
}

impl TryFrom<u8> for CareDay {
    type Error = EngineError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(code))
            .copied()
            .ok_or(EngineError::InvalidCareDay { code })
    }
}

impl From<CareDay> for u8 {
    fn from(day: CareDay) -> Self {
        day.code()
    }
}

/// The payer financing a funding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThirdPartyPayer {
    /// Unique identifier for the payer.
    pub id: Uuid,
    /// Display name.
    pub name: String,
}

/// One version of a funding's terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingVersion {
    /// Days on which care hours count toward this funding.
    pub care_days: Vec<CareDay>,
    /// Start of validity.
    pub start_date: DateTime<FixedOffset>,
    /// End of validity, exclusive. Open-ended when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<FixedOffset>>,
    /// Contracted monthly care hours.
    pub care_hours: Decimal,
    /// When this version was recorded.
    pub created_at: DateTime<FixedOffset>,
}

impl FundingVersion {
    /// Returns true if `day` is one of this version's care days.
    pub fn covers(&self, day: CareDay) -> bool {
        self.care_days.contains(&day)
    }
}

/// A third-party funding arrangement for a customer's subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Funding {
    /// Unique identifier for the funding.
    pub id: Uuid,
    /// The subscription whose events this funding finances.
    pub subscription_id: Uuid,
    /// The financing payer.
    pub third_party_payer: ThirdPartyPayer,
    /// Recorded versions of the terms.
    pub versions: Vec<FundingVersion>,
}

impl Funding {
    /// Returns the most recently created version.
    pub fn current_version(&self) -> Option<&FundingVersion> {
        self.versions.iter().max_by_key(|v| v.created_at)
    }

    /// Returns the funding merged with its current version, or `None` for
    /// a funding without versions.
    pub fn effective(&self) -> Option<EffectiveFunding<'_>> {
        self.current_version()
            .map(|version| EffectiveFunding { funding: self, version })
    }
}

/// A funding viewed through its current version.
#[derive(Debug, Clone, Copy)]
pub struct EffectiveFunding<'a> {
    /// The funding.
    pub funding: &'a Funding,
    /// Its current version.
    pub version: &'a FundingVersion,
}

impl EffectiveFunding<'_> {
    /// Returns the funding ID.
    pub fn id(&self) -> Uuid {
        self.funding.id
    }

    /// Returns the subscription ID.
    pub fn subscription_id(&self) -> Uuid {
        self.funding.subscription_id
    }

    /// Returns the payer's display name.
    pub fn third_party_payer_name(&self) -> &str {
        &self.funding.third_party_payer.name
    }

    /// Returns the contracted monthly care hours.
    pub fn care_hours(&self) -> Decimal {
        self.version.care_hours
    }

    /// Returns the start of validity.
    pub fn start(&self) -> CalendarDate {
        CalendarDate::from_datetime(self.version.start_date)
    }

    /// Returns the end of validity, if set.
    pub fn end(&self) -> Option<CalendarDate> {
        self.version.end_date.map(CalendarDate::from_datetime)
    }

    /// Returns true if `day` is a care day of the current version.
    pub fn covers(&self, day: CareDay) -> bool {
        self.version.covers(day)
    }
}
