//! Configuration types for a company.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono_tz::Tz;
use serde::Deserialize;
use std::collections::HashMap;

use crate::calendar::HolidayTable;
use crate::models::SurchargePolicy;

/// Metadata about the company.
#[derive(Debug, Clone, Deserialize)]
pub struct CompanyMetadata {
    /// Short code identifying the company.
    pub code: String,
    /// The human-readable name of the company.
    pub name: String,
    /// Name of the surcharge policy applied to events without their own.
    pub default_surcharge: String,
    /// IANA zone whose calendar months bound monitoring, e.g. `Europe/Paris`.
    pub time_zone: Tz,
}

/// The complete company configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    metadata: CompanyMetadata,
    holidays: HolidayTable,
    /// Surcharge policies keyed by name.
    surcharges: HashMap<String, SurchargePolicy>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(
        metadata: CompanyMetadata,
        holidays: HolidayTable,
        surcharges: HashMap<String, SurchargePolicy>,
    ) -> Self {
        Self {
            metadata,
            holidays,
            surcharges,
        }
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        &self.metadata
    }

    /// Returns the holiday table.
    pub fn holidays(&self) -> &HolidayTable {
        &self.holidays
    }

    /// Returns all surcharge policies.
    pub fn surcharges(&self) -> &HashMap<String, SurchargePolicy> {
        &self.surcharges
    }
}
