//! Error types for the Care Pay Engine.
//!
//! The calculations themselves are total: unmatched rules and empty inputs
//! produce empty or sentinel results. The errors below come from parsing,
//! validation, configuration loading and the data-source seam.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Care Pay Engine.
///
/// # Example
///
/// ```
/// use care_pay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A date could not be interpreted, or an invalid date was required.
    #[error("Invalid date: {input}")]
    InvalidDate {
        /// The input that could not be interpreted.
        input: String,
    },

    /// A time of day was not in `HH:mm` form.
    #[error("Invalid time of day '{value}': expected HH:mm")]
    InvalidTimeOfDay {
        /// The rejected value.
        value: String,
    },

    /// A holiday entry was not a valid `MM/DD` day.
    #[error("Invalid holiday '{value}': expected MM/DD")]
    InvalidHoliday {
        /// The rejected value.
        value: String,
    },

    /// A care day code was outside 0-7.
    #[error("Invalid care day code: {code}")]
    InvalidCareDay {
        /// The rejected code.
        code: u8,
    },

    /// A care event was invalid or contained inconsistent data.
    #[error("Invalid event '{event_id}': {message}")]
    InvalidEvent {
        /// The ID of the invalid event.
        event_id: Uuid,
        /// A description of what made the event invalid.
        message: String,
    },

    /// Two fundings of one subscription share a care day over overlapping periods.
    #[error("Fundings '{first}' and '{second}' overlap on a shared care day")]
    OverlappingFundings {
        /// The ID of the earlier funding.
        first: Uuid,
        /// The ID of the later funding.
        second: Uuid,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No surcharge policy with this name is configured.
    #[error("Surcharge policy not found: {name}")]
    SurchargePolicyNotFound {
        /// The policy name that was not found.
        name: String,
    },

    /// The data source failed to supply fundings or events.
    #[error("Data source error: {message}")]
    DataSource {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
