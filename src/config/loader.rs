//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading company
//! configurations from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::calendar::HolidayTable;
use crate::error::{EngineError, EngineResult};
use crate::models::SurchargePolicy;

use super::types::{CompanyMetadata, EngineConfig};

/// Loads and provides access to company configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── company.yaml        # Company metadata
/// ├── holidays.yaml       # Public holiday table
/// └── surcharges/
///     └── standard.yaml   # One surcharge policy per file
/// ```
///
/// A policy file without a `name` takes the file stem as its name. Two
/// files naming the same policy are rejected.
///
/// # Example
///
/// ```no_run
/// use care_pay_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let policy = loader.get_surcharge("standard").unwrap();
/// println!("Saturday surcharge: {}%", policy.saturday);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with [`EngineError::ConfigNotFound`] if a required file or the
    /// surcharge directory is missing or holds no policy, and with
    /// [`EngineError::ConfigParseError`] if a file is not valid YAML for its
    /// type. The company's default surcharge policy must be among those
    /// loaded.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<CompanyMetadata>(&path.join("company.yaml"))?;
        let holidays = Self::load_yaml::<HolidayTable>(&path.join("holidays.yaml"))?;
        let surcharges = Self::load_surcharges(&path.join("surcharges"))?;

        let config = EngineConfig::new(metadata, holidays, surcharges);
        let loader = Self { config };
        loader.default_surcharge()?;

        debug!(
            company = %loader.company().code,
            zone = %loader.company().time_zone,
            holidays = %loader.holidays().name,
            surcharges = loader.surcharges().len(),
            "Configuration loaded"
        );

        Ok(loader)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all policy files from the surcharges directory, in path order.
    fn load_surcharges(dir: &Path) -> EngineResult<HashMap<String, SurchargePolicy>> {
        let dir_str = dir.display().to_string();

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut policies = HashMap::new();
        let mut sources: HashMap<String, PathBuf> = HashMap::new();

        for path in paths {
            let mut policy = Self::load_yaml::<SurchargePolicy>(&path)?;
            if policy.name.is_empty() {
                policy.name = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
            }

            if let Some(first) = sources.get(&policy.name) {
                return Err(EngineError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!(
                        "duplicate surcharge policy '{}' also defined in {}",
                        policy.name,
                        first.display()
                    ),
                });
            }
            sources.insert(policy.name.clone(), path);
            policies.insert(policy.name.clone(), policy);
        }

        if policies.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no surcharge files found)", dir_str),
            });
        }

        Ok(policies)
    }

    /// Returns the underlying company configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the company metadata.
    pub fn company(&self) -> &CompanyMetadata {
        self.config.company()
    }

    /// Returns the holiday table.
    pub fn holidays(&self) -> &HolidayTable {
        self.config.holidays()
    }

    /// Returns all surcharge policies keyed by name.
    pub fn surcharges(&self) -> &HashMap<String, SurchargePolicy> {
        self.config.surcharges()
    }

    /// Gets a surcharge policy by name.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use care_pay_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// let policy = loader.get_surcharge("standard")?;
    /// # Ok::<(), care_pay_engine::error::EngineError>(())
    /// ```
    pub fn get_surcharge(&self, name: &str) -> EngineResult<&SurchargePolicy> {
        self.config
            .surcharges()
            .get(name)
            .ok_or_else(|| EngineError::SurchargePolicyNotFound {
                name: name.to_string(),
            })
    }

    /// Gets the company's default surcharge policy.
    pub fn default_surcharge(&self) -> EngineResult<&SurchargePolicy> {
        self.get_surcharge(&self.company().default_surcharge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{ClockTime, HolidayCalendar};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::path::PathBuf;

    fn config_path() -> &'static str {
        "./config/default"
    }

    const COMPANY: &str =
        "code: test\nname: Test\ndefault_surcharge: standard\ntime_zone: Europe/Paris\n";

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir()
            .join(format!("care-pay-engine-{}-{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(dir.join("surcharges")).unwrap();
        fs::write(dir.join("company.yaml"), COMPANY).unwrap();
        fs::write(dir.join("holidays.yaml"), "name: Empty\n").unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.company().code, "default");
        assert_eq!(loader.company().time_zone, chrono_tz::Europe::Paris);
        assert_eq!(loader.holidays().name, "France");
    }

    #[test]
    fn test_loaded_holidays_match_builtin_france() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let builtin = crate::calendar::HolidayTable::france();

        for year in [2024, 2025, 2026] {
            assert_eq!(
                loader.holidays().holidays_in_year(year),
                builtin.holidays_in_year(year)
            );
        }
        assert!(loader.holidays().is_holiday(NaiveDate::from_ymd_opt(2026, 5, 14).unwrap()));
    }

    #[test]
    fn test_get_standard_surcharge() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let policy = loader.get_surcharge("standard").unwrap();
        assert_eq!(policy.twenty_fifth_of_december, Decimal::new(100, 0));
        assert_eq!(policy.saturday, Decimal::new(25, 0));
        assert_eq!(policy.evening_start_time, Some(ClockTime::new(21, 0).unwrap()));
        assert_eq!(loader.default_surcharge().unwrap().name, "standard");
    }

    #[test]
    fn test_get_surcharge_unknown_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        match loader.get_surcharge("unknown") {
            Err(EngineError::SurchargePolicyNotFound { name }) => {
                assert_eq!(name, "unknown");
            }
            _ => panic!("Expected SurchargePolicyNotFound error"),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("company.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_policy_name_defaults_to_file_stem() {
        let dir = scratch_dir("stem");
        fs::write(dir.join("surcharges").join("standard.yaml"), "sunday: 40\n").unwrap();

        let loader = ConfigLoader::load(&dir).unwrap();
        assert_eq!(loader.get_surcharge("standard").unwrap().sunday, Decimal::new(40, 0));

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_empty_surcharge_directory_returns_error() {
        let dir = scratch_dir("empty");

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("no surcharge files found"));
            }
            other => panic!("Expected ConfigNotFound error, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_invalid_clock_time_returns_parse_error() {
        let dir = scratch_dir("badtime");
        fs::write(
            dir.join("surcharges").join("standard.yaml"),
            "evening: 10\neveningStartTime: \"25:00\"\n",
        )
        .unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("standard.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_duplicate_policy_name_returns_parse_error() {
        let dir = scratch_dir("duplicate");
        let surcharges = dir.join("surcharges");
        fs::write(surcharges.join("a.yaml"), "name: standard\nsaturday: 10\n").unwrap();
        fs::write(surcharges.join("b.yaml"), "name: standard\nsaturday: 90\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.ends_with("b.yaml"));
                assert!(message.contains("standard"));
                assert!(message.contains("a.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_unknown_time_zone_returns_parse_error() {
        let dir = scratch_dir("badzone");
        fs::write(
            dir.join("company.yaml"),
            "code: test\nname: Test\ndefault_surcharge: standard\ntime_zone: Mars/Olympus\n",
        )
        .unwrap();
        fs::write(dir.join("surcharges").join("standard.yaml"), "sunday: 40\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::ConfigParseError { path, .. }) => {
                assert!(path.ends_with("company.yaml"));
            }
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_missing_default_surcharge_returns_error() {
        let dir = scratch_dir("nodefault");
        fs::write(dir.join("surcharges").join("night.yaml"), "evening: 10\n").unwrap();

        match ConfigLoader::load(&dir) {
            Err(EngineError::SurchargePolicyNotFound { name }) => assert_eq!(name, "standard"),
            other => panic!("Expected SurchargePolicyNotFound, got {:?}", other),
        }

        fs::remove_dir_all(dir).unwrap();
    }
}
