//! Configuration loading and management for the Care Pay Engine.
//!
//! This module loads a company's configuration from YAML files: company
//! metadata, its public holiday table and its named surcharge policies.
//!
//! # Example
//!
//! ```no_run
//! use care_pay_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Loaded company: {}", config.company().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CompanyMetadata, EngineConfig};
