//! Care Pay Engine for home-care payroll and billing.
//!
//! This crate resolves the pay surcharges that apply to a care event under a
//! company's surcharge policy, and aggregates per-funding care hours for the
//! monthly monitoring dashboard.

#![warn(missing_docs)]

pub mod calculation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod source;
