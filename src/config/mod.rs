//! Configuration loading and management for the salary reconciliation engine.
//!
//! This module provides functionality to load the payroll policy (grace
//! leave, rounding, duplicate-record handling) from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/default").unwrap();
//! println!("Rounding: {:?}", config.policy().rounding);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, POLICY_FILE_NAME};
pub use types::{DEFAULT_GRACE_LEAVE_DAYS, DuplicatePolicy, PayrollPolicy, RoundingMode};
