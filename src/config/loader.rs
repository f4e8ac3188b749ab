//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! policy from a YAML file.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::PayrollPolicy;

/// Name of the policy file inside a configuration directory.
pub const POLICY_FILE_NAME: &str = "payroll.yaml";

/// Loads and provides access to the payroll policy.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// └── payroll.yaml   # Grace leave, rounding and duplicate handling
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// println!("Grace leave days: {}", loader.policy().grace_leave_days);
/// # Ok::<(), salary_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    policy: PayrollPolicy,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// - [`EngineError::ConfigNotFound`] if `payroll.yaml` is missing.
    /// - [`EngineError::ConfigParseError`] if it is not a valid policy.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let policy_path = path.as_ref().join(POLICY_FILE_NAME);
        let path_str = policy_path.display().to_string();

        let content = fs::read_to_string(&policy_path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content).map_err(|e| match e {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %path_str, policy = ?loader.policy, "Loaded payroll policy");
        Ok(loader)
    }

    /// Parses a policy from YAML text.
    ///
    /// # Example
    ///
    /// ```
    /// use salary_engine::config::{ConfigLoader, RoundingMode};
    ///
    /// let loader = ConfigLoader::from_yaml_str("grace_leave_days: 3\nrounding: half_even\n")?;
    /// assert_eq!(loader.policy().grace_leave_days, 3);
    /// assert_eq!(loader.policy().rounding, RoundingMode::HalfEven);
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        // An empty document deserializes to unit, not to a map.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let policy =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Ok(Self { policy })
    }

    /// Returns the loaded payroll policy.
    pub fn policy(&self) -> &PayrollPolicy {
        &self.policy
    }

    /// Consumes the loader, returning the payroll policy.
    pub fn into_policy(self) -> PayrollPolicy {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DuplicatePolicy, RoundingMode};

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.policy(), &PayrollPolicy::default());
    }

    #[test]
    fn test_load_missing_directory_returns_not_found() {
        match ConfigLoader::load("./config/does-not-exist") {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.ends_with(POLICY_FILE_NAME));
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_from_yaml_str_full_policy() {
        let yaml = "grace_leave_days: 1\nrounding: half_even\nduplicate_records: reject\n";
        let policy = ConfigLoader::from_yaml_str(yaml).unwrap().into_policy();

        assert_eq!(policy.grace_leave_days, 1);
        assert_eq!(policy.rounding, RoundingMode::HalfEven);
        assert_eq!(policy.duplicate_records, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_from_yaml_str_empty_is_default() {
        let loader = ConfigLoader::from_yaml_str("").unwrap();
        assert_eq!(loader.policy(), &PayrollPolicy::default());
    }

    #[test]
    fn test_from_yaml_str_unknown_rounding_is_parse_error() {
        let result = ConfigLoader::from_yaml_str("rounding: half_sideways\n");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }

    #[test]
    fn test_from_yaml_str_negative_grace_is_parse_error() {
        let result = ConfigLoader::from_yaml_str("grace_leave_days: -1\n");
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
    }
}
