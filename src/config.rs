//! Validator configuration
//!
//! All fields are optional when deserializing; missing fields take their
//! defaults. The defaults reproduce fail-fast nested propagation with no
//! nesting depth limit.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::NestedPolicy;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Validator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// How a failing nested entity affects its parent (default: fail_fast)
    #[serde(default)]
    pub nested_policy: NestedPolicy,

    /// Emit a log event for every failed validation pass (default: true)
    #[serde(default = "default_log_violations")]
    pub log_violations: bool,

    /// Maximum nested entity depth below the top-level entity (default: unlimited)
    #[serde(default)]
    pub max_depth: Option<usize>,
}

fn default_log_violations() -> bool {
    true
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            nested_policy: NestedPolicy::default(),
            log_violations: default_log_violations(),
            max_depth: None,
        }
    }
}

impl ValidatorConfig {
    /// Create a config with the given nested propagation policy
    pub fn with_policy(nested_policy: NestedPolicy) -> Self {
        Self {
            nested_policy,
            ..Default::default()
        }
    }

    /// Parse and validate a JSON config string
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: ValidatorConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Create a config that rejects nesting deeper than `max_depth`
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth),
            ..Default::default()
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == Some(0) {
            return Err(ConfigError::Invalid("max_depth must be > 0".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidatorConfig::default();
        assert_eq!(config.nested_policy, NestedPolicy::FailFast);
        assert!(config.log_violations);
        assert_eq!(config.max_depth, None);
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = ValidatorConfig::from_json("{}").unwrap();
        assert_eq!(config, ValidatorConfig::default());
    }

    #[test]
    fn test_policy_from_json() {
        let config = ValidatorConfig::from_json(r#"{"nested_policy": "collect_all"}"#).unwrap();
        assert_eq!(config.nested_policy, NestedPolicy::CollectAll);
    }

    #[test]
    fn test_unknown_policy_rejected() {
        let result = ValidatorConfig::from_json(r#"{"nested_policy": "sometimes"}"#);
        assert!(matches!(result, Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_max_depth_from_json() {
        let config = ValidatorConfig::from_json(r#"{"max_depth": 8}"#).unwrap();
        assert_eq!(config.max_depth, Some(8));
    }

    #[test]
    fn test_zero_depth_rejected() {
        let result = ValidatorConfig::from_json(r#"{"max_depth": 0}"#);
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }
}
