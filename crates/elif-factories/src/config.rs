//! Registry configuration

use std::env;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Environment variable read by [`FactoryConfig::from_env`]
pub const OVERWRITE_POLICY_ENV: &str = "ELIF_FACTORIES_OVERWRITE_POLICY";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {field}, expected {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

/// What to do when a (type, factory) pair is registered a second time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Replace the stored defaults silently
    #[default]
    Replace,
    /// Replace the stored defaults and log a warning
    Warn,
}

impl FromStr for OverwritePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "replace" => Ok(OverwritePolicy::Replace),
            "warn" => Ok(OverwritePolicy::Warn),
            _ => Err(ConfigError::InvalidValue {
                field: "overwrite_policy".to_string(),
                value: s.to_string(),
                expected: "replace or warn".to_string(),
            }),
        }
    }
}

impl fmt::Display for OverwritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let policy = match self {
            OverwritePolicy::Replace => "replace",
            OverwritePolicy::Warn => "warn",
        };
        write!(f, "{}", policy)
    }
}

/// Configuration for registry behavior
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactoryConfig {
    pub overwrite_policy: OverwritePolicy,
}

impl FactoryConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        let overwrite_policy = match env::var(OVERWRITE_POLICY_ENV) {
            Ok(value) => value.parse()?,
            Err(_) => OverwritePolicy::default(),
        };

        Ok(Self { overwrite_policy })
    }

    pub fn with_overwrite_policy(mut self, policy: OverwritePolicy) -> Self {
        self.overwrite_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overwrite_policy_parsing() {
        assert_eq!("replace".parse::<OverwritePolicy>(), Ok(OverwritePolicy::Replace));
        assert_eq!(" WARN ".parse::<OverwritePolicy>(), Ok(OverwritePolicy::Warn));

        let err = "reject".parse::<OverwritePolicy>().unwrap_err();
        assert!(err.to_string().contains("'reject'"));
    }

    #[test]
    fn test_overwrite_policy_display_round_trips() {
        for policy in [OverwritePolicy::Replace, OverwritePolicy::Warn] {
            assert_eq!(policy.to_string().parse::<OverwritePolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = FactoryConfig::default();
        assert_eq!(config.overwrite_policy, OverwritePolicy::Replace);
        assert_eq!(
            config.with_overwrite_policy(OverwritePolicy::Warn).overwrite_policy,
            OverwritePolicy::Warn
        );
    }
}
