//! Governance configuration with TOML file support.
//!
//! Fixed for the lifetime of a [`Council`](crate::Council); nothing here can be
//! changed by a proposal.

use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Seven days.
pub const DEFAULT_VOTING_DURATION_SECS: u64 = 7 * 24 * 60 * 60;

pub const DEFAULT_MIN_VOTING_POWER: u64 = 1;

/// Voting power the owner receives at initialization.
pub const DEFAULT_OWNER_VOTING_POWER: u64 = 100;

/// Process-wide governance constants.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Missing keys take their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// How long a proposal accepts votes after creation.
    #[serde(default = "default_voting_duration_secs")]
    pub voting_duration_secs: u64,

    /// Minimum voting power an admitted member must carry.
    #[serde(default = "default_min_voting_power")]
    pub min_voting_power: u64,

    #[serde(default = "default_owner_voting_power")]
    pub owner_voting_power: u64,

    /// Optional upper bound on proposal description length in bytes.
    /// Unset means any non-empty description is accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_description_len: Option<usize>,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_voting_duration_secs() -> u64 {
    DEFAULT_VOTING_DURATION_SECS
}

fn default_min_voting_power() -> u64 {
    DEFAULT_MIN_VOTING_POWER
}

fn default_owner_voting_power() -> u64 {
    DEFAULT_OWNER_VOTING_POWER
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        let config: Self = toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.voting_duration_secs == 0 {
            return Err(GovernanceError::Config(
                "voting_duration_secs must be positive".into(),
            ));
        }
        if self.min_voting_power == 0 {
            return Err(GovernanceError::Config(
                "min_voting_power must be at least 1".into(),
            ));
        }
        if self.owner_voting_power < self.min_voting_power {
            return Err(GovernanceError::Config(format!(
                "owner_voting_power {} is below min_voting_power {}",
                self.owner_voting_power, self.min_voting_power
            )));
        }
        if self.max_description_len == Some(0) {
            return Err(GovernanceError::Config(
                "max_description_len must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            voting_duration_secs: default_voting_duration_secs(),
            min_voting_power: default_min_voting_power(),
            owner_voting_power: default_owner_voting_power(),
            max_description_len: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_seven_days_and_power_one() {
        let config = GovernanceConfig::default();
        assert_eq!(config.voting_duration_secs, 604_800);
        assert_eq!(config.min_voting_power, 1);
        assert_eq!(config.owner_voting_power, 100);
        assert_eq!(config.max_description_len, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = GovernanceConfig::from_toml_str("").unwrap();
        assert_eq!(config, GovernanceConfig::default());
    }

    #[test]
    fn partial_toml_overrides_fields() {
        let config = GovernanceConfig::from_toml_str("voting_duration_secs = 3600\n").unwrap();
        assert_eq!(config.voting_duration_secs, 3600);
        assert_eq!(config.min_voting_power, DEFAULT_MIN_VOTING_POWER);
    }

    #[test]
    fn toml_roundtrip() {
        let config = GovernanceConfig {
            voting_duration_secs: 60,
            min_voting_power: 2,
            owner_voting_power: 50,
            max_description_len: Some(128),
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(GovernanceConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn description_bound_is_read_from_toml() {
        let config = GovernanceConfig::from_toml_str("max_description_len = 256").unwrap();
        assert_eq!(config.max_description_len, Some(256));
        assert!(GovernanceConfig::from_toml_str("max_description_len = 0").is_err());
    }

    #[test]
    fn rejects_zero_duration() {
        let err = GovernanceConfig::from_toml_str("voting_duration_secs = 0").unwrap_err();
        assert!(matches!(err, GovernanceError::Config(_)));
    }

    #[test]
    fn rejects_owner_below_minimum() {
        let config = GovernanceConfig {
            min_voting_power: 10,
            owner_voting_power: 5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(GovernanceConfig::from_toml_str("voting_duration_secs = \"soon\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "min_voting_power = 3\nowner_voting_power = 30").unwrap();
        let config = GovernanceConfig::from_toml_file(file.path()).unwrap();
        assert_eq!(config.min_voting_power, 3);
        assert_eq!(config.owner_voting_power, 30);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = GovernanceConfig::from_toml_file("/nonexistent/council.toml").unwrap_err();
        assert!(matches!(err, GovernanceError::Config(_)));
    }
}
