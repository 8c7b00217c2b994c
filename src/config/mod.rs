//! Turnstile configuration.
//!
//! Validation follows the "collect them all" approach: every problem in a
//! configuration is reported in one pass using Stillwater's `Validation`
//! rather than stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use turnstile_fsm::config::TurnstileConfig;
//!
//! let config = TurnstileConfig::from_json(r#"{ "gateways": ["Primary", "Backup"] }"#).unwrap();
//! assert_eq!(config.gateways.len(), 2);
//! assert_eq!(config.timeout().as_secs(), 2);
//! assert!(config.check().is_ok());
//! ```

use crate::turnstile::{DEFAULT_RATES, HOURS_PER_DAY};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

pub mod error;

pub use error::ConfigError;

/// Settings for one turnstile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnstileConfig {
    /// Payment gateways tried in order, one per attempt
    pub gateways: Vec<String>,

    /// Delay before a time-limited state times out, in milliseconds
    pub timeout_ms: u64,

    /// Fare charged for each hour of the day, starting at midnight
    pub rates: Vec<u32>,
}

impl Default for TurnstileConfig {
    fn default() -> Self {
        Self {
            gateways: vec![
                "Gateway1".to_string(),
                "Gateway2".to_string(),
                "Gateway3".to_string(),
            ],
            timeout_ms: 2_000,
            rates: DEFAULT_RATES.to_vec(),
        }
    }
}

impl TurnstileConfig {
    /// Parse a JSON document. Missing fields take their defaults.
    ///
    /// Parsing does not validate; call [`check`](Self::check) afterwards.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// The rate table as a fixed array, if it has exactly one entry per hour.
    pub fn hourly_rates(&self) -> Option<[u32; HOURS_PER_DAY]> {
        self.rates.as_slice().try_into().ok()
    }

    /// Validate every rule, accumulating ALL violations.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigError>> {
        let mut checks: Vec<Validation<(), NonEmptyVec<ConfigError>>> = Vec::new();

        checks.push(if self.gateways.is_empty() {
            Validation::fail(ConfigError::NoGateways)
        } else {
            Validation::success(())
        });

        for (index, gateway) in self.gateways.iter().enumerate() {
            if gateway.trim().is_empty() {
                checks.push(Validation::fail(ConfigError::BlankGateway { index }));
            }
        }

        checks.push(if self.timeout_ms == 0 {
            Validation::fail(ConfigError::ZeroTimeout)
        } else {
            Validation::success(())
        });

        checks.push(if self.rates.len() == HOURS_PER_DAY {
            Validation::success(())
        } else {
            Validation::fail(ConfigError::RateTableSize {
                expected: HOURS_PER_DAY,
                found: self.rates.len(),
            })
        });

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) flattened into a `Result`.
    pub fn check(&self) -> Result<(), Vec<ConfigError>> {
        match self.validate() {
            Validation::Success(_) => Ok(()),
            Validation::Failure(errors) => Err(errors.iter().cloned().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = TurnstileConfig::default();
        assert!(config.validate().is_success());
        assert_eq!(config.gateways, ["Gateway1", "Gateway2", "Gateway3"]);
        assert_eq!(config.timeout(), Duration::from_secs(2));
        assert_eq!(config.hourly_rates(), Some(DEFAULT_RATES));
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = TurnstileConfig {
            gateways: Vec::new(),
            timeout_ms: 0,
            rates: vec![1, 2, 3],
        };

        let errors = config.check().unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ConfigError::NoGateways));
        assert!(errors.contains(&ConfigError::ZeroTimeout));
        assert!(errors.contains(&ConfigError::RateTableSize {
            expected: 24,
            found: 3
        }));
    }

    #[test]
    fn blank_gateway_names_are_reported_by_index() {
        let config = TurnstileConfig {
            gateways: vec!["Gateway1".into(), "  ".into(), String::new()],
            ..TurnstileConfig::default()
        };

        let errors = config.check().unwrap_err();

        assert_eq!(
            errors,
            vec![
                ConfigError::BlankGateway { index: 1 },
                ConfigError::BlankGateway { index: 2 },
            ]
        );
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = TurnstileConfig::from_json(r#"{ "timeout_ms": 500 }"#).unwrap();

        assert_eq!(config.timeout(), Duration::from_millis(500));
        assert_eq!(config.gateways.len(), 3);
        assert_eq!(config.rates.len(), 24);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let result = TurnstileConfig::from_json("{ gateways: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_roundtrips_through_json() {
        let config = TurnstileConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TurnstileConfig::from_json(&json).unwrap(), config);
    }
}
