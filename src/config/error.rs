//! Configuration error types.

use thiserror::Error;

/// Problems found while loading or validating a [`TurnstileConfig`](super::TurnstileConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("At least one payment gateway is required")]
    NoGateways,

    #[error("Gateway #{index} has an empty name")]
    BlankGateway { index: usize },

    #[error("Timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Fare table needs {expected} hourly rates, found {found}")]
    RateTableSize { expected: usize, found: usize },

    /// The JSON document could not be parsed
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}
