//! Build errors for the turnstile builder.

use crate::config::ConfigError;
use thiserror::Error;

/// Errors that can occur when building a turnstile.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Scheduler not specified. Call .scheduler(scheduler) before building")]
    MissingScheduler,

    #[error("Invalid configuration: {}", join(.0))]
    InvalidConfig(Vec<ConfigError>),
}

fn join(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
