//! Scheduler error types.

use thiserror::Error;

/// Errors reported by a [`Scheduler`](super::Scheduler) when arming a timer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchedulerError {
    /// The scheduler needs an async runtime and none is running
    #[error("No async runtime available to host the timer")]
    RuntimeUnavailable,

    /// The scheduler refused the timer
    #[error("Timer rejected: {reason}")]
    Rejected { reason: String },
}
