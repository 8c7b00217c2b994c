//! Timer collaborator for time-limited states.
//!
//! The engine never sleeps. States that need a timeout own a
//! [`TimeoutGuard`], which arms a one-shot timer through a [`Scheduler`].
//! When a timer expires the scheduler hands its [`TimerHandle`] back to the
//! driver, and the machine turns it into a timeout event only if the active
//! state still owns that handle.
//!
//! Two schedulers ship with the crate:
//! - [`ManualScheduler`]: virtual clock advanced explicitly, for tests and
//!   simulations
//! - [`RuntimeScheduler`]: tokio-backed, delivers expired handles on a channel

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

mod error;
mod guard;
mod manual;
mod runtime;

pub use error::SchedulerError;
pub use guard::TimeoutGuard;
pub use manual::ManualScheduler;
pub use runtime::RuntimeScheduler;

/// Opaque identifier of one armed timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn into_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// Creates and cancels one-shot timers.
///
/// A timer fires at most once, no earlier than `duration` after creation.
/// A canceled handle may still be in flight to the driver (a runtime timer
/// that expired just before cancellation); the machine discards it because
/// no state owns it any more.
pub trait Scheduler: Send + Sync {
    fn create_timer(&self, duration: Duration) -> Result<TimerHandle, SchedulerError>;

    fn cancel_timer(&self, handle: TimerHandle);
}

/// Scheduler shared between the driver and every guard it arms.
pub type SharedScheduler = Arc<dyn Scheduler>;
