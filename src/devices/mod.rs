//! Devices wired to the turnstile.
//!
//! These are passive value holders: they are mutated only by state entry
//! actions and hold no transition logic of their own.

mod door;
mod led;
mod pos;

pub use door::{DoorStatus, SwingDoor};
pub use led::{LedController, LedStatus};
pub use pos::PosTerminal;
