//! Generic state machine engine.
//!
//! This module contains everything that is independent of a particular
//! state/event set:
//! - State and event traits
//! - The three interchangeable dispatch strategies
//! - The `Machine` container that performs substitution-on-transition

mod dispatch;
mod event;
mod machine;
mod state;

pub use dispatch::{
    Dispatch, External, Polymorphic, Reactive, StateLocal, Transitions, Virtual,
};
pub use event::Event;
pub use machine::Machine;
pub use state::State;
