//! Turnstile FSM: a generic state machine engine with pluggable dispatch
//!
//! The engine holds exactly one active state, feeds it typed events, and
//! replaces it whenever a handler produces a successor. How an event reaches
//! its handler is a strategy chosen at construction time.
//!
//! # Core Concepts
//!
//! - **State**: the active value, inspected through a cheap discriminator
//! - **Dispatch**: state-local handlers, an external transition table, or
//!   boxed polymorphic states
//! - **Timeout guards**: scoped timers owned by time-limited states and
//!   canceled when those states are replaced
//!
//! The `turnstile` module wires a card-operated turnstile onto the engine
//! with all three strategies.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use turnstile_fsm::builder::TurnstileBuilder;
//! use turnstile_fsm::timer::ManualScheduler;
//! use turnstile_fsm::turnstile::{CardPresented, FixedFare, StateId};
//!
//! let clock = Arc::new(ManualScheduler::new());
//! let mut turnstile = TurnstileBuilder::new()
//!     .scheduler(clock.clone())
//!     .fare(Arc::new(FixedFare(5)))
//!     .build_local()
//!     .unwrap();
//!
//! turnstile.process(CardPresented::new("A"));
//! assert_eq!(turnstile.state(), StateId::PaymentProcessing);
//!
//! for handle in clock.advance(Duration::from_secs(2)) {
//!     turnstile.on_timer(handle);
//! }
//! assert_eq!(turnstile.retry_count(), Some(1));
//! assert_eq!(turnstile.last_transaction().unwrap().gateway, "Gateway2");
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod devices;
pub mod timer;
pub mod turnstile;

// Re-export commonly used types
pub use builder::{BuildError, TurnstileBuilder};
pub use config::{ConfigError, TurnstileConfig};
pub use core::{Dispatch, Event, External, Machine, State, StateLocal, Virtual};
pub use timer::{ManualScheduler, RuntimeScheduler, Scheduler, SharedScheduler, TimerHandle};
pub use turnstile::{LocalTurnstile, StateId, TableTurnstile, Turnstile, VirtualTurnstile};
