//! Card-operated turnstile built on the generic engine.
//!
//! The same five states and five events are wired up three ways:
//!
//! - [`LocalTurnstile`]: the [`TurnstileState`] enum handles its own events
//! - [`TableTurnstile`]: [`TurnstileTable`] owns every transition
//! - [`VirtualTurnstile`]: boxed [`Behaviour`] objects return boxed successors
//!
//! All three share entry actions, retry policy and devices, so a given event
//! sequence yields the same readout whichever strategy runs it.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use turnstile_fsm::config::TurnstileConfig;
//! use turnstile_fsm::core::StateLocal;
//! use turnstile_fsm::timer::ManualScheduler;
//! use turnstile_fsm::turnstile::{
//!     CardPresented, Context, FixedFare, LocalTurnstile, StateId, TransactionDeclined,
//! };
//!
//! let scheduler = Arc::new(ManualScheduler::new());
//! let context =
//!     Context::new(&TurnstileConfig::default(), scheduler, Arc::new(FixedFare(5))).unwrap();
//! let mut turnstile = LocalTurnstile::new(StateLocal, context);
//!
//! turnstile
//!     .process(CardPresented::new("A"))
//!     .process(TransactionDeclined::new("Insufficient Funds"));
//!
//! assert_eq!(turnstile.state(), StateId::PaymentFailed);
//! assert_eq!(turnstile.pos().rows(), ["Declined", "Insufficient Funds", ""]);
//! ```

mod context;
mod driver;
mod events;
mod fare;
mod polymorphic;
mod states;
mod table;

pub use context::{Context, Transaction};
pub use driver::{LocalTurnstile, Snapshot, TableTurnstile, Turnstile, VirtualTurnstile};
pub use events::{
    CardPresented, Event, PersonPassed, StateId, Timeout, TransactionDeclined, TransactionSuccess,
};
pub use fare::{FareSource, FixedFare, HourlyFare, DEFAULT_RATES, HOURS_PER_DAY};
pub use polymorphic::{Behaviour, BoxedState};
pub use states::{
    Locked, PaymentFailed, PaymentProcessing, PaymentSuccess, StateRepr, TurnstileState,
    Unlocked, NETWORK_FAILURE,
};
pub use table::TurnstileTable;
