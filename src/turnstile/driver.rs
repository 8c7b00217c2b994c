//! The turnstile as a driver sees it: one machine plus its devices.

use super::context::{Context, Transaction};
use super::events::{Event, StateId, Timeout};
use super::polymorphic::BoxedState;
use super::states::{StateRepr, TurnstileState};
use super::table::TurnstileTable;
use crate::core::{Dispatch, External, Machine, StateLocal, Virtual};
use crate::devices::{DoorStatus, LedController, LedStatus, PosTerminal, SwingDoor};
use crate::timer::{SchedulerError, TimerHandle};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

/// Turnstile driven by the state-local strategy.
pub type LocalTurnstile = Turnstile<TurnstileState, StateLocal>;

/// Turnstile driven by [`TurnstileTable`].
pub type TableTurnstile = Turnstile<TurnstileState, External<TurnstileTable>>;

/// Turnstile driven by boxed [`Behaviour`](super::Behaviour) states.
pub type VirtualTurnstile = Turnstile<BoxedState, Virtual>;

/// A turnstile session.
///
/// Owns the handler [`Context`] next to the [`Machine`], so every strategy
/// sees the same devices and payment plumbing. Events go in through
/// [`process`](Self::process); expired timers come back through
/// [`on_timer`](Self::on_timer).
pub struct Turnstile<S, D> {
    context: Context,
    machine: Machine<S, D>,
}

impl<S, D> Turnstile<S, D>
where
    S: StateRepr,
    D: Dispatch<S, Event, Context>,
{
    /// Start in `Locked`, running its entry actions against `context`.
    pub fn new(strategy: D, mut context: Context) -> Self {
        let initial = S::initial(&mut context);
        Self {
            machine: Machine::new(strategy, initial),
            context,
        }
    }

    pub fn process(&mut self, event: impl Into<Event>) -> &mut Self {
        self.machine.process(event.into(), &mut self.context);
        self
    }

    /// Deliver an expired timer as a `Timeout` event.
    ///
    /// Handles not owned by the active state are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> &mut Self {
        self.machine
            .expire(handle, Event::Timeout(Timeout), &mut self.context);
        self
    }

    pub fn state(&self) -> StateId {
        self.machine.state()
    }

    /// Attempt counter while in `PaymentProcessing`.
    pub fn retry_count(&self) -> Option<usize> {
        self.machine.current().retry_count()
    }

    pub fn door(&self) -> &SwingDoor {
        self.context.door()
    }

    pub fn led(&self) -> &LedController {
        self.context.led()
    }

    pub fn pos(&self) -> &PosTerminal {
        self.context.pos()
    }

    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.context.last_transaction()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn machine(&self) -> &Machine<S, D> {
        &self.machine
    }

    /// Scheduler faults raised since the last call.
    pub fn take_faults(&mut self) -> Vec<SchedulerError> {
        self.context.take_faults()
    }

    /// Observable readout of state and devices.
    pub fn snapshot(&self) -> Snapshot {
        let [first, second, third] = self.pos().rows();
        Snapshot {
            state: self.state(),
            door: self.door().status(),
            led: self.led().status(),
            rows: [first.to_owned(), second.to_owned(), third.to_owned()],
            last_transaction: self.last_transaction().cloned(),
        }
    }

    /// Log and return a one-line summary of state and devices.
    pub fn dump(&self) -> String {
        let line = format!(
            "STATE: {} :: Door[{}], LED: [{}] and PosTerminal[{}]",
            self.state(),
            self.door().status(),
            self.led().status(),
            self.pos()
        );
        info!("{line}");
        line
    }
}

/// Point-in-time readout of a turnstile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub state: StateId,
    pub door: DoorStatus,
    pub led: LedStatus,
    pub rows: [String; 3],
    pub last_transaction: Option<Transaction>,
}

impl<S, D> fmt::Debug for Turnstile<S, D>
where
    S: StateRepr,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Turnstile")
            .field("state", &self.machine.state())
            .field("context", &self.context)
            .finish()
    }
}
