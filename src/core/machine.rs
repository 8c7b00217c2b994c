//! State machine that owns the active state and applies transitions.

use crate::core::dispatch::Dispatch;
use crate::core::event::Event;
use crate::core::state::State;
use crate::timer::TimerHandle;
use tracing::{debug, info, trace};

/// Generic finite-state machine.
///
/// Holds exactly one active state `S` and a dispatch strategy `D`. The
/// context `C` handed to handlers is owned by the caller, so devices and
/// other collaborators live next to the machine rather than inside it.
#[derive(Debug)]
pub struct Machine<S, D> {
    state: S,
    strategy: D,
}

impl<S: State, D> Machine<S, D> {
    /// Create a machine in its initial state.
    pub fn new(strategy: D, initial: S) -> Self {
        Self {
            state: initial,
            strategy,
        }
    }

    /// Feed one event through the strategy.
    ///
    /// If the strategy yields a successor it replaces the active state in a
    /// single assignment and the previous state is dropped before this call
    /// returns, retiring any timer it owned.
    pub fn process<E, C>(&mut self, event: E, ctx: &mut C) -> &mut Self
    where
        E: Event,
        D: Dispatch<S, E, C>,
    {
        info!("EVENT: {}", event.name());
        let from = self.state.name();
        match self.strategy.execute(&mut self.state, event, ctx) {
            Some(next) => {
                self.state = next;
                debug!(from, to = self.state.name(), "transition applied");
            }
            None => trace!(state = from, "no transition"),
        }
        self
    }

    /// Deliver a timer expiry.
    ///
    /// The event is processed only when the active state's guard is armed
    /// with `handle`; anything else is a stale expiry and is dropped.
    /// Returns whether the event was delivered.
    pub fn expire<E, C>(&mut self, handle: TimerHandle, event: E, ctx: &mut C) -> bool
    where
        E: Event,
        D: Dispatch<S, E, C>,
    {
        let owned = self
            .state
            .timer_mut()
            .is_some_and(|guard| guard.fire(handle));
        if owned {
            self.process(event, ctx);
        } else {
            debug!(?handle, state = self.state.name(), "ignoring stale timer");
        }
        owned
    }

    /// Discriminator of the active state (pure).
    pub fn state(&self) -> S::Id {
        self.state.id()
    }

    /// Borrow the active state (pure).
    pub fn current(&self) -> &S {
        &self.state
    }

    pub fn strategy(&self) -> &D {
        &self.strategy
    }
}
