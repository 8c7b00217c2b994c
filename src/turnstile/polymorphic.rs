//! Heap-allocated turnstile states behind a common base trait.
//!
//! Each state overrides only the handlers for events it reacts to; every
//! other handler keeps its default and reports no transition. A transition
//! returns a freshly boxed successor, and the machine drops the old box when
//! it installs the new one.

use super::context::Context;
use super::events::{
    CardPresented, Event, PersonPassed, StateId, Timeout, TransactionDeclined, TransactionSuccess,
};
use super::states::{
    Locked, PaymentFailed, PaymentProcessing, PaymentSuccess, StateRepr, Unlocked,
};
use crate::core::{Polymorphic, State};
use crate::timer::TimeoutGuard;

/// Owning pointer to the active polymorphic state.
pub type BoxedState = Box<dyn Behaviour>;

/// Base interface of polymorphic turnstile states.
pub trait Behaviour {
    fn id(&self) -> StateId;

    fn timeout_mut(&mut self) -> Option<&mut TimeoutGuard> {
        None
    }

    fn retry_count(&self) -> Option<usize> {
        None
    }

    fn on_card_presented(&mut self, _event: CardPresented, _ctx: &mut Context) -> Option<BoxedState> {
        None
    }

    fn on_transaction_declined(
        &mut self,
        _event: TransactionDeclined,
        _ctx: &mut Context,
    ) -> Option<BoxedState> {
        None
    }

    fn on_transaction_success(
        &mut self,
        _event: TransactionSuccess,
        _ctx: &mut Context,
    ) -> Option<BoxedState> {
        None
    }

    fn on_person_passed(&mut self, _event: PersonPassed, _ctx: &mut Context) -> Option<BoxedState> {
        None
    }

    fn on_timeout(&mut self, _event: Timeout, _ctx: &mut Context) -> Option<BoxedState> {
        None
    }
}

impl State for dyn Behaviour {
    type Id = StateId;

    fn id(&self) -> StateId {
        Behaviour::id(self)
    }

    fn name(&self) -> &'static str {
        Behaviour::id(self).name()
    }

    fn timer_mut(&mut self) -> Option<&mut TimeoutGuard> {
        self.timeout_mut()
    }
}

impl Polymorphic<Event, Context> for dyn Behaviour {
    fn process(&mut self, event: Event, ctx: &mut Context) -> Option<Box<Self>> {
        match event {
            Event::CardPresented(e) => self.on_card_presented(e, ctx),
            Event::TransactionDeclined(e) => self.on_transaction_declined(e, ctx),
            Event::TransactionSuccess(e) => self.on_transaction_success(e, ctx),
            Event::PersonPassed(e) => self.on_person_passed(e, ctx),
            Event::Timeout(e) => self.on_timeout(e, ctx),
        }
    }
}

impl StateRepr for BoxedState {
    fn initial(ctx: &mut Context) -> Self {
        Box::new(Locked::enter(ctx))
    }

    fn retry_count(&self) -> Option<usize> {
        Behaviour::retry_count(&**self)
    }
}

impl Behaviour for Locked {
    fn id(&self) -> StateId {
        StateId::Locked
    }

    fn on_card_presented(&mut self, event: CardPresented, ctx: &mut Context) -> Option<BoxedState> {
        Some(match PaymentProcessing::start(ctx, event.card_number) {
            Ok(processing) => Box::new(processing),
            Err(failed) => Box::new(failed),
        })
    }
}

impl Behaviour for PaymentProcessing {
    fn id(&self) -> StateId {
        StateId::PaymentProcessing
    }

    fn timeout_mut(&mut self) -> Option<&mut TimeoutGuard> {
        Some(self.timeout_guard())
    }

    fn retry_count(&self) -> Option<usize> {
        Some(PaymentProcessing::retry_count(self))
    }

    fn on_transaction_declined(
        &mut self,
        event: TransactionDeclined,
        ctx: &mut Context,
    ) -> Option<BoxedState> {
        Some(Box::new(PaymentFailed::enter(ctx, event.reason)))
    }

    fn on_transaction_success(
        &mut self,
        event: TransactionSuccess,
        ctx: &mut Context,
    ) -> Option<BoxedState> {
        Some(Box::new(PaymentSuccess::enter(ctx, event.fare, event.balance)))
    }

    fn on_timeout(&mut self, _event: Timeout, ctx: &mut Context) -> Option<BoxedState> {
        self.retry(ctx).map(|failed| Box::new(failed) as BoxedState)
    }
}

impl Behaviour for PaymentFailed {
    fn id(&self) -> StateId {
        StateId::PaymentFailed
    }

    fn timeout_mut(&mut self) -> Option<&mut TimeoutGuard> {
        Some(self.timeout_guard())
    }

    fn on_timeout(&mut self, _event: Timeout, ctx: &mut Context) -> Option<BoxedState> {
        Some(Box::new(Locked::enter(ctx)))
    }
}

impl Behaviour for PaymentSuccess {
    fn id(&self) -> StateId {
        StateId::PaymentSuccess
    }

    fn timeout_mut(&mut self) -> Option<&mut TimeoutGuard> {
        Some(self.timeout_guard())
    }

    fn on_person_passed(&mut self, _event: PersonPassed, ctx: &mut Context) -> Option<BoxedState> {
        Some(Box::new(Locked::enter(ctx)))
    }

    fn on_timeout(&mut self, _event: Timeout, ctx: &mut Context) -> Option<BoxedState> {
        Some(Box::new(Unlocked::enter(ctx)))
    }
}

impl Behaviour for Unlocked {
    fn id(&self) -> StateId {
        StateId::Unlocked
    }

    fn on_person_passed(&mut self, _event: PersonPassed, ctx: &mut Context) -> Option<BoxedState> {
        Some(Box::new(Locked::enter(ctx)))
    }
}
