//! The five turnstile states and their entry actions.
//!
//! Each state is constructed only through its `enter` (or `start`) function, which
//! actuates the devices and arms the state's timeout. A state value therefore
//! always has its entry actions applied, whichever dispatch strategy created
//! it.
//!
//! The handlers here are the state-local strategy: every state owns a
//! `handle` method for the events it reacts to, with an explicit catch-all.

use super::context::Context;
use super::events::{Event, StateId};
use crate::core::{Reactive, State};
use crate::devices::LedStatus;
use crate::timer::TimeoutGuard;

/// Decline reason shown when every gateway timed out.
pub const NETWORK_FAILURE: &str = "Network Failure";

/// Waiting for a card.
#[derive(Debug)]
pub struct Locked(());

/// Waiting on a payment gateway.
#[derive(Debug)]
pub struct PaymentProcessing {
    retry_count: usize,
    card_number: String,
    timeout: TimeoutGuard,
}

/// Showing a decline before relocking.
#[derive(Debug)]
pub struct PaymentFailed {
    reason: String,
    timeout: TimeoutGuard,
}

/// Paid; the door is open for a limited time.
#[derive(Debug)]
pub struct PaymentSuccess {
    timeout: TimeoutGuard,
}

/// Paid; the door stays open until someone passes.
#[derive(Debug)]
pub struct Unlocked(());

impl Locked {
    pub(crate) fn enter(ctx: &mut Context) -> Self {
        ctx.door.close();
        ctx.led.set_status(LedStatus::RedCross);
        ctx.pos.set_rows("Touch Card", "", "");
        Self(())
    }

    fn handle(&mut self, event: Event, ctx: &mut Context) -> Option<TurnstileState> {
        match event {
            Event::CardPresented(card) => Some(
                PaymentProcessing::start(ctx, card.card_number)
                    .map_or_else(TurnstileState::from, TurnstileState::from),
            ),
            _ => None,
        }
    }
}

impl PaymentProcessing {
    /// Enter and charge the first gateway.
    ///
    /// Fails over straight to `PaymentFailed` when there is no gateway to
    /// charge.
    pub(crate) fn start(ctx: &mut Context, card_number: String) -> Result<Self, PaymentFailed> {
        ctx.door.close();
        ctx.led.set_status(LedStatus::OrangeCross);
        ctx.pos.set_rows("Processing", "", "");
        if !ctx.initiate_transaction(0, &card_number) {
            return Err(PaymentFailed::enter(ctx, NETWORK_FAILURE.to_string()));
        }
        Ok(Self {
            retry_count: 0,
            timeout: ctx.arm_timeout(),
            card_number,
        })
    }

    /// Attempt counter; the first gateway is attempt 0.
    pub fn retry_count(&self) -> usize {
        self.retry_count
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub(crate) fn timeout_guard(&mut self) -> &mut TimeoutGuard {
        &mut self.timeout
    }

    /// Move on to the next gateway after a timeout.
    ///
    /// Returns the failed state once every gateway has been tried; otherwise
    /// initiates the next attempt, restarts the timer and stays put.
    pub(crate) fn retry(&mut self, ctx: &mut Context) -> Option<PaymentFailed> {
        self.retry_count += 1;
        if !ctx.initiate_transaction(self.retry_count, &self.card_number) {
            return Some(PaymentFailed::enter(ctx, NETWORK_FAILURE.to_string()));
        }
        ctx.rearm(&mut self.timeout);
        None
    }

    fn handle(&mut self, event: Event, ctx: &mut Context) -> Option<TurnstileState> {
        match event {
            Event::TransactionDeclined(declined) => {
                Some(PaymentFailed::enter(ctx, declined.reason).into())
            }
            Event::TransactionSuccess(success) => {
                Some(PaymentSuccess::enter(ctx, success.fare, success.balance).into())
            }
            Event::Timeout(_) => self.retry(ctx).map(Into::into),
            _ => None,
        }
    }
}

impl PaymentFailed {
    pub(crate) fn enter(ctx: &mut Context, reason: String) -> Self {
        ctx.door.close();
        ctx.led.set_status(LedStatus::FlashRedCross);
        ctx.pos.set_rows("Declined", &reason, "");
        Self {
            reason,
            timeout: ctx.arm_timeout(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }

    pub(crate) fn timeout_guard(&mut self) -> &mut TimeoutGuard {
        &mut self.timeout
    }

    fn handle(&mut self, event: Event, ctx: &mut Context) -> Option<TurnstileState> {
        match event {
            Event::Timeout(_) => Some(Locked::enter(ctx).into()),
            _ => None,
        }
    }
}

impl PaymentSuccess {
    /// Fare and balance go to the display only; they are not retained.
    pub(crate) fn enter(ctx: &mut Context, fare: u32, balance: i64) -> Self {
        ctx.door.open();
        ctx.led.set_status(LedStatus::GreenArrow);
        ctx.pos.set_rows(
            "Approved",
            format_args!("Fare: {fare}"),
            format_args!("Balance: {balance}"),
        );
        Self {
            timeout: ctx.arm_timeout(),
        }
    }

    pub(crate) fn timeout_guard(&mut self) -> &mut TimeoutGuard {
        &mut self.timeout
    }

    fn handle(&mut self, event: Event, ctx: &mut Context) -> Option<TurnstileState> {
        match event {
            Event::Timeout(_) => Some(Unlocked::enter(ctx).into()),
            Event::PersonPassed(_) => Some(Locked::enter(ctx).into()),
            _ => None,
        }
    }
}

impl Unlocked {
    pub(crate) fn enter(ctx: &mut Context) -> Self {
        ctx.door.open();
        ctx.led.set_status(LedStatus::GreenArrow);
        ctx.pos.set_rows("Approved", "", "");
        Self(())
    }

    fn handle(&mut self, event: Event, ctx: &mut Context) -> Option<TurnstileState> {
        match event {
            Event::PersonPassed(_) => Some(Locked::enter(ctx).into()),
            _ => None,
        }
    }
}

/// The active turnstile state as a closed sum type.
#[derive(Debug)]
pub enum TurnstileState {
    Locked(Locked),
    PaymentProcessing(PaymentProcessing),
    PaymentFailed(PaymentFailed),
    PaymentSuccess(PaymentSuccess),
    Unlocked(Unlocked),
}

impl From<Locked> for TurnstileState {
    fn from(state: Locked) -> Self {
        Self::Locked(state)
    }
}

impl From<PaymentProcessing> for TurnstileState {
    fn from(state: PaymentProcessing) -> Self {
        Self::PaymentProcessing(state)
    }
}

impl From<PaymentFailed> for TurnstileState {
    fn from(state: PaymentFailed) -> Self {
        Self::PaymentFailed(state)
    }
}

impl From<PaymentSuccess> for TurnstileState {
    fn from(state: PaymentSuccess) -> Self {
        Self::PaymentSuccess(state)
    }
}

impl From<Unlocked> for TurnstileState {
    fn from(state: Unlocked) -> Self {
        Self::Unlocked(state)
    }
}

impl State for TurnstileState {
    type Id = StateId;

    fn id(&self) -> StateId {
        match self {
            Self::Locked(_) => StateId::Locked,
            Self::PaymentProcessing(_) => StateId::PaymentProcessing,
            Self::PaymentFailed(_) => StateId::PaymentFailed,
            Self::PaymentSuccess(_) => StateId::PaymentSuccess,
            Self::Unlocked(_) => StateId::Unlocked,
        }
    }

    fn name(&self) -> &'static str {
        self.id().name()
    }

    fn timer_mut(&mut self) -> Option<&mut TimeoutGuard> {
        match self {
            Self::PaymentProcessing(s) => Some(s.timeout_guard()),
            Self::PaymentFailed(s) => Some(s.timeout_guard()),
            Self::PaymentSuccess(s) => Some(s.timeout_guard()),
            Self::Locked(_) | Self::Unlocked(_) => None,
        }
    }
}

impl Reactive<Event, Context> for TurnstileState {
    fn process(&mut self, event: Event, ctx: &mut Context) -> Option<Self> {
        match self {
            Self::Locked(s) => s.handle(event, ctx),
            Self::PaymentProcessing(s) => s.handle(event, ctx),
            Self::PaymentFailed(s) => s.handle(event, ctx),
            Self::PaymentSuccess(s) => s.handle(event, ctx),
            Self::Unlocked(s) => s.handle(event, ctx),
        }
    }
}

/// A representation of the turnstile state the driver can hold: the enum,
/// or a boxed polymorphic state.
pub trait StateRepr: State<Id = StateId> + Sized {
    /// The `Locked` state, entered through its entry actions.
    fn initial(ctx: &mut Context) -> Self;

    /// Current attempt counter while processing a payment.
    fn retry_count(&self) -> Option<usize>;
}

impl StateRepr for TurnstileState {
    fn initial(ctx: &mut Context) -> Self {
        Locked::enter(ctx).into()
    }

    fn retry_count(&self) -> Option<usize> {
        match self {
            Self::PaymentProcessing(s) => Some(s.retry_count()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TurnstileConfig;
    use crate::devices::DoorStatus;
    use crate::timer::ManualScheduler;
    use crate::turnstile::events::{CardPresented, PersonPassed, Timeout};
    use crate::turnstile::FixedFare;
    use std::sync::Arc;

    fn context() -> (Arc<ManualScheduler>, Context) {
        let manual = Arc::new(ManualScheduler::new());
        let ctx = Context::new(
            &TurnstileConfig::default(),
            manual.clone(),
            Arc::new(FixedFare(5)),
        )
        .unwrap();
        (manual, ctx)
    }

    #[test]
    fn locked_entry_actuates_devices() {
        let (manual, mut ctx) = context();
        ctx.door.open();

        let state = TurnstileState::initial(&mut ctx);

        assert_eq!(state.id(), StateId::Locked);
        assert_eq!(ctx.door().status(), DoorStatus::Closed);
        assert_eq!(ctx.led().status(), LedStatus::RedCross);
        assert_eq!(ctx.pos().rows(), ["Touch Card", "", ""]);
        assert_eq!(manual.pending(), 0);
    }

    #[test]
    fn processing_entry_arms_timer_and_charges_first_gateway() {
        let (manual, mut ctx) = context();

        let state = PaymentProcessing::start(&mut ctx, "A".into()).unwrap();

        assert_eq!(state.retry_count(), 0);
        assert_eq!(state.card_number(), "A");
        assert_eq!(ctx.last_transaction().unwrap().gateway, "Gateway1");
        assert_eq!(manual.pending(), 1);
    }

    #[test]
    fn retry_walks_gateways_then_fails() {
        let (manual, mut ctx) = context();
        let mut state = PaymentProcessing::start(&mut ctx, "A".into()).unwrap();

        assert!(state.retry(&mut ctx).is_none());
        assert_eq!(ctx.last_transaction().unwrap().gateway, "Gateway2");
        assert!(state.retry(&mut ctx).is_none());
        assert_eq!(ctx.last_transaction().unwrap().gateway, "Gateway3");
        assert_eq!(manual.pending(), 1);

        let failed = state.retry(&mut ctx).expect("gateways exhausted");
        assert_eq!(failed.reason(), NETWORK_FAILURE);
        assert_eq!(ctx.pos().rows(), ["Declined", "Network Failure", ""]);
    }

    #[test]
    fn state_local_catch_all_is_no_transition() {
        let (_manual, mut ctx) = context();
        let mut state = TurnstileState::initial(&mut ctx);

        assert!(state.process(Event::from(PersonPassed), &mut ctx).is_none());
        assert!(state.process(Event::from(Timeout), &mut ctx).is_none());

        let next = state.process(Event::from(CardPresented::new("A")), &mut ctx);
        assert_eq!(next.map(|s| s.id()), Some(StateId::PaymentProcessing));
    }

    #[test]
    fn timer_mut_exposes_guard_of_timed_states() {
        let (_manual, mut ctx) = context();
        let mut locked = TurnstileState::initial(&mut ctx);
        assert!(locked.timer_mut().is_none());

        let mut processing: TurnstileState = PaymentProcessing::start(&mut ctx, "A".into()).unwrap().into();
        assert!(processing.timer_mut().is_some_and(|guard| guard.is_armed()));
        assert_eq!(processing.retry_count(), Some(0));
    }
}
