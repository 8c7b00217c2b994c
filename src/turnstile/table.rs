//! External transition table for the turnstile.

use super::context::Context;
use super::events::Event;
use super::states::{
    Locked, PaymentFailed, PaymentProcessing, PaymentSuccess, TurnstileState, Unlocked,
};
use crate::core::Transitions;

/// Every legal `(state, event)` pair in one place.
///
/// The states only provide entry actions and their retry step; which event
/// leads where is decided here. Pairs not listed fall through to the final
/// arm and produce no transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnstileTable;

impl Transitions<TurnstileState, Event, Context> for TurnstileTable {
    fn transition(
        &mut self,
        state: &mut TurnstileState,
        event: Event,
        ctx: &mut Context,
    ) -> Option<TurnstileState> {
        use TurnstileState as S;

        match (state, event) {
            (S::Locked(_), Event::CardPresented(card)) => {
                Some(
                    PaymentProcessing::start(ctx, card.card_number)
                        .map_or_else(S::from, S::from),
                )
            }
            (S::PaymentProcessing(_), Event::TransactionDeclined(declined)) => {
                Some(PaymentFailed::enter(ctx, declined.reason).into())
            }
            (S::PaymentProcessing(_), Event::TransactionSuccess(success)) => {
                Some(PaymentSuccess::enter(ctx, success.fare, success.balance).into())
            }
            (S::PaymentProcessing(processing), Event::Timeout(_)) => {
                processing.retry(ctx).map(Into::into)
            }
            (S::PaymentFailed(_), Event::Timeout(_)) => Some(Locked::enter(ctx).into()),
            (S::PaymentSuccess(_), Event::Timeout(_)) => Some(Unlocked::enter(ctx).into()),
            (S::PaymentSuccess(_) | S::Unlocked(_), Event::PersonPassed(_)) => {
                Some(Locked::enter(ctx).into())
            }
            _ => None,
        }
    }
}
