//! Property-based tests for the turnstile machine.
//!
//! These tests use proptest to drive turnstiles with random event and
//! clock sequences and check the properties every strategy must share.

use proptest::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use turnstile_fsm::builder::TurnstileBuilder;
use turnstile_fsm::core::Dispatch;
use turnstile_fsm::timer::ManualScheduler;
use turnstile_fsm::turnstile::{
    CardPresented, Context, Event, FixedFare, PersonPassed, Snapshot, StateId, StateRepr, Timeout,
    TransactionDeclined, TransactionSuccess, Turnstile,
};

const TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {
    Card,
    Decline,
    Approve,
    Pass,
    Timeout,
    /// Let the clock run for one timeout period and forward expiries.
    Elapse,
}

impl Op {
    fn event(self) -> Option<Event> {
        match self {
            Op::Card => Some(CardPresented::new("A").into()),
            Op::Decline => Some(TransactionDeclined::new("Insufficient Funds").into()),
            Op::Approve => Some(TransactionSuccess { fare: 5, balance: 25 }.into()),
            Op::Pass => Some(PersonPassed.into()),
            Op::Timeout => Some(Timeout.into()),
            Op::Elapse => None,
        }
    }
}

prop_compose! {
    fn arbitrary_op()(variant in 0..6u8) -> Op {
        match variant {
            0 => Op::Card,
            1 => Op::Decline,
            2 => Op::Approve,
            3 => Op::Pass,
            4 => Op::Timeout,
            _ => Op::Elapse,
        }
    }
}

prop_compose! {
    fn arbitrary_event_op()(variant in 0..5u8) -> Op {
        match variant {
            0 => Op::Card,
            1 => Op::Decline,
            2 => Op::Approve,
            3 => Op::Pass,
            _ => Op::Timeout,
        }
    }
}

/// Whether the transition table has an entry for this pair.
fn has_transition(state: StateId, op: Op) -> bool {
    matches!(
        (state, op),
        (StateId::Locked, Op::Card)
            | (StateId::PaymentProcessing, Op::Decline)
            | (StateId::PaymentProcessing, Op::Approve)
            | (StateId::PaymentProcessing, Op::Timeout)
            | (StateId::PaymentFailed, Op::Timeout)
            | (StateId::PaymentSuccess, Op::Timeout)
            | (StateId::PaymentSuccess, Op::Pass)
            | (StateId::Unlocked, Op::Pass)
    )
}

fn builder(clock: &Arc<ManualScheduler>) -> TurnstileBuilder {
    TurnstileBuilder::new()
        .scheduler(clock.clone())
        .fare(Arc::new(FixedFare(5)))
}

fn apply<S, D>(turnstile: &mut Turnstile<S, D>, clock: &ManualScheduler, op: Op)
where
    S: StateRepr,
    D: Dispatch<S, Event, Context>,
{
    match op.event() {
        Some(event) => {
            turnstile.process(event);
        }
        None => {
            for handle in clock.advance(TIMEOUT) {
                turnstile.on_timer(handle);
            }
        }
    }
}

/// Snapshot after every op.
fn trace<S, D>(mut turnstile: Turnstile<S, D>, clock: &ManualScheduler, ops: &[Op]) -> Vec<Snapshot>
where
    S: StateRepr,
    D: Dispatch<S, Event, Context>,
{
    ops.iter()
        .map(|op| {
            apply(&mut turnstile, clock, *op);
            turnstile.snapshot()
        })
        .collect()
}

fn local_trace(ops: &[Op]) -> Vec<Snapshot> {
    let clock = Arc::new(ManualScheduler::new());
    trace(builder(&clock).build_local().unwrap(), &clock, ops)
}

fn table_trace(ops: &[Op]) -> Vec<Snapshot> {
    let clock = Arc::new(ManualScheduler::new());
    trace(builder(&clock).build_table().unwrap(), &clock, ops)
}

fn virtual_trace(ops: &[Op]) -> Vec<Snapshot> {
    let clock = Arc::new(ManualScheduler::new());
    trace(builder(&clock).build_virtual().unwrap(), &clock, ops)
}

proptest! {
    #[test]
    fn replay_is_deterministic(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        prop_assert_eq!(local_trace(&ops), local_trace(&ops));
        prop_assert_eq!(virtual_trace(&ops), virtual_trace(&ops));
    }

    #[test]
    fn strategies_agree_step_by_step(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let local = local_trace(&ops);

        prop_assert_eq!(&local, &table_trace(&ops));
        prop_assert_eq!(&local, &virtual_trace(&ops));
    }

    #[test]
    fn off_table_events_change_nothing(
        prefix in prop::collection::vec(arbitrary_op(), 0..20),
        op in arbitrary_event_op(),
    ) {
        let clock = Arc::new(ManualScheduler::new());
        let mut turnstile = builder(&clock).build_table().unwrap();
        for step in &prefix {
            apply(&mut turnstile, &clock, *step);
        }

        let state = turnstile.state();
        let before = serde_json::to_vec(&turnstile.snapshot()).unwrap();
        let pending = clock.pending();
        apply(&mut turnstile, &clock, op);
        let after = serde_json::to_vec(&turnstile.snapshot()).unwrap();

        if !has_transition(state, op) {
            prop_assert_eq!(before, after);
            prop_assert_eq!(clock.pending(), pending);
        }
    }

    #[test]
    fn fewer_than_three_timeouts_keep_retrying(timeouts in 0..3usize) {
        let clock = Arc::new(ManualScheduler::new());
        let mut turnstile = builder(&clock).build_local().unwrap();
        turnstile.process(CardPresented::new("A"));

        for _ in 0..timeouts {
            turnstile.process(Timeout);
        }

        prop_assert_eq!(turnstile.state(), StateId::PaymentProcessing);
        prop_assert_eq!(turnstile.retry_count(), Some(timeouts));
        let expected = format!("Gateway{}", timeouts + 1);
        prop_assert_eq!(turnstile.last_transaction().map(|t| t.gateway.as_str()), Some(expected.as_str()));

        turnstile.process(Timeout);
        let failed = timeouts == 2;
        prop_assert_eq!(turnstile.state() == StateId::PaymentFailed, failed);
    }

    #[test]
    fn exactly_timed_states_hold_a_timer(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let clock = Arc::new(ManualScheduler::new());
        let mut turnstile = builder(&clock).build_virtual().unwrap();

        for op in ops {
            apply(&mut turnstile, &clock, op);
            let expected = usize::from(turnstile.state().is_timed());
            prop_assert_eq!(clock.pending(), expected);
        }
    }
}
