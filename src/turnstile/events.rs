//! Events accepted by the turnstile.

use crate::event_set;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A card was tapped on the reader.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardPresented {
    pub card_number: String,
}

impl CardPresented {
    pub fn new(card_number: impl Into<String>) -> Self {
        Self {
            card_number: card_number.into(),
        }
    }
}

/// The payment gateway refused the charge.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionDeclined {
    pub reason: String,
}

impl TransactionDeclined {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The payment gateway approved the charge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionSuccess {
    pub fare: u32,
    pub balance: i64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonPassed;

/// The active state's timer expired.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timeout;

event_set! {
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub enum Event {
        CardPresented(CardPresented),
        TransactionDeclined(TransactionDeclined),
        TransactionSuccess(TransactionSuccess),
        PersonPassed(PersonPassed),
        Timeout(Timeout),
    }
}

/// Discriminator of the turnstile's active state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateId {
    Locked,
    PaymentProcessing,
    PaymentFailed,
    PaymentSuccess,
    Unlocked,
}

impl StateId {
    pub const ALL: [StateId; 5] = [
        StateId::Locked,
        StateId::PaymentProcessing,
        StateId::PaymentFailed,
        StateId::PaymentSuccess,
        StateId::Unlocked,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Locked => "Locked",
            Self::PaymentProcessing => "PaymentProcessing",
            Self::PaymentFailed => "PaymentFailed",
            Self::PaymentSuccess => "PaymentSuccess",
            Self::Unlocked => "Unlocked",
        }
    }

    /// Whether states with this id own a timeout.
    pub fn is_timed(self) -> bool {
        matches!(
            self,
            Self::PaymentProcessing | Self::PaymentFailed | Self::PaymentSuccess
        )
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
