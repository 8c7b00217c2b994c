//! Everything state handlers may touch: devices, payments and timers.

use super::fare::FareSource;
use crate::builder::BuildError;
use crate::config::TurnstileConfig;
use crate::devices::{LedController, PosTerminal, SwingDoor};
use crate::timer::{SchedulerError, SharedScheduler, TimeoutGuard};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// A payment attempt, overwritten on every attempt.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub gateway: String,
    pub card_number: String,
    pub amount: u32,
}

/// Handler context owned by the turnstile, next to its machine.
pub struct Context {
    pub(crate) door: SwingDoor,
    pub(crate) led: LedController,
    pub(crate) pos: PosTerminal,
    last_transaction: Option<Transaction>,
    gateways: Vec<String>,
    timeout: Duration,
    fare: Arc<dyn FareSource>,
    scheduler: SharedScheduler,
    faults: Vec<SchedulerError>,
}

impl Context {
    /// Validate `config` and assemble the handler context.
    ///
    /// Every configuration violation is reported at once.
    pub fn new(
        config: &TurnstileConfig,
        scheduler: SharedScheduler,
        fare: Arc<dyn FareSource>,
    ) -> Result<Self, BuildError> {
        config.check().map_err(BuildError::InvalidConfig)?;
        Ok(Self {
            door: SwingDoor::default(),
            led: LedController::default(),
            pos: PosTerminal::default(),
            last_transaction: None,
            gateways: config.gateways.clone(),
            timeout: config.timeout(),
            fare,
            scheduler,
            faults: Vec::new(),
        })
    }

    pub fn door(&self) -> &SwingDoor {
        &self.door
    }

    pub fn led(&self) -> &LedController {
        &self.led
    }

    pub fn pos(&self) -> &PosTerminal {
        &self.pos
    }

    pub fn last_transaction(&self) -> Option<&Transaction> {
        self.last_transaction.as_ref()
    }

    pub fn gateways(&self) -> &[String] {
        &self.gateways
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Drain scheduler faults raised while arming timeouts.
    pub fn take_faults(&mut self) -> Vec<SchedulerError> {
        std::mem::take(&mut self.faults)
    }

    /// Start a payment on the gateway for `attempt`.
    ///
    /// Returns `false` without side effects once `attempt` is past the last
    /// configured gateway.
    pub(crate) fn initiate_transaction(&mut self, attempt: usize, card_number: &str) -> bool {
        let Some(gateway) = self.gateways.get(attempt) else {
            return false;
        };
        let amount = self.fare.current_fare();
        info!(
            "ACTIONS: Initiated Transaction to [{gateway}] with card [{card_number}] for amount [{amount}]"
        );
        self.last_transaction = Some(Transaction {
            gateway: gateway.clone(),
            card_number: card_number.to_owned(),
            amount,
        });
        true
    }

    /// A guard armed for the configured timeout.
    pub(crate) fn arm_timeout(&mut self) -> TimeoutGuard {
        let mut guard = TimeoutGuard::disarmed(Arc::clone(&self.scheduler));
        self.rearm(&mut guard);
        guard
    }

    /// Restart `guard` for the configured timeout. A scheduler fault leaves
    /// the guard disarmed and is queued for [`take_faults`](Self::take_faults).
    pub(crate) fn rearm(&mut self, guard: &mut TimeoutGuard) {
        if let Err(fault) = guard.restart(self.timeout) {
            error!(error = %fault, "failed to arm timeout");
            self.faults.push(fault);
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("door", &self.door)
            .field("led", &self.led)
            .field("pos", &self.pos)
            .field("last_transaction", &self.last_transaction)
            .field("gateways", &self.gateways)
            .field("timeout", &self.timeout)
            .field("faults", &self.faults)
            .finish_non_exhaustive()
    }
}
