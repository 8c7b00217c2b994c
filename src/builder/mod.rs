//! Builder API for assembling a turnstile.
//!
//! The builder gathers configuration and collaborators, validates them, and
//! hands back a turnstile driven by the requested dispatch strategy.

pub mod error;
pub mod macros;

pub use error::BuildError;

use crate::config::{ConfigError, TurnstileConfig};
use crate::core::{Dispatch, External, StateLocal, Virtual};
use crate::timer::SharedScheduler;
use crate::turnstile::{
    Context, Event, FareSource, HourlyFare, LocalTurnstile, StateRepr, TableTurnstile,
    Turnstile, TurnstileTable, VirtualTurnstile, HOURS_PER_DAY,
};
use std::sync::Arc;
use tracing::debug;

/// Fluent builder for [`Turnstile`]s.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use turnstile_fsm::builder::TurnstileBuilder;
/// use turnstile_fsm::timer::ManualScheduler;
/// use turnstile_fsm::turnstile::{CardPresented, FixedFare, StateId};
///
/// let mut turnstile = TurnstileBuilder::new()
///     .scheduler(Arc::new(ManualScheduler::new()))
///     .fare(Arc::new(FixedFare(5)))
///     .build_table()
///     .unwrap();
///
/// turnstile.process(CardPresented::new("A"));
/// assert_eq!(turnstile.state(), StateId::PaymentProcessing);
/// ```
#[derive(Clone, Default)]
pub struct TurnstileBuilder {
    config: TurnstileConfig,
    scheduler: Option<SharedScheduler>,
    fare: Option<Arc<dyn FareSource>>,
}

impl TurnstileBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: TurnstileConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the timer scheduler (required).
    pub fn scheduler(mut self, scheduler: SharedScheduler) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Override the fare source. Defaults to an [`HourlyFare`] over the
    /// configured rates.
    pub fn fare(mut self, fare: Arc<dyn FareSource>) -> Self {
        self.fare = Some(fare);
        self
    }

    /// Build a turnstile driven by an arbitrary strategy.
    pub fn build_with<S, D>(self, strategy: D) -> Result<Turnstile<S, D>, BuildError>
    where
        S: StateRepr,
        D: Dispatch<S, Event, Context>,
    {
        let context = self.into_context()?;
        Ok(Turnstile::new(strategy, context))
    }

    pub fn build_local(self) -> Result<LocalTurnstile, BuildError> {
        self.build_with(StateLocal)
    }

    pub fn build_table(self) -> Result<TableTurnstile, BuildError> {
        self.build_with(External::new(TurnstileTable))
    }

    pub fn build_virtual(self) -> Result<VirtualTurnstile, BuildError> {
        self.build_with(Virtual)
    }

    fn into_context(self) -> Result<Context, BuildError> {
        let scheduler = self.scheduler.ok_or(BuildError::MissingScheduler)?;
        self.config.check().map_err(BuildError::InvalidConfig)?;

        let fare = match self.fare {
            Some(fare) => fare,
            None => {
                let rates = self.config.hourly_rates().ok_or_else(|| {
                    BuildError::InvalidConfig(vec![ConfigError::RateTableSize {
                        expected: HOURS_PER_DAY,
                        found: self.config.rates.len(),
                    }])
                })?;
                Arc::new(HourlyFare::new(rates)) as Arc<dyn FareSource>
            }
        };

        debug!(
            gateways = self.config.gateways.len(),
            timeout_ms = self.config.timeout_ms,
            "building turnstile"
        );
        Context::new(&self.config, scheduler, fare)
    }
}
