//! Fare lookup by time of day.

use chrono::{Local, Timelike};

pub const HOURS_PER_DAY: usize = 24;

/// Night, peak and off-peak bands, indexed by hour starting at midnight.
pub const DEFAULT_RATES: [u32; HOURS_PER_DAY] = [
    3, 3, 3, 3, 3, 3, 7, 7, 7, 7, 5, 5, 5, 5, 5, 7, 7, 7, 5, 5, 5, 5, 3, 3,
];

/// Source of the amount charged when a transaction is initiated.
///
/// Read at every attempt, never mutated by the state machine.
pub trait FareSource: Send + Sync {
    fn current_fare(&self) -> u32;
}

/// Fare from a 24-entry hourly table and the local wall clock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HourlyFare {
    rates: [u32; HOURS_PER_DAY],
}

impl HourlyFare {
    pub fn new(rates: [u32; HOURS_PER_DAY]) -> Self {
        Self { rates }
    }

    /// Fare for a given hour; hours wrap around the day.
    pub fn fare_at(&self, hour: u32) -> u32 {
        self.rates[hour as usize % HOURS_PER_DAY]
    }
}

impl Default for HourlyFare {
    fn default() -> Self {
        Self::new(DEFAULT_RATES)
    }
}

impl FareSource for HourlyFare {
    fn current_fare(&self) -> u32 {
        self.fare_at(Local::now().hour())
    }
}

/// Constant fare, for tests and flat-rate gates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedFare(pub u32);

impl FareSource for FixedFare {
    fn current_fare(&self) -> u32 {
        self.0
    }
}
