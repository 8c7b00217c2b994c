//! LED indicator above the gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Indicator shown above the gate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedStatus {
    #[default]
    RedCross,
    FlashRedCross,
    GreenArrow,
    OrangeCross,
}

impl fmt::Display for LedStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RedCross => "RedCross",
            Self::FlashRedCross => "FlashRedCross",
            Self::GreenArrow => "GreenArrow",
            Self::OrangeCross => "OrangeCross",
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedController {
    status: LedStatus,
}

impl LedController {
    pub fn set_status(&mut self, status: LedStatus) {
        self.status = status;
    }

    pub fn status(&self) -> LedStatus {
        self.status
    }
}
