//! Swing door at the gate.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorStatus {
    #[default]
    Closed,
    Open,
}

impl fmt::Display for DoorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Closed => "Closed",
            Self::Open => "Open",
        })
    }
}

/// Swing door; starts closed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SwingDoor {
    status: DoorStatus,
}

impl SwingDoor {
    pub fn open(&mut self) {
        self.status = DoorStatus::Open;
    }

    pub fn close(&mut self) {
        self.status = DoorStatus::Closed;
    }

    pub fn status(&self) -> DoorStatus {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn door_starts_closed_and_toggles() {
        let mut door = SwingDoor::default();
        assert_eq!(door.status(), DoorStatus::Closed);

        door.open();
        assert_eq!(door.status(), DoorStatus::Open);

        door.close();
        assert_eq!(door.status(), DoorStatus::Closed);
    }
}
