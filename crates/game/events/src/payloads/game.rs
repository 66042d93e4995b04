use super::{Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shared by `game.started`, `game.paused`, `game.resumed` and `game.stopped`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameStateChanged {
    /// What triggered the change ("pause menu", "level transition dismissed").
    pub reason: String,
    pub timestamp: Timestamp,
}

impl GameStateChanged {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameOver {
    pub victory: bool,
    pub score: u32,
    pub timestamp: Timestamp,
}

impl GameOver {
    pub fn new(victory: bool, score: u32) -> Self {
        Self {
            victory,
            score,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RestartRequested {
    /// Restart from the last checkpoint instead of the level start.
    pub from_checkpoint: bool,
    pub timestamp: Timestamp,
}

impl RestartRequested {
    pub fn new(from_checkpoint: bool) -> Self {
        Self {
            from_checkpoint,
            timestamp: now(),
        }
    }
}

/// Progress report for one stage of the restart pipeline.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RestartStage {
    /// Entities touched by the stage (cleared, reset, respawned).
    pub affected: usize,
    pub timestamp: Timestamp,
}

impl RestartStage {
    pub fn new(affected: usize) -> Self {
        Self {
            affected,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResetRequested {
    /// The reset was asked for by the UI (menu button) rather than gameplay.
    pub for_ui: bool,
    /// The reset precedes loading a save slot.
    pub from_save: bool,
    pub timestamp: Timestamp,
}

impl ResetRequested {
    pub fn new(for_ui: bool, from_save: bool) -> Self {
        Self {
            for_ui,
            from_save,
            timestamp: now(),
        }
    }

    /// True when the reset should end in the main menu.
    pub fn returns_to_menu(&self) -> bool {
        self.for_ui && !self.from_save
    }
}
