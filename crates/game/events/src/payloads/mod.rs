//! Canonical payload types, one per topic.
//!
//! Structured payloads are immutable records: every field is set by `new`,
//! including `timestamp`, the moment the payload was created.

mod combat;
mod dialogue;
mod game;
mod inventory;
mod player;
mod quest;
mod ui;
mod world;

pub use combat::{AttackExecuted, DamageTaken, EnemyKilled};
pub use dialogue::{DialogueChoice, DialogueStarted};
pub use game::{GameOver, GameStateChanged, ResetRequested, RestartRequested, RestartStage};
pub use inventory::{ItemAdded, ItemRemoved, ItemUsed};
pub use player::{GoldChanged, HealthChanged, PlayerDied};
pub use quest::{QuestCompleted, QuestProgress, QuestStarted};
pub use ui::{Resolution, ResolutionChanged, SettingsApplied};
pub use world::{
    ChestOpened, ChestSpawned, DropKind, ItemDropped, LevelCompleted, LevelLoaded,
    LevelTransition, NpcInteracted, VolumeChanged,
};

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Creation time carried by every structured payload.
pub type Timestamp = DateTime<Utc>;

pub(crate) fn now() -> Timestamp {
    Utc::now()
}

/// World-space position in tiles.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}
