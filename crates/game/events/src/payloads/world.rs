//! Level, environment, audio and NPC payloads.

use strum::{AsRefStr, Display, EnumIter};

use super::{Position, Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelLoaded {
    pub index: u32,
    pub name: String,
    pub timestamp: Timestamp,
}

impl LevelLoaded {
    pub fn new(index: u32, name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelCompleted {
    pub index: u32,
    pub name: String,
    pub elapsed_secs: f32,
    pub timestamp: Timestamp,
}

impl LevelCompleted {
    pub fn new(index: u32, name: impl Into<String>, elapsed_secs: f32) -> Self {
        Self {
            index,
            name: name.into(),
            elapsed_secs,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LevelTransition {
    pub from: u32,
    pub to: u32,
    pub timestamp: Timestamp,
}

impl LevelTransition {
    pub fn new(from: u32, to: u32) -> Self {
        Self {
            from,
            to,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChestOpened {
    pub chest_id: String,
    pub position: Position,
    pub contents: Vec<String>,
    pub timestamp: Timestamp,
}

impl ChestOpened {
    pub fn new(chest_id: impl Into<String>, position: Position, contents: Vec<String>) -> Self {
        Self {
            chest_id: chest_id.into(),
            position,
            contents,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChestSpawned {
    pub position: Position,
    pub timestamp: Timestamp,
}

impl ChestSpawned {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            timestamp: now(),
        }
    }
}

/// Kind of loot an enemy can leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum DropKind {
    Gold,
    Potion,
    Chest,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemDropped {
    pub kind: DropKind,
    /// Gold amount, or stack size for items.
    pub amount: u32,
    pub position: Position,
    pub timestamp: Timestamp,
}

impl ItemDropped {
    pub fn new(kind: DropKind, amount: u32, position: Position) -> Self {
        Self {
            kind,
            amount,
            position,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VolumeChanged {
    pub master: f32,
    pub music: f32,
    pub sfx: f32,
    pub timestamp: Timestamp,
}

impl VolumeChanged {
    pub fn new(master: f32, music: f32, sfx: f32) -> Self {
        Self {
            master,
            music,
            sfx,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NpcInteracted {
    pub npc: String,
    pub timestamp: Timestamp,
}

impl NpcInteracted {
    pub fn new(npc: impl Into<String>) -> Self {
        Self {
            npc: npc.into(),
            timestamp: now(),
        }
    }
}
