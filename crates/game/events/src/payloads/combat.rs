use super::{Position, Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AttackExecuted {
    pub attacker: String,
    /// `None` when the swing hit nothing.
    pub target: Option<String>,
    pub damage: u32,
    pub critical: bool,
    pub timestamp: Timestamp,
}

impl AttackExecuted {
    pub fn new(
        attacker: impl Into<String>,
        target: Option<String>,
        damage: u32,
        critical: bool,
    ) -> Self {
        Self {
            attacker: attacker.into(),
            target,
            damage,
            critical,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DamageTaken {
    pub entity: String,
    pub is_player: bool,
    pub amount: u32,
    pub remaining_hp: i32,
    pub timestamp: Timestamp,
}

impl DamageTaken {
    pub fn new(entity: impl Into<String>, is_player: bool, amount: u32, remaining_hp: i32) -> Self {
        Self {
            entity: entity.into(),
            is_player,
            amount,
            remaining_hp,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnemyKilled {
    /// Display name of this enemy instance ("Skeleton#3").
    pub enemy: String,
    /// Template kind used by quest objectives ("skeleton").
    pub kind: String,
    pub position: Position,
    pub boss: bool,
    pub timestamp: Timestamp,
}

impl EnemyKilled {
    pub fn new(
        enemy: impl Into<String>,
        kind: impl Into<String>,
        position: Position,
        boss: bool,
    ) -> Self {
        Self {
            enemy: enemy.into(),
            kind: kind.into(),
            position,
            boss,
            timestamp: now(),
        }
    }
}
