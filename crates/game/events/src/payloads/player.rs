use super::{Position, Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HealthChanged {
    pub current: i32,
    pub max: i32,
    /// Signed change from the previous value.
    pub delta: i32,
    pub timestamp: Timestamp,
}

impl HealthChanged {
    pub fn new(current: i32, max: i32, delta: i32) -> Self {
        Self {
            current,
            max,
            delta,
            timestamp: now(),
        }
    }

    /// Remaining health as a percentage of max, clamped to `0..=100`.
    pub fn percent(&self) -> u32 {
        if self.max <= 0 {
            return 0;
        }
        (self.current.clamp(0, self.max) as i64 * 100 / self.max as i64) as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GoldChanged {
    pub total: u32,
    pub delta: i64,
    pub timestamp: Timestamp,
}

impl GoldChanged {
    pub fn new(total: u32, delta: i64) -> Self {
        Self {
            total,
            delta,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayerDied {
    pub cause: String,
    pub position: Position,
    pub timestamp: Timestamp,
}

impl PlayerDied {
    pub fn new(cause: impl Into<String>, position: Position) -> Self {
        Self {
            cause: cause.into(),
            position,
            timestamp: now(),
        }
    }
}
