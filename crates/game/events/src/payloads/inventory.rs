use super::{Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemAdded {
    pub item_id: String,
    pub name: String,
    pub quantity: u32,
    pub timestamp: Timestamp,
}

impl ItemAdded {
    pub fn new(item_id: impl Into<String>, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            quantity,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemRemoved {
    pub item_id: String,
    pub quantity: u32,
    pub timestamp: Timestamp,
}

impl ItemRemoved {
    pub fn new(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ItemUsed {
    pub item_id: String,
    pub name: String,
    /// Short description of what the item did ("restored 30 HP").
    pub effect: String,
    pub timestamp: Timestamp,
}

impl ItemUsed {
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        effect: impl Into<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            effect: effect.into(),
            timestamp: now(),
        }
    }
}
