use super::{Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuestStarted {
    pub quest_id: String,
    pub title: String,
    pub timestamp: Timestamp,
}

impl QuestStarted {
    pub fn new(quest_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            quest_id: quest_id.into(),
            title: title.into(),
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuestProgress {
    pub quest_id: String,
    pub current: u32,
    pub required: u32,
    pub timestamp: Timestamp,
}

impl QuestProgress {
    pub fn new(quest_id: impl Into<String>, current: u32, required: u32) -> Self {
        Self {
            quest_id: quest_id.into(),
            current,
            required,
            timestamp: now(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.current >= self.required
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QuestCompleted {
    pub quest_id: String,
    pub title: String,
    pub reward_gold: u32,
    pub timestamp: Timestamp,
}

impl QuestCompleted {
    pub fn new(quest_id: impl Into<String>, title: impl Into<String>, reward_gold: u32) -> Self {
        Self {
            quest_id: quest_id.into(),
            title: title.into(),
            reward_gold,
            timestamp: now(),
        }
    }
}
