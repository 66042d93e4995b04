use super::{Timestamp, now};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialogueStarted {
    pub dialogue_id: String,
    pub speaker: String,
    pub timestamp: Timestamp,
}

impl DialogueStarted {
    pub fn new(dialogue_id: impl Into<String>, speaker: impl Into<String>) -> Self {
        Self {
            dialogue_id: dialogue_id.into(),
            speaker: speaker.into(),
            timestamp: now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DialogueChoice {
    pub dialogue_id: String,
    pub choice_index: usize,
    pub text: String,
    pub timestamp: Timestamp,
}

impl DialogueChoice {
    pub fn new(dialogue_id: impl Into<String>, choice_index: usize, text: impl Into<String>) -> Self {
        Self {
            dialogue_id: dialogue_id.into(),
            choice_index,
            text: text.into(),
            timestamp: now(),
        }
    }
}
