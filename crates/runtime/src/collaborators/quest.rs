/// Result of feeding a gameplay fact to the quest manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestOutcome {
    /// No active quest tracks this fact.
    Untracked,
    /// An objective moved forward but is not done yet.
    Advanced {
        quest_id: String,
        current: u32,
        required: u32,
    },
    /// The fact finished the quest's last objective.
    Completed { quest_id: String },
}

/// Quest bookkeeping owned by the quest system.
pub trait QuestManager {
    /// Records a kill of an enemy of template `enemy_kind`.
    fn record_kill(&self, enemy_kind: &str) -> QuestOutcome;

    /// Records `quantity` of `item_id` entering the inventory.
    fn record_collect(&self, item_id: &str, quantity: u32) -> QuestOutcome;
}
