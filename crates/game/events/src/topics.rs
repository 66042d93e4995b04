//! Topic catalog.
//!
//! Every topic is a namespaced string constant. The doc comment on each
//! constant names its canonical payload type; subscribers must register for
//! exactly that type or the bus will skip them. Renaming a topic breaks every
//! producer and consumer of it.

use strum::{AsRefStr, Display, EnumIter, IntoEnumIterator};

/// Domain prefix of a topic (`combat` in `combat.enemy_killed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Domain {
    Player,
    Combat,
    Inventory,
    Quest,
    Dialogue,
    Ui,
    Game,
    Restart,
    Reset,
    Level,
    Environment,
    Audio,
    Npc,
    System,
}

impl Domain {
    /// Resolves the domain of a catalog topic.
    pub fn of(topic: &str) -> Option<Self> {
        let (prefix, rest) = topic.split_once('.')?;
        if rest.is_empty() {
            return None;
        }
        Self::iter().find(|domain| domain.as_ref() == prefix)
    }
}

pub mod player {
    /// [`HealthChanged`](crate::payloads::HealthChanged)
    pub const HEALTH_CHANGED: &str = "player.health_changed";
    /// [`GoldChanged`](crate::payloads::GoldChanged)
    pub const GOLD_CHANGED: &str = "player.gold_changed";
    /// [`PlayerDied`](crate::payloads::PlayerDied)
    pub const DIED: &str = "player.died";
}

pub mod combat {
    /// [`AttackExecuted`](crate::payloads::AttackExecuted)
    pub const ATTACK_EXECUTED: &str = "combat.attack_executed";
    /// [`DamageTaken`](crate::payloads::DamageTaken)
    pub const DAMAGE_TAKEN: &str = "combat.damage_taken";
    /// [`EnemyKilled`](crate::payloads::EnemyKilled)
    pub const ENEMY_KILLED: &str = "combat.enemy_killed";
}

pub mod inventory {
    /// [`ItemAdded`](crate::payloads::ItemAdded)
    pub const ITEM_ADDED: &str = "inventory.item_added";
    /// [`ItemRemoved`](crate::payloads::ItemRemoved)
    pub const ITEM_REMOVED: &str = "inventory.item_removed";
    /// [`ItemUsed`](crate::payloads::ItemUsed)
    pub const ITEM_USED: &str = "inventory.item_used";
    /// `()`
    pub const TOGGLE: &str = "inventory.toggle";
}

pub mod quest {
    /// [`QuestStarted`](crate::payloads::QuestStarted)
    pub const STARTED: &str = "quest.started";
    /// [`QuestProgress`](crate::payloads::QuestProgress)
    pub const PROGRESS: &str = "quest.progress";
    /// [`QuestCompleted`](crate::payloads::QuestCompleted)
    pub const COMPLETED: &str = "quest.completed";
}

pub mod dialogue {
    /// [`DialogueStarted`](crate::payloads::DialogueStarted)
    pub const STARTED: &str = "dialogue.started";
    /// `()`
    pub const ENDED: &str = "dialogue.ended";
    /// [`DialogueChoice`](crate::payloads::DialogueChoice)
    pub const CHOICE_SELECTED: &str = "dialogue.choice_selected";
}

pub mod ui {
    /// [`ResolutionChanged`](crate::payloads::ResolutionChanged)
    pub const RESOLUTION_CHANGED: &str = "ui.resolution_changed";
    /// `bool`
    pub const FULLSCREEN_TOGGLED: &str = "ui.fullscreen_toggled";
    /// `()`
    pub const SETTINGS_OPENED: &str = "ui.settings_opened";
    /// `()`
    pub const SETTINGS_CLOSED: &str = "ui.settings_closed";
    /// [`SettingsApplied`](crate::payloads::SettingsApplied)
    pub const SETTINGS_APPLIED: &str = "ui.settings_applied";
    /// `()`
    pub const PAUSE_MENU_OPEN: &str = "ui.pause_menu_open";
    /// `()`
    pub const PAUSE_MENU_CLOSE: &str = "ui.pause_menu_close";
    /// `()`
    pub const PAUSE_CONFIRMATION_CLOSE: &str = "ui.pause_confirmation_close";
    /// `()`
    pub const SAVE_SLOT_MENU_CLOSE: &str = "ui.save_slot_menu_close";
    /// `()`
    pub const TRANSITION_PANEL_HIDDEN: &str = "ui.transition_panel_hidden";
    /// `()`
    pub const CANCEL_PRESSED: &str = "ui.cancel_pressed";
}

pub mod game {
    /// [`GameStateChanged`](crate::payloads::GameStateChanged)
    pub const STARTED: &str = "game.started";
    /// [`GameStateChanged`](crate::payloads::GameStateChanged)
    pub const PAUSED: &str = "game.paused";
    /// [`GameStateChanged`](crate::payloads::GameStateChanged)
    pub const RESUMED: &str = "game.resumed";
    /// [`GameStateChanged`](crate::payloads::GameStateChanged)
    pub const STOPPED: &str = "game.stopped";
    /// [`GameOver`](crate::payloads::GameOver)
    pub const OVER: &str = "game.over";
    /// [`RestartRequested`](crate::payloads::RestartRequested)
    pub const RESTART_REQUESTED: &str = "game.restart_requested";
}

pub mod restart {
    /// [`RestartStage`](crate::payloads::RestartStage)
    pub const STARTED: &str = "restart.started";
    /// [`RestartStage`](crate::payloads::RestartStage)
    pub const ENTITIES_CLEARED: &str = "restart.entities_cleared";
    /// [`RestartStage`](crate::payloads::RestartStage)
    pub const PLAYER_RESET: &str = "restart.player_reset";
    /// [`RestartStage`](crate::payloads::RestartStage)
    pub const ENEMIES_RESET: &str = "restart.enemies_reset";
    /// [`RestartStage`](crate::payloads::RestartStage)
    pub const UI_RESET: &str = "restart.ui_reset";
    /// [`RestartStage`](crate::payloads::RestartStage)
    pub const COMPLETED: &str = "restart.completed";

    /// Pipeline stages in the order the restart manager runs them.
    pub const STAGES: [&str; 6] = [
        STARTED,
        ENTITIES_CLEARED,
        PLAYER_RESET,
        ENEMIES_RESET,
        UI_RESET,
        COMPLETED,
    ];
}

pub mod reset {
    /// [`ResetRequested`](crate::payloads::ResetRequested)
    pub const REQUESTED: &str = "reset.requested";
    /// `()`
    pub const SCENE_CLEAR_REQUESTED: &str = "reset.scene_clear_requested";
}

pub mod level {
    /// [`LevelLoaded`](crate::payloads::LevelLoaded)
    pub const LOADED: &str = "level.loaded";
    /// [`LevelCompleted`](crate::payloads::LevelCompleted)
    pub const COMPLETED: &str = "level.completed";
    /// [`LevelTransition`](crate::payloads::LevelTransition)
    pub const TRANSITION_STARTED: &str = "level.transition_started";
}

pub mod environment {
    /// [`ChestOpened`](crate::payloads::ChestOpened)
    pub const CHEST_OPENED: &str = "environment.chest_opened";
    /// [`ChestSpawned`](crate::payloads::ChestSpawned)
    pub const CHEST_SPAWNED: &str = "environment.chest_spawned";
    /// [`ItemDropped`](crate::payloads::ItemDropped)
    pub const ITEM_DROPPED: &str = "environment.item_dropped";
}

pub mod audio {
    /// [`VolumeChanged`](crate::payloads::VolumeChanged)
    pub const VOLUME_CHANGED: &str = "audio.volume_changed";
    /// `String` (clip name)
    pub const PLAY_SFX: &str = "audio.play_sfx";
}

pub mod npc {
    /// [`NpcInteracted`](crate::payloads::NpcInteracted)
    pub const INTERACTED: &str = "npc.interacted";
}

pub mod system {
    /// `String`
    pub const ERROR: &str = "system.error";
}

/// Every topic in the catalog.
pub const ALL: &[&str] = &[
    player::HEALTH_CHANGED,
    player::GOLD_CHANGED,
    player::DIED,
    combat::ATTACK_EXECUTED,
    combat::DAMAGE_TAKEN,
    combat::ENEMY_KILLED,
    inventory::ITEM_ADDED,
    inventory::ITEM_REMOVED,
    inventory::ITEM_USED,
    inventory::TOGGLE,
    quest::STARTED,
    quest::PROGRESS,
    quest::COMPLETED,
    dialogue::STARTED,
    dialogue::ENDED,
    dialogue::CHOICE_SELECTED,
    ui::RESOLUTION_CHANGED,
    ui::FULLSCREEN_TOGGLED,
    ui::SETTINGS_OPENED,
    ui::SETTINGS_CLOSED,
    ui::SETTINGS_APPLIED,
    ui::PAUSE_MENU_OPEN,
    ui::PAUSE_MENU_CLOSE,
    ui::PAUSE_CONFIRMATION_CLOSE,
    ui::SAVE_SLOT_MENU_CLOSE,
    ui::TRANSITION_PANEL_HIDDEN,
    ui::CANCEL_PRESSED,
    game::STARTED,
    game::PAUSED,
    game::RESUMED,
    game::STOPPED,
    game::OVER,
    game::RESTART_REQUESTED,
    restart::STARTED,
    restart::ENTITIES_CLEARED,
    restart::PLAYER_RESET,
    restart::ENEMIES_RESET,
    restart::UI_RESET,
    restart::COMPLETED,
    reset::REQUESTED,
    reset::SCENE_CLEAR_REQUESTED,
    level::LOADED,
    level::COMPLETED,
    level::TRANSITION_STARTED,
    environment::CHEST_OPENED,
    environment::CHEST_SPAWNED,
    environment::ITEM_DROPPED,
    audio::VOLUME_CHANGED,
    audio::PLAY_SFX,
    npc::INTERACTED,
    system::ERROR,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_topics_are_unique() {
        let unique: HashSet<_> = ALL.iter().collect();
        assert_eq!(unique.len(), ALL.len());
    }

    #[test]
    fn every_topic_has_a_known_domain() {
        for topic in ALL {
            assert!(Domain::of(topic).is_some(), "{topic} has no domain");
        }
    }

    #[test]
    fn every_domain_has_a_topic() {
        for domain in Domain::iter() {
            assert!(
                ALL.iter().any(|t| Domain::of(t) == Some(domain)),
                "{domain} has no topics"
            );
        }
    }

    #[test]
    fn domain_parsing() {
        assert_eq!(Domain::of(combat::ENEMY_KILLED), Some(Domain::Combat));
        assert_eq!(Domain::of(npc::INTERACTED), Some(Domain::Npc));
        assert_eq!(Domain::of("weather.changed"), None);
        assert_eq!(Domain::of("combat."), None);
        assert_eq!(Domain::of("combat"), None);
        assert_eq!(Domain::Environment.to_string(), "environment");
    }

    #[test]
    fn restart_stages_start_and_end_the_pipeline() {
        assert_eq!(restart::STAGES.first(), Some(&restart::STARTED));
        assert_eq!(restart::STAGES.last(), Some(&restart::COMPLETED));
    }
}
