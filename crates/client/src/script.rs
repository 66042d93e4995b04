//! Scripted beats played by the headless client, one per frame.

use game_events::{Position, Resolution, SettingsApplied};
use runtime::{EventSystem, Panels, UiManager};
use strum::{Display, EnumIter};

use crate::world::{Floor, Objective, Player, QuestBook, RestartPipeline, Screen};

/// Borrowed view of the client world that a beat acts on.
pub struct Stage<'a> {
    pub system: &'a EventSystem,
    pub player: &'a Player,
    pub quests: &'a QuestBook,
    pub floor: &'a Floor,
    pub restart: &'a RestartPipeline,
    pub screen: &'a Screen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Beat {
    EnterDungeon,
    Skirmish,
    Ambush,
    PauseAndResume,
    Gathering,
    BossFight,
    Conversation,
    Settings,
    Checkpoint,
    Restart,
    NextLevel,
    ReturnToMenu,
}

impl Beat {
    pub fn play(self, stage: &Stage<'_>) {
        let system = stage.system;
        match self {
            Beat::EnterDungeon => {
                stage.screen.enter_game();
                system.publish_game_started("new game");
                system.publish_level_loaded(1, "Sunken Crypt");
                stage.quests.accept(
                    "q-bones",
                    "Rattling Bones",
                    Objective::Slay {
                        kind: "skeleton".into(),
                    },
                    2,
                    40,
                );
                system.publish_quest_started("q-bones", "Rattling Bones");
            }
            Beat::Skirmish => {
                stage.player.attack(Some("Skeleton#1"), 14, false);
                system.publish_damage_taken("Skeleton#1", false, 14, 0);
                // Deaths are resolved at the end of the frame.
                system.queue_event(
                    game_events::topics::combat::ENEMY_KILLED,
                    game_events::EnemyKilled::new(
                        "Skeleton#1",
                        "skeleton",
                        Position::new(3.0, 4.0),
                        false,
                    ),
                );
            }
            Beat::Ambush => {
                stage.player.take_damage(80);
                system.publish_damage_taken(&stage.player.name, true, 80, stage.player.hp());
                stage.player.attack(None, 0, false);
                stage.player.attack(Some("Skeleton#2"), 31, true);
                system.publish_enemy_killed("Skeleton#2", "skeleton", Position::new(5.0, 4.0), false);
            }
            Beat::PauseAndResume => {
                system.publish_cancel_pressed();
                system.publish_cancel_pressed();
            }
            Beat::Gathering => {
                stage.quests.accept(
                    "q-herbs",
                    "Herbalist",
                    Objective::Gather {
                        item_id: "moonleaf".into(),
                    },
                    3,
                    0,
                );
                system.publish_quest_started("q-herbs", "Herbalist");
                system.publish_item_added("moonleaf", "Moonleaf", 3);
                system.publish_item_used("potion", "Healing Potion", "restored 30 HP");
                stage.player.heal(30);
                system.publish_item_removed("potion", 1);
                system.publish_inventory_toggle();
                system.publish_cancel_pressed();
            }
            Beat::BossFight => {
                stage.player.attack(Some("Crypt Lord"), 55, true);
                system.publish_enemy_killed("Crypt Lord", "crypt_lord", Position::new(6.0, 6.0), true);
                // Loot that would land in a wall.
                system.publish_enemy_killed("Bat#4", "bat", Position::new(-2.0, 1.0), false);
                system.publish_chest_opened(
                    "crypt-chest",
                    Position::new(6.0, 6.0),
                    vec!["Bone Key".into(), "Silver Ring".into()],
                );
                stage.player.add_gold(120);
            }
            Beat::Conversation => {
                system.publish_npc_interacted("Old Warden");
                stage.screen.set_dialogue_active(true);
                system.publish_dialogue_started("warden-1", "Old Warden");
                system.publish_cancel_pressed();
                system.publish_dialogue_choice("warden-1", 1, "Tell me about the crypt.");
                stage.screen.set_dialogue_active(false);
                system.publish_dialogue_ended();
            }
            Beat::Settings => {
                system.publish_settings_opened();
                system.publish_settings_applied(SettingsApplied::new(
                    Resolution::new(1920, 1080),
                    true,
                    0.8,
                    0.6,
                    0.9,
                ));
                system.publish_fullscreen_toggled(false);
                system.publish_settings_closed();
                system.publish_play_sfx("menu_close");
            }
            Beat::Checkpoint => {
                stage.restart.record_checkpoint();
                stage.player.take_damage(500);
                system.publish_player_died("crushed by a falling pillar", Position::new(7.0, 2.0));
                system.publish_game_over(false, stage.player.gold());
            }
            Beat::Restart => {
                system.publish_restart_requested(true);
                // Second request while the pipeline is still queued.
                system.publish_restart_requested(false);
            }
            Beat::NextLevel => {
                system.publish_level_completed(1, "Sunken Crypt", 754.0);
                system.publish_level_transition(1, 2);
                stage.screen.show(Panels::LEVEL_TRANSITION);
                system.publish_cancel_pressed();
                system.publish_level_loaded(2, "Flooded Halls");
            }
            Beat::ReturnToMenu => {
                system.publish_pause_menu_open();
                system.publish_reset_requested(true, false);
                system.publish_cancel_pressed();
                system.publish_cancel_pressed();
                system.publish_game_over(true, stage.player.gold());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn script_starts_in_the_dungeon_and_ends_in_the_menu() {
        let beats: Vec<_> = Beat::iter().collect();
        assert_eq!(beats.first(), Some(&Beat::EnterDungeon));
        assert_eq!(beats.last(), Some(&Beat::ReturnToMenu));
        assert_eq!(Beat::BossFight.to_string(), "boss_fight");
    }
}
