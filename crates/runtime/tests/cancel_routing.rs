//! Cancel key and menu handling through the UI module.

mod support;

use game_events::topics::{audio, game, ui};
use game_events::{GameStateChanged, Resolution, SettingsApplied, VolumeChanged};
use runtime::{EventSystem, GameplayConfig, Panels};
use support::{FakeUi, World, record};

fn system(world: &World) -> EventSystem {
    let mut system = EventSystem::new(world.bus.clone(), GameplayConfig::default());
    system.initialize(world.collaborators()).unwrap();
    system
}

#[test]
fn cancel_opens_then_closes_the_pause_menu() {
    let world = World::new();
    let system = system(&world);
    let paused = record::<GameStateChanged>(&world.bus, game::PAUSED);
    let resumed = record::<GameStateChanged>(&world.bus, game::RESUMED);

    system.publish_cancel_pressed();
    assert!(world.ui.is_visible(Panels::PAUSE));
    assert_eq!(paused.borrow().len(), 1);

    world.ui.game_paused.set(true);
    system.publish_cancel_pressed();
    assert!(!world.ui.is_visible(Panels::PAUSE));
    assert_eq!(resumed.borrow().len(), 1);
    assert_eq!(resumed.borrow()[0].reason, "pause menu closed");
}

#[test]
fn inventory_wins_over_pause_menu() {
    let world = World::new();
    world.ui.show_panels(Panels::INVENTORY | Panels::PAUSE);
    let system = system(&world);

    system.publish_cancel_pressed();

    assert!(!world.ui.is_visible(Panels::INVENTORY));
    assert!(world.ui.is_visible(Panels::PAUSE));
}

#[test]
fn dialogue_swallows_the_key() {
    let world = World::new();
    world.ui.dialogue_active.set(true);
    world.ui.show_panels(Panels::INVENTORY);
    let system = system(&world);

    system.publish_cancel_pressed();

    assert!(world.ui.is_visible(Panels::INVENTORY));
    assert_eq!(world.bus.publish_count(ui::PAUSE_MENU_OPEN), 0);
}

#[test]
fn level_transition_is_dismissed_and_game_resumes() {
    let world = World::new();
    world.ui.show_panels(Panels::LEVEL_TRANSITION);
    let system = system(&world);
    let resumed = record::<GameStateChanged>(&world.bus, game::RESUMED);

    system.publish_cancel_pressed();

    assert!(!world.ui.is_visible(Panels::LEVEL_TRANSITION));
    assert_eq!(resumed.borrow()[0].reason, "level transition dismissed");
    assert_eq!(world.bus.publish_count(ui::TRANSITION_PANEL_HIDDEN), 1);
}

#[test]
fn save_slot_menu_closes_through_the_bus() {
    let world = World::new();
    world.ui.show_panels(Panels::SAVE_SLOT | Panels::PAUSE_CONFIRMATION);
    let system = system(&world);

    system.publish_cancel_pressed();
    assert!(!world.ui.is_visible(Panels::PAUSE_CONFIRMATION));
    assert!(world.ui.is_visible(Panels::SAVE_SLOT));

    system.publish_cancel_pressed();
    assert!(!world.ui.is_visible(Panels::SAVE_SLOT));
    assert_eq!(world.bus.publish_count(ui::SAVE_SLOT_MENU_CLOSE), 1);
}

#[test]
fn main_menu_toggles_exit_confirmation() {
    let world = World {
        ui: std::rc::Rc::new(FakeUi::default()),
        ..World::new()
    };
    let system = system(&world);

    system.publish_cancel_pressed();
    assert!(world.ui.is_visible(Panels::EXIT_CONFIRMATION));

    system.publish_cancel_pressed();
    assert!(!world.ui.is_visible(Panels::EXIT_CONFIRMATION));
}

#[test]
fn applied_settings_reach_display_and_audio() {
    let world = World::new();
    let system = system(&world);
    let volume = record::<VolumeChanged>(&world.bus, audio::VOLUME_CHANGED);

    system.publish_settings_opened();
    assert!(world.ui.is_visible(Panels::SETTINGS));

    system.publish_settings_applied(SettingsApplied::new(
        Resolution::new(1920, 1080),
        true,
        0.8,
        0.5,
        1.0,
    ));
    system.publish_settings_closed();

    assert_eq!(world.ui.resolution.get(), Some(Resolution::new(1920, 1080)));
    assert_eq!(world.ui.fullscreen.get(), Some(true));
    assert_eq!(volume.borrow().len(), 1);
    assert!(!world.ui.is_visible(Panels::SETTINGS));
}

#[test]
fn bare_fullscreen_flag_is_applied() {
    let world = World::new();
    let system = system(&world);

    system.publish_fullscreen_toggled(false);
    assert_eq!(world.ui.fullscreen.get(), Some(false));
}
