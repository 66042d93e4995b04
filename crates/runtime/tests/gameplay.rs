//! Gameplay module reactions against in-memory collaborators.

mod support;

use game_events::topics::{combat, environment, quest};
use game_events::{
    ChestSpawned, DamageTaken, DropKind, EnemyKilled, ItemAdded, ItemDropped, Position,
    QuestProgress,
};
use runtime::{GameplayConfig, GameplayHandlers, HandlerModule, LogColor, QuestOutcome};
use support::{World, record};

fn gameplay(world: &World, config: GameplayConfig) -> GameplayHandlers {
    let mut handlers = GameplayHandlers::new(world.bus.clone(), &world.collaborators(), config);
    handlers.initialize();
    handlers
}

fn kill(world: &World, boss: bool) {
    world.bus.publish(
        combat::ENEMY_KILLED,
        EnemyKilled::new("Skeleton#2", "skeleton", Position::new(4.0, 2.0), boss),
    );
}

#[test]
fn kill_feeds_quest_and_publishes_progress() {
    let world = World::new();
    let _handlers = gameplay(&world, GameplayConfig::default());
    let progress = record::<QuestProgress>(&world.bus, quest::PROGRESS);

    world.quests.push_outcome(QuestOutcome::Advanced {
        quest_id: "bones".into(),
        current: 2,
        required: 5,
    });
    kill(&world, false);

    assert_eq!(*world.quests.kills.borrow(), ["skeleton"]);
    assert_eq!(progress.borrow().len(), 1);
    assert_eq!(progress.borrow()[0].current, 2);
    assert!(world.log.contains("Skeleton#2 is defeated"));
    assert!(world.log.contains("Quest bones: 2/5"));
}

#[test]
fn untracked_kill_publishes_no_progress() {
    let world = World::new();
    let _handlers = gameplay(&world, GameplayConfig::default());
    let progress = record::<QuestProgress>(&world.bus, quest::PROGRESS);

    kill(&world, false);
    assert!(progress.borrow().is_empty());
}

#[test]
fn successful_rolls_spawn_gold_and_potion() {
    let world = World::new();
    let _handlers = gameplay(&world, GameplayConfig::default());
    let drops = record::<ItemDropped>(&world.bus, environment::ITEM_DROPPED);

    kill(&world, false);

    assert_eq!(world.content.kinds(), [DropKind::Gold, DropKind::Potion]);
    // FixedRandom picks the midpoint of 5..=20.
    assert_eq!(world.content.spawned.borrow()[0].1, 12);
    assert_eq!(drops.borrow().len(), 2);
    assert!(world.log.contains("12 gold dropped at (4.0, 2.0)"));
    assert!(world.log.contains("A potion dropped"));
}

#[test]
fn failed_rolls_spawn_nothing_for_regular_enemies() {
    let world = World::new();
    world.random.roll.set(0.99);
    let _handlers = gameplay(&world, GameplayConfig::default());

    kill(&world, false);
    assert!(world.content.kinds().is_empty());
}

#[test]
fn bosses_always_leave_a_chest() {
    let world = World::new();
    world.random.roll.set(0.99);
    let _handlers = gameplay(&world, GameplayConfig::default());
    let chests = record::<ChestSpawned>(&world.bus, environment::CHEST_SPAWNED);

    kill(&world, true);

    assert_eq!(world.content.kinds(), [DropKind::Chest]);
    assert_eq!(chests.borrow().len(), 1);
    assert!(world.log.contains("A treasure chest appears"));
}

#[test]
fn spawn_failure_is_counted_and_other_drops_still_happen() {
    let world = World::new();
    world.content.break_prefab(DropKind::Gold);
    let _handlers = gameplay(&world, GameplayConfig::default());

    kill(&world, true);

    assert_eq!(world.content.kinds(), [DropKind::Potion, DropKind::Chest]);
    assert_eq!(world.bus.statistics().failures(combat::ENEMY_KILLED), 1);
}

#[test]
fn low_health_warning_respects_threshold() {
    let world = World::new();
    let config = GameplayConfig {
        low_health_threshold: 30,
        ..GameplayConfig::default()
    };
    let _handlers = gameplay(&world, config);

    world.bus.publish(
        combat::DAMAGE_TAKEN,
        DamageTaken::new("Hero", true, 10, 45),
    );
    assert!(!world.log.contains("health is low"));

    world.bus.publish(
        combat::DAMAGE_TAKEN,
        DamageTaken::new("Hero", true, 20, 25),
    );
    assert_eq!(world.log.color_of("health is low"), Some(LogColor::Red));

    // Monsters never trigger the warning.
    let before = world.log.lines().len();
    world.bus.publish(
        combat::DAMAGE_TAKEN,
        DamageTaken::new("Goblin", false, 20, 3),
    );
    assert_eq!(world.log.lines().len(), before + 1);
}

#[test]
fn picked_up_items_count_towards_collection_quests() {
    let world = World::new();
    let _handlers = gameplay(&world, GameplayConfig::default());

    world.bus.publish(
        game_events::topics::inventory::ITEM_ADDED,
        ItemAdded::new("herb", "Moonleaf", 3),
    );

    assert_eq!(*world.quests.collected.borrow(), [("herb".to_owned(), 3)]);
    assert!(world.log.contains("Picked up Moonleaf x3"));
}

#[test]
fn dispose_is_idempotent_and_silences_the_module() {
    let world = World::new();
    let mut handlers = gameplay(&world, GameplayConfig::default());
    assert!(handlers.is_active());

    handlers.dispose();
    handlers.dispose();
    assert!(!handlers.is_active());
    assert!(world.bus.is_empty());

    kill(&world, true);
    assert!(world.log.lines().is_empty());
    assert!(world.content.kinds().is_empty());
}
