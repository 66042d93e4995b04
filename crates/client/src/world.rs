//! In-memory game world backing the headless client.
//!
//! These are the collaborators the handler modules talk to. They keep just
//! enough state to make a scripted session behave like the real thing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use event_bus::{EventBus, SubscriptionId};
use game_events::topics::restart;
use game_events::{DropKind, Position, Resolution, RestartRequested, RestartStage};
use runtime::{
    AttackReport, CancelContext, CompletedQuest, ContentLoader, GoldChange, HealthChange,
    Panels, PlayerSignals, QuestManager, QuestOutcome, QuestSignals, RestartError,
    RestartManager, SpawnError, UiManager,
};
use tracing::debug;

/// The player object. Raises native signals; knows nothing about the bus.
#[derive(Debug)]
pub struct Player {
    pub name: String,
    hp: Cell<i32>,
    max_hp: i32,
    gold: Cell<u32>,
    signals: Rc<PlayerSignals>,
}

impl Player {
    pub fn new(name: impl Into<String>, max_hp: i32) -> Self {
        Self {
            name: name.into(),
            hp: Cell::new(max_hp),
            max_hp,
            gold: Cell::new(0),
            signals: Rc::new(PlayerSignals::default()),
        }
    }

    pub fn signals(&self) -> &Rc<PlayerSignals> {
        &self.signals
    }

    pub fn hp(&self) -> i32 {
        self.hp.get()
    }

    pub fn gold(&self) -> u32 {
        self.gold.get()
    }

    pub fn take_damage(&self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.set_hp(self.hp.get().saturating_sub(amount).max(0));
    }

    pub fn heal(&self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.set_hp(self.hp.get().saturating_add(amount).min(self.max_hp));
    }

    pub fn add_gold(&self, amount: u32) {
        let previous = self.gold.get();
        let current = previous.saturating_add(amount);
        self.gold.set(current);
        self.signals
            .gold_changed
            .emit(&GoldChange { previous, current });
    }

    pub fn attack(&self, target: Option<&str>, damage: u32, critical: bool) {
        self.signals.attack_performed.emit(&AttackReport {
            attacker: self.name.clone(),
            target: target.map(str::to_owned),
            damage,
            critical,
        });
    }

    /// Restores full health, as a restart does.
    pub fn respawn(&self) {
        self.set_hp(self.max_hp);
    }

    fn set_hp(&self, current: i32) {
        let previous = self.hp.replace(current);
        if previous != current {
            self.signals.health_changed.emit(&HealthChange {
                previous,
                current,
                max: self.max_hp,
            });
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Objective {
    Slay { kind: String },
    Gather { item_id: String },
}

#[derive(Debug, Clone)]
struct Quest {
    id: String,
    title: String,
    objective: Objective,
    current: u32,
    required: u32,
    reward_gold: u32,
    done: bool,
}

/// Quest log. Finished quests are announced through [`QuestSignals`].
#[derive(Debug, Default)]
pub struct QuestBook {
    quests: RefCell<Vec<Quest>>,
    signals: Rc<QuestSignals>,
}

impl QuestBook {
    pub fn signals(&self) -> &Rc<QuestSignals> {
        &self.signals
    }

    pub fn accept(
        &self,
        id: &str,
        title: &str,
        objective: Objective,
        required: u32,
        reward_gold: u32,
    ) {
        self.quests.borrow_mut().push(Quest {
            id: id.to_owned(),
            title: title.to_owned(),
            objective,
            current: 0,
            required: required.max(1),
            reward_gold,
            done: false,
        });
    }

    pub fn is_done(&self, id: &str) -> bool {
        self.quests
            .borrow()
            .iter()
            .any(|quest| quest.id == id && quest.done)
    }

    fn advance(&self, matches: impl Fn(&Objective) -> bool, amount: u32) -> QuestOutcome {
        let finished = {
            let mut quests = self.quests.borrow_mut();
            let Some(quest) = quests
                .iter_mut()
                .find(|quest| !quest.done && matches(&quest.objective))
            else {
                return QuestOutcome::Untracked;
            };

            quest.current = quest.current.saturating_add(amount).min(quest.required);
            if quest.current < quest.required {
                return QuestOutcome::Advanced {
                    quest_id: quest.id.clone(),
                    current: quest.current,
                    required: quest.required,
                };
            }
            quest.done = true;
            CompletedQuest {
                quest_id: quest.id.clone(),
                title: quest.title.clone(),
                reward_gold: quest.reward_gold,
            }
        };

        // Listeners may call back into the book.
        self.signals.quest_completed.emit(&finished);
        QuestOutcome::Completed {
            quest_id: finished.quest_id,
        }
    }
}

impl QuestManager for QuestBook {
    fn record_kill(&self, enemy_kind: &str) -> QuestOutcome {
        self.advance(
            |objective| matches!(objective, Objective::Slay { kind } if kind == enemy_kind),
            1,
        )
    }

    fn record_collect(&self, item_id: &str, quantity: u32) -> QuestOutcome {
        self.advance(
            |objective| matches!(objective, Objective::Gather { item_id: id } if id == item_id),
            quantity,
        )
    }
}

/// Dungeon floor that loot lands on. Spawns outside the bounds are blocked.
#[derive(Debug)]
pub struct Floor {
    width: f32,
    height: f32,
    loot: RefCell<Vec<(DropKind, u32, Position)>>,
}

impl Floor {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            loot: RefCell::new(Vec::new()),
        }
    }

    pub fn loot(&self) -> Vec<(DropKind, u32, Position)> {
        self.loot.borrow().clone()
    }

    pub fn clear(&self) -> usize {
        self.loot.take().len()
    }

    fn in_bounds(&self, position: Position) -> bool {
        (0.0..self.width).contains(&position.x) && (0.0..self.height).contains(&position.y)
    }
}

impl ContentLoader for Floor {
    fn spawn(&self, kind: DropKind, amount: u32, position: Position) -> Result<(), SpawnError> {
        if !self.in_bounds(position) {
            return Err(SpawnError::Blocked { position });
        }
        self.loot.borrow_mut().push((kind, amount, position));
        Ok(())
    }
}

/// Restart pipeline. Queues the stage topics after `restart.started`, which
/// the game-state module publishes once the request is accepted.
#[derive(Debug)]
pub struct RestartPipeline {
    bus: EventBus,
    floor: Rc<Floor>,
    player: Rc<Player>,
    in_progress: Rc<Cell<bool>>,
    checkpoint: Cell<bool>,
    completion: Option<SubscriptionId>,
}

impl RestartPipeline {
    pub fn new(bus: EventBus, floor: Rc<Floor>, player: Rc<Player>) -> Self {
        let in_progress = Rc::new(Cell::new(false));
        let completion = {
            let in_progress = Rc::clone(&in_progress);
            bus.subscribe(restart::COMPLETED, move |_: &RestartStage| {
                in_progress.set(false);
                Ok(())
            })
        };
        Self {
            bus,
            floor,
            player,
            in_progress,
            checkpoint: Cell::new(false),
            completion,
        }
    }

    pub fn record_checkpoint(&self) {
        self.checkpoint.set(true);
    }

    pub fn in_progress(&self) -> bool {
        self.in_progress.get()
    }
}

impl Drop for RestartPipeline {
    fn drop(&mut self) {
        if let Some(id) = self.completion.take() {
            self.bus.unsubscribe(restart::COMPLETED, id);
        }
    }
}

impl RestartManager for RestartPipeline {
    fn restart(&self, request: &RestartRequested) -> Result<(), RestartError> {
        if self.in_progress.get() {
            return Err(RestartError::AlreadyRestarting);
        }
        if request.from_checkpoint && !self.checkpoint.get() {
            return Err(RestartError::NoCheckpoint);
        }
        self.in_progress.set(true);

        let cleared = self.floor.clear();
        self.player.respawn();

        let stages = [
            (restart::ENTITIES_CLEARED, cleared),
            (restart::PLAYER_RESET, 1),
            (restart::ENEMIES_RESET, 0),
            (restart::UI_RESET, 0),
            (restart::COMPLETED, 0),
        ];
        for (stage, affected) in stages {
            self.bus.queue_event(stage, RestartStage::new(affected));
        }
        debug!(from_checkpoint = request.from_checkpoint, "restart queued");
        Ok(())
    }
}

/// Panel state of the headless screen.
#[derive(Debug, Default)]
pub struct Screen {
    panels: Cell<Panels>,
    dialogue_active: Cell<bool>,
    game_started: Cell<bool>,
    resolution: Cell<Option<Resolution>>,
    fullscreen: Cell<bool>,
}

impl Screen {
    pub fn main_menu() -> Self {
        let screen = Self::default();
        screen.panels.set(Panels::MAIN_MENU);
        screen
    }

    /// Leaves the main menu for the HUD.
    pub fn enter_game(&self) {
        self.game_started.set(true);
        self.panels.set(Panels::HUD);
    }

    pub fn set_dialogue_active(&self, active: bool) {
        self.dialogue_active.set(active);
    }

    pub fn resolution(&self) -> Option<Resolution> {
        self.resolution.get()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.get()
    }
}

impl UiManager for Screen {
    fn show(&self, panels: Panels) {
        if panels.contains(Panels::MAIN_MENU) {
            self.game_started.set(false);
        }
        self.panels.set(self.panels.get() | panels);
        debug!(?panels, "panels shown");
    }

    fn hide(&self, panels: Panels) {
        self.panels.set(self.panels.get() - panels);
        debug!(?panels, "panels hidden");
    }

    fn visible(&self) -> Panels {
        self.panels.get()
    }

    fn cancel_context(&self) -> CancelContext {
        let panels = self.panels.get();
        CancelContext::from_panels(
            panels,
            self.dialogue_active.get(),
            self.game_started.get(),
            panels.intersects(Panels::PAUSE | Panels::LEVEL_TRANSITION),
        )
    }

    fn apply_resolution(&self, resolution: Resolution) {
        self.resolution.set(Some(resolution));
    }

    fn set_fullscreen(&self, enabled: bool) {
        self.fullscreen.set(enabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_signals_report_changes_only() {
        let player = Player::new("Hero", 100);
        let changes = Rc::new(Cell::new(0));
        let sink = Rc::clone(&changes);
        player
            .signals()
            .health_changed
            .connect(move |_| sink.set(sink.get() + 1));

        player.heal(10);
        player.take_damage(30);
        player.take_damage(500);

        assert_eq!(changes.get(), 2);
        assert_eq!(player.hp(), 0);
    }

    #[test]
    fn quest_book_tracks_matching_objectives() {
        let book = QuestBook::default();
        book.accept(
            "rats",
            "Rat Problem",
            Objective::Slay { kind: "rat".into() },
            2,
            10,
        );

        assert_eq!(book.record_kill("goblin"), QuestOutcome::Untracked);
        assert_eq!(
            book.record_kill("rat"),
            QuestOutcome::Advanced {
                quest_id: "rats".into(),
                current: 1,
                required: 2
            }
        );
        assert_eq!(
            book.record_kill("rat"),
            QuestOutcome::Completed {
                quest_id: "rats".into()
            }
        );
        assert!(book.is_done("rats"));
        assert_eq!(book.record_kill("rat"), QuestOutcome::Untracked);
    }

    #[test]
    fn quest_progress_saturates_at_the_requirement() {
        let book = QuestBook::default();
        book.accept(
            "herbs",
            "Herbalist",
            Objective::Gather {
                item_id: "moonleaf".into(),
            },
            3,
            0,
        );
        book.record_collect("moonleaf", 1);

        assert_eq!(
            book.record_collect("moonleaf", u32::MAX),
            QuestOutcome::Completed {
                quest_id: "herbs".into()
            }
        );
    }

    #[test]
    fn floor_blocks_out_of_bounds_spawns() {
        let floor = Floor::new(10.0, 10.0);
        assert!(floor.spawn(DropKind::Gold, 5, Position::new(1.0, 1.0)).is_ok());
        assert_eq!(
            floor.spawn(DropKind::Potion, 1, Position::new(-1.0, 3.0)),
            Err(SpawnError::Blocked {
                position: Position::new(-1.0, 3.0)
            })
        );
        assert_eq!(floor.clear(), 1);
        assert!(floor.loot().is_empty());
    }

    #[test]
    fn restart_pipeline_rejects_overlapping_restarts() {
        let bus = EventBus::new();
        let pipeline = RestartPipeline::new(
            bus.clone(),
            Rc::new(Floor::new(5.0, 5.0)),
            Rc::new(Player::new("Hero", 50)),
        );

        assert_eq!(
            pipeline.restart(&RestartRequested::new(true)),
            Err(RestartError::NoCheckpoint)
        );
        pipeline.restart(&RestartRequested::new(false)).unwrap();
        assert_eq!(
            pipeline.restart(&RestartRequested::new(false)),
            Err(RestartError::AlreadyRestarting)
        );

        assert_eq!(bus.process_queued_events(), 5);
        assert!(!pipeline.in_progress());
        bus.dispose();
    }

    #[test]
    fn dropping_the_pipeline_releases_its_subscription() {
        let bus = EventBus::new();
        let pipeline = RestartPipeline::new(
            bus.clone(),
            Rc::new(Floor::new(5.0, 5.0)),
            Rc::new(Player::new("Hero", 50)),
        );
        assert_eq!(bus.subscriber_count(restart::COMPLETED), 1);

        drop(pipeline);
        assert_eq!(bus.subscriber_count(restart::COMPLETED), 0);
    }

    #[test]
    fn screen_derives_pause_from_panels() {
        let screen = Screen::main_menu();
        assert!(!screen.cancel_context().game_started);

        screen.enter_game();
        screen.show(Panels::PAUSE);
        let ctx = screen.cancel_context();
        assert!(ctx.game_started && ctx.game_paused && ctx.pause_visible);

        screen.show(Panels::MAIN_MENU);
        assert!(!screen.cancel_context().game_started);
    }
}
