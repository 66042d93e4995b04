//! Composition root of the event layer.
//!
//! [`EventSystem`] owns a handle to the bus and the four domain handler
//! modules. It is also the only place where native [`Signal`](crate::signals::Signal)
//! callbacks are turned into topic publishes, and it offers one typed
//! `publish_*` wrapper per topic so producers never build payloads by hand.

use std::cell::RefCell;
use std::rc::Rc;

use event_bus::{EventBus, Statistics};
use game_events::topics::{
    audio, combat, dialogue, environment, game, inventory, level, npc, player, quest, reset,
    restart, system, ui,
};
use game_events::{
    AttackExecuted, ChestOpened, ChestSpawned, DamageTaken, DialogueChoice, DialogueStarted,
    DropKind, EnemyKilled, GameOver, GameStateChanged, GoldChanged, HealthChanged, ItemAdded,
    ItemDropped, ItemRemoved, ItemUsed, LevelCompleted, LevelLoaded, LevelTransition,
    NpcInteracted, PlayerDied, Position, QuestCompleted, QuestProgress, QuestStarted,
    ResetRequested, Resolution, ResolutionChanged, RestartRequested, RestartStage,
    SettingsApplied, VolumeChanged,
};
use tracing::{debug, info, warn};

use crate::collaborators::Collaborators;
use crate::config::GameplayConfig;
use crate::error::SystemError;
use crate::handlers::{
    GameStateHandlers, GameplayHandlers, HandlerModule, ResetHandlers, UiHandlers,
};
use crate::signals::{AttackReport, CompletedQuest, GoldChange, HealthChange, PlayerSignals, QuestSignals};

/// Bus handle plus the orchestrator's own publish counters.
#[derive(Clone)]
struct Emitter {
    bus: EventBus,
    statistics: Rc<RefCell<Statistics>>,
}

impl Emitter {
    fn publish<P: 'static>(&self, topic: &'static str, payload: P) {
        self.statistics.borrow_mut().record_publish(topic);
        self.bus.publish(topic, payload);
    }
}

type Detach = Box<dyn FnOnce()>;

/// Owns the handler modules and bridges native callbacks onto the bus.
pub struct EventSystem {
    emitter: Option<Emitter>,
    statistics: Rc<RefCell<Statistics>>,
    config: GameplayConfig,
    modules: Vec<Box<dyn HandlerModule>>,
    detachers: Vec<Detach>,
}

impl EventSystem {
    pub fn new(bus: EventBus, config: GameplayConfig) -> Self {
        let statistics = Rc::new(RefCell::new(Statistics::new()));
        Self {
            emitter: Some(Emitter {
                bus,
                statistics: Rc::clone(&statistics),
            }),
            statistics,
            config,
            modules: Vec::new(),
            detachers: Vec::new(),
        }
    }

    /// Builds the handler modules and subscribes them in the order gameplay,
    /// UI, game-state, reset. Calling it again while initialized does nothing.
    pub fn initialize(&mut self, collaborators: Collaborators) -> Result<(), SystemError> {
        let bus = self.bus()?.clone();
        if !self.modules.is_empty() {
            debug!("event system already initialized");
            return Ok(());
        }

        self.modules = vec![
            Box::new(GameplayHandlers::new(
                bus.clone(),
                &collaborators,
                self.config.clone(),
            )),
            Box::new(UiHandlers::new(bus.clone(), Rc::clone(&collaborators.ui))),
            Box::new(GameStateHandlers::new(
                bus.clone(),
                Rc::clone(&collaborators.log),
                Rc::clone(&collaborators.restart),
            )),
            Box::new(ResetHandlers::new(bus, Rc::clone(&collaborators.ui))),
        ];
        for module in &mut self.modules {
            module.initialize();
        }

        info!(modules = self.modules.len(), "event system initialized");
        Ok(())
    }

    /// Republishes the player's native callbacks as `player.*` and
    /// `combat.attack_executed` events until the system is disposed.
    pub fn attach_player(&mut self, signals: &Rc<PlayerSignals>) -> Result<(), SystemError> {
        let emitter = self.emitter()?.clone();

        let health = {
            let emitter = emitter.clone();
            signals.health_changed.connect(move |change: &HealthChange| {
                let delta = change.current.saturating_sub(change.previous);
                emitter.publish(
                    player::HEALTH_CHANGED,
                    HealthChanged::new(change.current, change.max, delta),
                );
            })
        };
        let gold = {
            let emitter = emitter.clone();
            signals.gold_changed.connect(move |change: &GoldChange| {
                let delta = i64::from(change.current) - i64::from(change.previous);
                emitter.publish(player::GOLD_CHANGED, GoldChanged::new(change.current, delta));
            })
        };
        let attack = signals.attack_performed.connect(move |report: &AttackReport| {
            emitter.publish(
                combat::ATTACK_EXECUTED,
                AttackExecuted::new(
                    report.attacker.clone(),
                    report.target.clone(),
                    report.damage,
                    report.critical,
                ),
            );
        });

        let signals = Rc::clone(signals);
        self.detachers.push(Box::new(move || {
            signals.health_changed.disconnect(health);
            signals.gold_changed.disconnect(gold);
            signals.attack_performed.disconnect(attack);
        }));
        debug!("player signals attached");
        Ok(())
    }

    /// Republishes quest completions as `quest.completed` events until the
    /// system is disposed.
    pub fn attach_quest_log(&mut self, signals: &Rc<QuestSignals>) -> Result<(), SystemError> {
        let emitter = self.emitter()?.clone();

        let completed = signals.quest_completed.connect(move |quest: &CompletedQuest| {
            emitter.publish(
                quest::COMPLETED,
                QuestCompleted::new(quest.quest_id.clone(), quest.title.clone(), quest.reward_gold),
            );
        });

        let signals = Rc::clone(signals);
        self.detachers.push(Box::new(move || {
            signals.quest_completed.disconnect(completed);
        }));
        debug!("quest signals attached");
        Ok(())
    }

    pub fn bus(&self) -> Result<&EventBus, SystemError> {
        self.emitter().map(|emitter| &emitter.bus)
    }

    pub fn is_initialized(&self) -> bool {
        !self.modules.is_empty()
    }

    pub fn is_disposed(&self) -> bool {
        self.emitter.is_none()
    }

    /// Names of the live modules, in initialization order.
    pub fn module_names(&self) -> Vec<&'static str> {
        self.modules.iter().map(|module| module.name()).collect()
    }

    /// Publishes counted by the typed wrappers and signal bridges. The bus
    /// keeps its own, separate table.
    pub fn statistics(&self) -> Statistics {
        self.statistics.borrow().clone()
    }

    /// Defers `payload` on the bus until the next
    /// [`process_queued_events`](Self::process_queued_events).
    pub fn queue_event<P: 'static>(&self, topic: &str, payload: P) {
        match &self.emitter {
            Some(emitter) => emitter.bus.queue_event(topic, payload),
            None => warn!(topic, "queue_event after dispose"),
        }
    }

    /// Drains the bus queue. Returns zero once disposed.
    pub fn process_queued_events(&self) -> usize {
        self.emitter
            .as_ref()
            .map_or(0, |emitter| emitter.bus.process_queued_events())
    }

    /// Disconnects native signals, disposes every module and releases the bus
    /// handle. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.emitter.is_none() {
            return;
        }

        for detach in self.detachers.drain(..) {
            detach();
        }
        for module in &mut self.modules {
            module.dispose();
        }
        let released = self.modules.len();
        self.modules.clear();
        self.emitter = None;

        info!(modules = released, "event system disposed");
    }

    fn emitter(&self) -> Result<&Emitter, SystemError> {
        self.emitter.as_ref().ok_or(SystemError::Disposed)
    }

    fn emit<P: 'static>(&self, topic: &'static str, payload: P) {
        match &self.emitter {
            Some(emitter) => emitter.publish(topic, payload),
            None => warn!(topic, "publish after dispose"),
        }
    }
}

impl Drop for EventSystem {
    fn drop(&mut self) {
        self.dispose();
    }
}

// Typed publishers, grouped by domain.
impl EventSystem {
    pub fn publish_health_changed(&self, current: i32, max: i32, delta: i32) {
        self.emit(player::HEALTH_CHANGED, HealthChanged::new(current, max, delta));
    }

    pub fn publish_gold_changed(&self, total: u32, delta: i64) {
        self.emit(player::GOLD_CHANGED, GoldChanged::new(total, delta));
    }

    pub fn publish_player_died(&self, cause: &str, position: Position) {
        self.emit(player::DIED, PlayerDied::new(cause, position));
    }

    pub fn publish_attack_executed(
        &self,
        attacker: &str,
        target: Option<&str>,
        damage: u32,
        critical: bool,
    ) {
        self.emit(
            combat::ATTACK_EXECUTED,
            AttackExecuted::new(attacker, target.map(str::to_owned), damage, critical),
        );
    }

    pub fn publish_damage_taken(&self, entity: &str, is_player: bool, amount: u32, remaining_hp: i32) {
        self.emit(
            combat::DAMAGE_TAKEN,
            DamageTaken::new(entity, is_player, amount, remaining_hp),
        );
    }

    pub fn publish_enemy_killed(&self, enemy: &str, kind: &str, position: Position, boss: bool) {
        self.emit(
            combat::ENEMY_KILLED,
            EnemyKilled::new(enemy, kind, position, boss),
        );
    }

    pub fn publish_item_added(&self, item_id: &str, name: &str, quantity: u32) {
        self.emit(inventory::ITEM_ADDED, ItemAdded::new(item_id, name, quantity));
    }

    pub fn publish_item_removed(&self, item_id: &str, quantity: u32) {
        self.emit(inventory::ITEM_REMOVED, ItemRemoved::new(item_id, quantity));
    }

    pub fn publish_item_used(&self, item_id: &str, name: &str, effect: &str) {
        self.emit(inventory::ITEM_USED, ItemUsed::new(item_id, name, effect));
    }

    pub fn publish_inventory_toggle(&self) {
        self.emit(inventory::TOGGLE, ());
    }

    pub fn publish_quest_started(&self, quest_id: &str, title: &str) {
        self.emit(quest::STARTED, QuestStarted::new(quest_id, title));
    }

    pub fn publish_quest_progress(&self, quest_id: &str, current: u32, required: u32) {
        self.emit(quest::PROGRESS, QuestProgress::new(quest_id, current, required));
    }

    pub fn publish_quest_completed(&self, quest_id: &str, title: &str, reward_gold: u32) {
        self.emit(
            quest::COMPLETED,
            QuestCompleted::new(quest_id, title, reward_gold),
        );
    }

    pub fn publish_dialogue_started(&self, dialogue_id: &str, speaker: &str) {
        self.emit(dialogue::STARTED, DialogueStarted::new(dialogue_id, speaker));
    }

    pub fn publish_dialogue_ended(&self) {
        self.emit(dialogue::ENDED, ());
    }

    pub fn publish_dialogue_choice(&self, dialogue_id: &str, choice_index: usize, text: &str) {
        self.emit(
            dialogue::CHOICE_SELECTED,
            DialogueChoice::new(dialogue_id, choice_index, text),
        );
    }

    pub fn publish_resolution_changed(&self, resolution: Resolution) {
        self.emit(ui::RESOLUTION_CHANGED, ResolutionChanged::new(resolution));
    }

    pub fn publish_fullscreen_toggled(&self, enabled: bool) {
        self.emit(ui::FULLSCREEN_TOGGLED, enabled);
    }

    pub fn publish_settings_opened(&self) {
        self.emit(ui::SETTINGS_OPENED, ());
    }

    pub fn publish_settings_closed(&self) {
        self.emit(ui::SETTINGS_CLOSED, ());
    }

    pub fn publish_settings_applied(&self, settings: SettingsApplied) {
        self.emit(ui::SETTINGS_APPLIED, settings);
    }

    pub fn publish_pause_menu_open(&self) {
        self.emit(ui::PAUSE_MENU_OPEN, ());
    }

    pub fn publish_pause_menu_close(&self) {
        self.emit(ui::PAUSE_MENU_CLOSE, ());
    }

    pub fn publish_pause_confirmation_close(&self) {
        self.emit(ui::PAUSE_CONFIRMATION_CLOSE, ());
    }

    pub fn publish_save_slot_menu_close(&self) {
        self.emit(ui::SAVE_SLOT_MENU_CLOSE, ());
    }

    pub fn publish_transition_panel_hidden(&self) {
        self.emit(ui::TRANSITION_PANEL_HIDDEN, ());
    }

    pub fn publish_cancel_pressed(&self) {
        self.emit(ui::CANCEL_PRESSED, ());
    }

    pub fn publish_game_started(&self, reason: &str) {
        self.emit(game::STARTED, GameStateChanged::new(reason));
    }

    pub fn publish_game_paused(&self, reason: &str) {
        self.emit(game::PAUSED, GameStateChanged::new(reason));
    }

    pub fn publish_game_resumed(&self, reason: &str) {
        self.emit(game::RESUMED, GameStateChanged::new(reason));
    }

    pub fn publish_game_stopped(&self, reason: &str) {
        self.emit(game::STOPPED, GameStateChanged::new(reason));
    }

    pub fn publish_game_over(&self, victory: bool, score: u32) {
        self.emit(game::OVER, GameOver::new(victory, score));
    }

    pub fn publish_restart_requested(&self, from_checkpoint: bool) {
        self.emit(
            game::RESTART_REQUESTED,
            RestartRequested::new(from_checkpoint),
        );
    }

    pub fn publish_restart_started(&self, affected: usize) {
        self.emit(restart::STARTED, RestartStage::new(affected));
    }

    pub fn publish_entities_cleared(&self, affected: usize) {
        self.emit(restart::ENTITIES_CLEARED, RestartStage::new(affected));
    }

    pub fn publish_player_reset(&self, affected: usize) {
        self.emit(restart::PLAYER_RESET, RestartStage::new(affected));
    }

    pub fn publish_enemies_reset(&self, affected: usize) {
        self.emit(restart::ENEMIES_RESET, RestartStage::new(affected));
    }

    pub fn publish_ui_reset(&self, affected: usize) {
        self.emit(restart::UI_RESET, RestartStage::new(affected));
    }

    pub fn publish_restart_completed(&self, affected: usize) {
        self.emit(restart::COMPLETED, RestartStage::new(affected));
    }

    pub fn publish_reset_requested(&self, for_ui: bool, from_save: bool) {
        self.emit(reset::REQUESTED, ResetRequested::new(for_ui, from_save));
    }

    pub fn publish_scene_clear_requested(&self) {
        self.emit(reset::SCENE_CLEAR_REQUESTED, ());
    }

    pub fn publish_level_loaded(&self, index: u32, name: &str) {
        self.emit(level::LOADED, LevelLoaded::new(index, name));
    }

    pub fn publish_level_completed(&self, index: u32, name: &str, elapsed_secs: f32) {
        self.emit(
            level::COMPLETED,
            LevelCompleted::new(index, name, elapsed_secs),
        );
    }

    pub fn publish_level_transition(&self, from: u32, to: u32) {
        self.emit(level::TRANSITION_STARTED, LevelTransition::new(from, to));
    }

    pub fn publish_chest_opened(&self, chest_id: &str, position: Position, contents: Vec<String>) {
        self.emit(
            environment::CHEST_OPENED,
            ChestOpened::new(chest_id, position, contents),
        );
    }

    pub fn publish_chest_spawned(&self, position: Position) {
        self.emit(environment::CHEST_SPAWNED, ChestSpawned::new(position));
    }

    pub fn publish_item_dropped(&self, kind: DropKind, amount: u32, position: Position) {
        self.emit(
            environment::ITEM_DROPPED,
            ItemDropped::new(kind, amount, position),
        );
    }

    pub fn publish_volume_changed(&self, master: f32, music: f32, sfx: f32) {
        self.emit(audio::VOLUME_CHANGED, VolumeChanged::new(master, music, sfx));
    }

    pub fn publish_play_sfx(&self, clip: &str) {
        self.emit(audio::PLAY_SFX, clip.to_owned());
    }

    pub fn publish_npc_interacted(&self, npc_name: &str) {
        self.emit(npc::INTERACTED, NpcInteracted::new(npc_name));
    }

    pub fn publish_system_error(&self, message: &str) {
        self.emit(system::ERROR, message.to_owned());
    }
}
