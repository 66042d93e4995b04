//! In-memory collaborators shared by the integration tests.
#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use event_bus::{EventBus, HandlerResult};
use game_events::{DropKind, Position, Resolution, RestartRequested};
use runtime::{
    CancelContext, Collaborators, ContentLoader, LogColor, LogSink, Panels, QuestManager,
    QuestOutcome, RandomSource, RestartError, RestartManager, SpawnError, UiManager,
};

#[derive(Default)]
pub struct RecordingLog {
    lines: RefCell<Vec<(String, LogColor)>>,
}

impl RecordingLog {
    pub fn lines(&self) -> Vec<(String, LogColor)> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.borrow().iter().any(|(line, _)| line.contains(needle))
    }

    pub fn color_of(&self, needle: &str) -> Option<LogColor> {
        self.lines
            .borrow()
            .iter()
            .find(|(line, _)| line.contains(needle))
            .map(|(_, color)| *color)
    }
}

impl LogSink for RecordingLog {
    fn write(&self, text: &str, color: LogColor) {
        self.lines.borrow_mut().push((text.to_owned(), color));
    }
}

/// Answers quest queries from a script, falling back to `Untracked`.
#[derive(Default)]
pub struct ScriptedQuests {
    pub kills: RefCell<Vec<String>>,
    pub collected: RefCell<Vec<(String, u32)>>,
    outcomes: RefCell<VecDeque<QuestOutcome>>,
}

impl ScriptedQuests {
    pub fn push_outcome(&self, outcome: QuestOutcome) {
        self.outcomes.borrow_mut().push_back(outcome);
    }

    fn next(&self) -> QuestOutcome {
        self.outcomes
            .borrow_mut()
            .pop_front()
            .unwrap_or(QuestOutcome::Untracked)
    }
}

impl QuestManager for ScriptedQuests {
    fn record_kill(&self, enemy_kind: &str) -> QuestOutcome {
        self.kills.borrow_mut().push(enemy_kind.to_owned());
        self.next()
    }

    fn record_collect(&self, item_id: &str, quantity: u32) -> QuestOutcome {
        self.collected
            .borrow_mut()
            .push((item_id.to_owned(), quantity));
        self.next()
    }
}

#[derive(Default)]
pub struct RecordingContent {
    pub spawned: RefCell<Vec<(DropKind, u32)>>,
    missing: RefCell<Vec<DropKind>>,
}

impl RecordingContent {
    /// Makes every spawn of `kind` fail with a missing prefab.
    pub fn break_prefab(&self, kind: DropKind) {
        self.missing.borrow_mut().push(kind);
    }

    pub fn kinds(&self) -> Vec<DropKind> {
        self.spawned.borrow().iter().map(|(kind, _)| *kind).collect()
    }
}

impl ContentLoader for RecordingContent {
    fn spawn(&self, kind: DropKind, amount: u32, _position: Position) -> Result<(), SpawnError> {
        if self.missing.borrow().contains(&kind) {
            return Err(SpawnError::MissingPrefab { kind });
        }
        self.spawned.borrow_mut().push((kind, amount));
        Ok(())
    }
}

/// Every roll returns `roll`; every range returns its midpoint.
pub struct FixedRandom {
    pub roll: Cell<f32>,
}

impl FixedRandom {
    pub fn new(roll: f32) -> Self {
        Self {
            roll: Cell::new(roll),
        }
    }
}

impl RandomSource for FixedRandom {
    fn roll(&self) -> f32 {
        self.roll.get()
    }

    fn range(&self, min: u32, max: u32) -> u32 {
        min + (max.saturating_sub(min)) / 2
    }
}

pub struct FakeRestart {
    pub requests: RefCell<Vec<bool>>,
    outcome: RefCell<Result<(), RestartError>>,
}

impl FakeRestart {
    pub fn failing(err: RestartError) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            outcome: RefCell::new(Err(err)),
        }
    }
}

impl Default for FakeRestart {
    fn default() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            outcome: RefCell::new(Ok(())),
        }
    }
}

impl RestartManager for FakeRestart {
    fn restart(&self, request: &RestartRequested) -> Result<(), RestartError> {
        self.requests.borrow_mut().push(request.from_checkpoint);
        self.outcome.borrow().clone()
    }
}

#[derive(Default)]
pub struct FakeUi {
    pub panels: Cell<Panels>,
    pub dialogue_active: Cell<bool>,
    pub game_started: Cell<bool>,
    pub game_paused: Cell<bool>,
    pub resolution: Cell<Option<Resolution>>,
    pub fullscreen: Cell<Option<bool>>,
}

impl FakeUi {
    pub fn in_game() -> Self {
        let ui = Self::default();
        ui.game_started.set(true);
        ui.panels.set(Panels::HUD);
        ui
    }

    pub fn show_panels(&self, panels: Panels) {
        self.panels.set(self.panels.get() | panels);
    }

    pub fn is_visible(&self, panels: Panels) -> bool {
        self.panels.get().contains(panels)
    }
}

impl UiManager for FakeUi {
    fn show(&self, panels: Panels) {
        self.panels.set(self.panels.get() | panels);
    }

    fn hide(&self, panels: Panels) {
        self.panels.set(self.panels.get() - panels);
    }

    fn visible(&self) -> Panels {
        self.panels.get()
    }

    fn cancel_context(&self) -> CancelContext {
        CancelContext::from_panels(
            self.panels.get(),
            self.dialogue_active.get(),
            self.game_started.get(),
            self.game_paused.get(),
        )
    }

    fn apply_resolution(&self, resolution: Resolution) {
        self.resolution.set(Some(resolution));
    }

    fn set_fullscreen(&self, enabled: bool) {
        self.fullscreen.set(Some(enabled));
    }
}

/// A bus plus one of each fake, kept concrete so tests can inspect them.
pub struct World {
    pub bus: EventBus,
    pub log: Rc<RecordingLog>,
    pub quests: Rc<ScriptedQuests>,
    pub content: Rc<RecordingContent>,
    pub random: Rc<FixedRandom>,
    pub restart: Rc<FakeRestart>,
    pub ui: Rc<FakeUi>,
}

impl World {
    /// Rolls always succeed, so every chance-based drop happens.
    pub fn new() -> Self {
        init_tracing();
        Self {
            bus: EventBus::new(),
            log: Rc::new(RecordingLog::default()),
            quests: Rc::new(ScriptedQuests::default()),
            content: Rc::new(RecordingContent::default()),
            random: Rc::new(FixedRandom::new(0.0)),
            restart: Rc::new(FakeRestart::default()),
            ui: Rc::new(FakeUi::in_game()),
        }
    }

    pub fn collaborators(&self) -> Collaborators {
        Collaborators {
            log: self.log.clone(),
            quests: self.quests.clone(),
            content: self.content.clone(),
            random: self.random.clone(),
            restart: self.restart.clone(),
            ui: self.ui.clone(),
        }
    }
}

/// Routes handler warnings to the test output. Later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Collects every payload published on `topic`.
pub fn record<P: Clone + 'static>(bus: &EventBus, topic: &str) -> Rc<RefCell<Vec<P>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    bus.subscribe(topic, move |payload: &P| -> HandlerResult {
        sink.borrow_mut().push(payload.clone());
        Ok(())
    });
    seen
}
