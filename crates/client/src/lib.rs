//! Headless game client driving the event system frame by frame.
//!
//! # Architecture
//!
//! ```text
//! Client (composition root)
//!   ├─→ EventBus (shared handle)
//!   ├─→ EventSystem (handler modules + native signal bridges)
//!   └─→ World (player, quest book, floor, restart pipeline, screen)
//! ```
//!
//! Each frame plays one scripted [`Beat`](script::Beat), which publishes
//! immediately or queues for later, and then drains the deferred queue once,
//! the way a game loop's end-of-frame flush does.

mod builder;
pub mod script;
pub mod world;

pub use builder::ClientBuilder;

use std::rc::Rc;

use event_bus::{EventBus, Statistics};
use runtime::EventSystem;
use serde::Serialize;

use crate::script::{Beat, Stage};
use crate::world::{Floor, Player, QuestBook, RestartPipeline, Screen};

/// Summary written at the end of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub frames: u32,
    pub player_hp: i32,
    pub player_gold: u32,
    pub loot_on_floor: usize,
    /// Publish and failure counts seen by the bus.
    pub bus: Statistics,
    /// Publishes issued through the event system's wrappers and bridges.
    pub system: Statistics,
}

pub struct Client {
    bus: EventBus,
    system: EventSystem,
    player: Rc<Player>,
    quests: Rc<QuestBook>,
    floor: Rc<Floor>,
    restart: Rc<RestartPipeline>,
    screen: Rc<Screen>,
    beats: Vec<Beat>,
    frames_played: u32,
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn system(&self) -> &EventSystem {
        &self.system
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn quests(&self) -> &QuestBook {
        &self.quests
    }

    /// Plays the next beat and flushes the deferred queue. Returns how many
    /// queued events were delivered.
    pub fn step(&mut self) -> usize {
        let beat = self.beats[self.frames_played as usize % self.beats.len()];
        let _frame = tracing::debug_span!("frame", n = self.frames_played, %beat).entered();

        beat.play(&Stage {
            system: &self.system,
            player: &self.player,
            quests: &self.quests,
            floor: &self.floor,
            restart: &self.restart,
            screen: &self.screen,
        });
        let drained = self.system.process_queued_events();

        self.frames_played += 1;
        drained
    }

    /// Plays `frames` frames and returns the report at that point.
    pub fn run(&mut self, frames: u32) -> SessionReport {
        for _ in 0..frames {
            self.step();
        }
        self.report()
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            frames: self.frames_played,
            player_hp: self.player.hp(),
            player_gold: self.player.gold(),
            loot_on_floor: self.floor.loot().len(),
            bus: self.bus.statistics(),
            system: self.system.statistics(),
        }
    }

    /// Tears the session down: detaches modules and signals, then clears the
    /// bus. Returns the final report.
    pub fn shutdown(mut self) -> SessionReport {
        let report = self.report();
        self.system.dispose();
        self.bus.dispose();
        tracing::info!(frames = report.frames, "session closed");
        report
    }
}
