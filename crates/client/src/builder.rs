//! Client builder with dependency injection pattern.

use std::rc::Rc;

use anyhow::{Context, Result};
use client_bootstrap::AppConfig;
use event_bus::EventBus;
use runtime::{Collaborators, EventSystem, StdRandom, TracingLog};
use strum::IntoEnumIterator;

use crate::Client;
use crate::script::Beat;
use crate::world::{Floor, Player, QuestBook, RestartPipeline, Screen};

/// Assembles the bus, the in-memory world and the event system.
///
/// Every collaborator is built here and injected into [`EventSystem`]; nothing
/// reaches the bus through a global.
#[derive(Default)]
pub struct ClientBuilder {
    config: AppConfig,
    player_name: Option<String>,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player_name(mut self, name: impl Into<String>) -> Self {
        self.player_name = Some(name.into());
        self
    }

    /// Build the Client.
    ///
    /// # Errors
    ///
    /// Returns an error if the event system refuses to initialize or to attach
    /// the native signal bridges.
    pub fn build(self) -> Result<Client> {
        let config = self.config;
        let bus = EventBus::with_config(config.bus);

        let player = Rc::new(Player::new(
            self.player_name.unwrap_or_else(|| "Hero".to_owned()),
            100,
        ));
        let quests = Rc::new(QuestBook::default());
        let floor = Rc::new(Floor::new(12.0, 12.0));
        let restart = Rc::new(RestartPipeline::new(
            bus.clone(),
            Rc::clone(&floor),
            Rc::clone(&player),
        ));
        let screen = Rc::new(Screen::main_menu());
        let random = match config.rng_seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_entropy(),
        };

        let collaborators = Collaborators {
            log: Rc::new(TracingLog),
            quests: quests.clone(),
            content: floor.clone(),
            random: Rc::new(random),
            restart: restart.clone(),
            ui: screen.clone(),
        };

        let mut system = EventSystem::new(bus.clone(), config.gameplay.clone());
        system
            .initialize(collaborators)
            .context("failed to initialize event system")?;
        system
            .attach_player(player.signals())
            .context("failed to attach player signals")?;
        system
            .attach_quest_log(quests.signals())
            .context("failed to attach quest signals")?;

        tracing::debug!(modules = ?system.module_names(), "client assembled");

        Ok(Client {
            bus,
            system,
            player,
            quests,
            floor,
            restart,
            screen,
            beats: Beat::iter().collect(),
            frames_played: 0,
        })
    }
}
