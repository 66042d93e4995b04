//! Game-side consumers of the event bus.
//!
//! The bus itself lives in `event-bus` and knows nothing about the game. This
//! crate provides everything that gives it meaning: the handler modules that
//! react to the topic catalog, the collaborator traits they call into, the
//! native callback signals raised by gameplay objects, and the [`EventSystem`]
//! that wires all of it together.
//!
//! Modules are organized by responsibility:
//! - [`system`] hosts the orchestrator
//! - [`handlers`] holds the handler module contract and the four domain modules
//! - [`collaborators`] defines the traits modules use to reach the rest of the game
//! - [`signals`] provides the native callbacks bridged onto the bus
//! - [`config`] and [`error`] carry tuning knobs and boundary errors
pub mod collaborators;
pub mod config;
pub mod error;
pub mod handlers;
pub mod signals;
pub mod system;

pub use collaborators::{
    Collaborators, ContentLoader, LogColor, LogSink, Panels, QuestManager, QuestOutcome,
    RandomSource, RestartManager, StdRandom, TracingLog, UiManager,
};
pub use config::GameplayConfig;
pub use error::{RestartError, SpawnError, SystemError};
pub use handlers::{
    CancelAction, CancelContext, GameStateHandlers, GameplayHandlers, HandlerModule,
    ResetHandlers, Subscriptions, UiHandlers, resolve_cancel,
};
pub use signals::{
    AttackReport, CompletedQuest, ConnectionId, GoldChange, HealthChange, PlayerSignals,
    QuestSignals, Signal,
};
pub use system::EventSystem;
