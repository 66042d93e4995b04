//! Collaborator boundary.
//!
//! Handler modules never reach into other subsystems directly. Everything they
//! need from the outside world (a message log, quest bookkeeping, spawning,
//! randomness, restarts, panel visibility) comes in through these traits,
//! handed over as a [`Collaborators`] bundle when the event system initializes.

mod content;
mod log;
mod quest;
mod random;
mod restart;
mod ui;

pub use content::ContentLoader;
pub use log::{LogColor, LogSink, TracingLog};
pub use quest::{QuestManager, QuestOutcome};
pub use random::{RandomSource, StdRandom};
pub use restart::RestartManager;
pub use ui::{Panels, UiManager};

use std::rc::Rc;

/// Every collaborator the handler modules close over.
#[derive(Clone)]
pub struct Collaborators {
    pub log: Rc<dyn LogSink>,
    pub quests: Rc<dyn QuestManager>,
    pub content: Rc<dyn ContentLoader>,
    pub random: Rc<dyn RandomSource>,
    pub restart: Rc<dyn RestartManager>,
    pub ui: Rc<dyn UiManager>,
}
