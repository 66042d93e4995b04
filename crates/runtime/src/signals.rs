//! Native callbacks exposed by gameplay objects.
//!
//! Player and quest objects notify listeners through plain [`Signal`]s that
//! know nothing about the bus. The event system is the one place that connects
//! to them and republishes what they report as topic events.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Signal::connect`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

/// A list of listeners invoked synchronously on [`emit`](Signal::emit).
pub struct Signal<T> {
    slots: RefCell<Vec<(ConnectionId, Rc<dyn Fn(&T)>)>>,
    next_id: Cell<u64>,
}

impl<T> Signal<T> {
    pub fn new() -> Self {
        Self {
            slots: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    pub fn connect<F>(&self, listener: F) -> ConnectionId
    where
        F: Fn(&T) + 'static,
    {
        let id = ConnectionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.slots.borrow_mut().push((id, Rc::new(listener)));
        id
    }

    pub fn disconnect(&self, id: ConnectionId) -> bool {
        let mut slots = self.slots.borrow_mut();
        let Some(index) = slots.iter().position(|(slot, _)| *slot == id) else {
            return false;
        };
        let removed = slots.remove(index);
        drop(slots);
        drop(removed);
        true
    }

    /// Invokes every listener connected when the call starts.
    pub fn emit(&self, value: &T) {
        let listeners: Vec<_> = self
            .slots
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(value);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.borrow().is_empty()
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChange {
    pub previous: i32,
    pub current: i32,
    pub max: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoldChange {
    pub previous: u32,
    pub current: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttackReport {
    pub attacker: String,
    pub target: Option<String>,
    pub damage: u32,
    pub critical: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedQuest {
    pub quest_id: String,
    pub title: String,
    pub reward_gold: u32,
}

/// Callbacks raised by the player object.
#[derive(Debug, Default)]
pub struct PlayerSignals {
    pub health_changed: Signal<HealthChange>,
    pub gold_changed: Signal<GoldChange>,
    pub attack_performed: Signal<AttackReport>,
}

/// Callbacks raised by the quest log.
#[derive(Debug, Default)]
pub struct QuestSignals {
    pub quest_completed: Signal<CompletedQuest>,
}
