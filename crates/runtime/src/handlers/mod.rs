//! Domain handler modules.
//!
//! Each module owns the subscriptions for one slice of the topic catalog and
//! translates events into calls on its collaborators (and, occasionally, into
//! further publishes). Modules never talk to each other directly; anything
//! they need to say goes back through the bus.

mod game_state;
mod gameplay;
mod reset;
mod ui;

pub use game_state::GameStateHandlers;
pub use gameplay::GameplayHandlers;
pub use reset::ResetHandlers;
pub use ui::{CancelAction, CancelContext, UiHandlers, resolve_cancel};

use std::rc::Rc;

use event_bus::{EventBus, HandlerResult, SubscriptionId};
use tracing::debug;

/// Lifecycle shared by every handler module.
///
/// `subscribe_to_events` and `unsubscribe_from_events` must mirror each other:
/// whatever the first registers, the second removes.
pub trait HandlerModule {
    fn name(&self) -> &'static str;

    /// True while the module holds subscriptions.
    fn is_active(&self) -> bool;

    fn subscribe_to_events(&mut self);

    fn unsubscribe_from_events(&mut self);

    /// Registers the module's handlers. A second call is a no-op.
    fn initialize(&mut self) {
        if self.is_active() {
            debug!(module = self.name(), "already initialized");
            return;
        }
        self.subscribe_to_events();
        debug!(module = self.name(), "initialized");
    }

    /// Removes the module's handlers. Safe to call repeatedly.
    fn dispose(&mut self) {
        if !self.is_active() {
            return;
        }
        self.unsubscribe_from_events();
        debug!(module = self.name(), "disposed");
    }
}

/// Book of `(topic, id)` pairs a module registered on the bus.
#[derive(Debug)]
pub struct Subscriptions {
    bus: EventBus,
    entries: Vec<(&'static str, SubscriptionId)>,
}

impl Subscriptions {
    pub fn new(bus: EventBus) -> Self {
        Self {
            bus,
            entries: Vec::new(),
        }
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Subscribes `handler` to `topic`, calling it with `context` on every
    /// delivery.
    pub fn route<C, P>(
        &mut self,
        context: &Rc<C>,
        topic: &'static str,
        handler: fn(&C, &P) -> HandlerResult,
    ) where
        C: 'static,
        P: 'static,
    {
        let context = Rc::clone(context);
        if let Some(id) = self
            .bus
            .subscribe(topic, move |payload: &P| handler(&context, payload))
        {
            self.entries.push((topic, id));
        }
    }

    /// Unsubscribes everything recorded so far. Returns how many entries were
    /// removed from the bus.
    pub fn clear(&mut self) -> usize {
        let mut removed = 0;
        for (topic, id) in self.entries.drain(..) {
            if self.bus.unsubscribe(topic, id) {
                removed += 1;
            }
        }
        removed
    }

    pub fn topics(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(topic, _)| *topic)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    struct Counter {
        hits: Cell<u32>,
    }

    impl Counter {
        fn on_tick(&self, step: &u32) -> HandlerResult {
            self.hits.set(self.hits.get() + step);
            Ok(())
        }
    }

    #[test]
    fn route_and_clear_mirror_each_other() {
        let bus = EventBus::new();
        let counter = Rc::new(Counter { hits: Cell::new(0) });
        let mut subscriptions = Subscriptions::new(bus.clone());

        subscriptions.route(&counter, "system.tick", Counter::on_tick);
        subscriptions.route(&counter, "system.tock", Counter::on_tick);
        assert_eq!(subscriptions.len(), 2);
        assert_eq!(
            subscriptions.topics().collect::<Vec<_>>(),
            ["system.tick", "system.tock"]
        );

        bus.publish("system.tick", 2u32);
        assert_eq!(counter.hits.get(), 2);

        assert_eq!(subscriptions.clear(), 2);
        assert!(subscriptions.is_empty());
        assert!(bus.is_empty());

        bus.publish("system.tick", 2u32);
        assert_eq!(counter.hits.get(), 2);
    }

    #[test]
    fn clear_releases_the_context() {
        let bus = EventBus::new();
        let counter = Rc::new(Counter { hits: Cell::new(0) });
        let mut subscriptions = Subscriptions::new(bus);

        subscriptions.route(&counter, "system.tick", Counter::on_tick);
        assert_eq!(Rc::strong_count(&counter), 2);

        subscriptions.clear();
        assert_eq!(Rc::strong_count(&counter), 1);
    }

    #[test]
    fn clear_tolerates_a_disposed_bus() {
        let bus = EventBus::new();
        let counter = Rc::new(Counter { hits: Cell::new(0) });
        let mut subscriptions = Subscriptions::new(bus.clone());

        subscriptions.route(&counter, "system.tick", Counter::on_tick);
        bus.dispose();

        assert_eq!(subscriptions.clear(), 0);
        assert!(subscriptions.is_empty());
    }
}
