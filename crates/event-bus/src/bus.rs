//! Topic-keyed event bus implementation.

use std::any::{self, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::mem;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use tracing::{debug, error, trace, warn};

use crate::error::HandlerResult;
use crate::queue::{DeferredQueue, Envelope};
use crate::stats::Statistics;
use crate::subscription::{Subscription, SubscriptionId};

/// Diagnostics switches for an [`EventBus`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusConfig {
    /// Log every publish at `trace` level.
    pub trace_publishes: bool,
    /// Log at `debug` level when a publish reaches no matching handler.
    pub log_unhandled: bool,
}

#[derive(Default)]
struct BusState {
    handlers: HashMap<String, Vec<Rc<Subscription>>>,
    queue: DeferredQueue,
    stats: Statistics,
    next_id: u64,
}

/// Single-threaded publish/subscribe bus.
///
/// `EventBus` is a cheap handle: clones share one registry, queue, and
/// statistics table. The handle is neither `Send` nor `Sync`; everything runs
/// on the thread that drives the frame loop.
///
/// Handlers are invoked synchronously. A handler may publish, queue,
/// subscribe, or unsubscribe while it runs; registry changes apply to the next
/// publish, not the one in progress.
///
/// Handlers that capture a clone of the bus form a reference cycle with it.
/// The cycle is broken by `unsubscribe` or [`EventBus::dispose`].
#[derive(Clone)]
pub struct EventBus {
    state: Rc<RefCell<BusState>>,
    config: BusConfig,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_config(BusConfig::default())
    }

    pub fn with_config(config: BusConfig) -> Self {
        Self {
            state: Rc::new(RefCell::new(BusState::default())),
            config,
        }
    }

    pub fn config(&self) -> BusConfig {
        self.config
    }

    /// Registers `handler` for payloads of type `P` published on `topic`.
    ///
    /// Returns `None` and registers nothing when `topic` is empty. Registering
    /// the same closure twice creates two independent subscriptions.
    pub fn subscribe<P, F>(&self, topic: &str, handler: F) -> Option<SubscriptionId>
    where
        P: 'static,
        F: Fn(&P) -> HandlerResult + 'static,
    {
        if topic.is_empty() {
            debug!(
                payload = any::type_name::<P>(),
                "ignoring subscription with empty topic"
            );
            return None;
        }

        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = SubscriptionId::new(state.next_id);
        let subscription = Subscription::new::<P, F>(id, handler);

        debug!(
            topic,
            subscription = %id,
            payload = subscription.payload_name(),
            "subscribed"
        );

        state
            .handlers
            .entry(topic.to_owned())
            .or_default()
            .push(Rc::new(subscription));
        Some(id)
    }

    /// Removes the subscription `id` from `topic`.
    ///
    /// Drops the topic entry once its last handler is gone. Returns `false`
    /// when the topic or subscription is unknown.
    pub fn unsubscribe(&self, topic: &str, id: SubscriptionId) -> bool {
        let removed = {
            let mut state = self.state.borrow_mut();
            let Some(list) = state.handlers.get_mut(topic) else {
                return false;
            };
            let Some(index) = list.iter().position(|s| s.id() == id) else {
                return false;
            };
            let removed = list.remove(index);
            if list.is_empty() {
                state.handlers.remove(topic);
            }
            removed
        };

        debug!(topic, subscription = %id, "unsubscribed");
        // Released outside the borrow: the closure may own a bus handle.
        drop(removed);
        true
    }

    /// Delivers `payload` to every handler on `topic` registered for `P`.
    ///
    /// Handlers registered for another payload type are skipped. Returns once
    /// every handler in the snapshot has been attempted.
    pub fn publish<P: 'static>(&self, topic: &str, payload: P) {
        self.dispatch(topic, &payload, TypeId::of::<P>(), any::type_name::<P>());
    }

    /// Appends `payload` to the deferred queue without dispatching it.
    pub fn queue_event<P: 'static>(&self, topic: &str, payload: P) {
        if topic.is_empty() {
            debug!(
                payload = any::type_name::<P>(),
                "ignoring queued event with empty topic"
            );
            return;
        }

        let sequence = self.state.borrow_mut().queue.push(topic, payload);
        trace!(topic, sequence, "queued event");
    }

    /// Delivers the envelopes that were queued when this call started, in
    /// FIFO order. Envelopes queued by handlers during the drain wait for the
    /// next call. Returns the number of envelopes delivered.
    pub fn process_queued_events(&self) -> usize {
        let pending = self.pending_events();
        let mut delivered = 0;

        while delivered < pending {
            // Empty early if a handler disposed the bus mid-drain.
            let Some(envelope) = self.pop_envelope() else {
                break;
            };
            trace!(
                topic = envelope.topic(),
                sequence = envelope.sequence(),
                "delivering queued event"
            );
            envelope.deliver(self);
            delivered += 1;
        }

        if delivered > 0 {
            debug!(
                delivered,
                remaining = self.pending_events(),
                "processed queued events"
            );
        }
        delivered
    }

    /// Clears all subscriptions, queued envelopes, and statistics.
    ///
    /// The handle stays usable and behaves like a fresh bus afterwards.
    /// Calling this repeatedly is harmless.
    pub fn dispose(&self) {
        let (handlers, queue) = {
            let mut state = self.state.borrow_mut();
            state.stats.clear();
            (mem::take(&mut state.handlers), state.queue.take())
        };

        if !handlers.is_empty() || !queue.is_empty() {
            debug!(
                topics = handlers.len(),
                queued = queue.len(),
                "event bus disposed"
            );
        }

        drop(handlers);
        drop(queue);
    }

    /// Snapshot of the per-topic statistics table.
    pub fn statistics(&self) -> Statistics {
        self.state.borrow().stats.clone()
    }

    pub fn publish_count(&self, topic: &str) -> u64 {
        self.state.borrow().stats.published(topic)
    }

    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.state.borrow().handlers.get(topic).map_or(0, Vec::len)
    }

    pub fn has_subscribers(&self, topic: &str) -> bool {
        self.subscriber_count(topic) > 0
    }

    /// Topics with at least one subscription, sorted.
    pub fn topics(&self) -> Vec<String> {
        let mut topics: Vec<String> = self.state.borrow().handlers.keys().cloned().collect();
        topics.sort();
        topics
    }

    pub fn pending_events(&self) -> usize {
        self.state.borrow().queue.len()
    }

    /// True when nothing is subscribed and nothing is queued.
    pub fn is_empty(&self) -> bool {
        let state = self.state.borrow();
        state.handlers.is_empty() && state.queue.is_empty()
    }

    fn pop_envelope(&self) -> Option<Envelope> {
        self.state.borrow_mut().queue.pop()
    }

    fn record_failure(&self, topic: &str) {
        self.state.borrow_mut().stats.record_failure(topic);
    }

    fn dispatch(
        &self,
        topic: &str,
        payload: &dyn Any,
        payload_type: TypeId,
        payload_name: &'static str,
    ) {
        if topic.is_empty() {
            debug!(payload = payload_name, "ignoring publish with empty topic");
            return;
        }

        let snapshot: Vec<Rc<Subscription>> = {
            let mut state = self.state.borrow_mut();
            state.stats.record_publish(topic);
            state.handlers.get(topic).cloned().unwrap_or_default()
        };

        if self.config.trace_publishes {
            trace!(
                topic,
                payload = payload_name,
                handlers = snapshot.len(),
                "publish"
            );
        }

        let mut delivered = 0usize;
        for subscription in &snapshot {
            if !subscription.accepts(payload_type) {
                trace!(
                    topic,
                    subscription = %subscription.id(),
                    expected = subscription.payload_name(),
                    actual = payload_name,
                    "skipping handler with mismatched payload type"
                );
                continue;
            }

            delivered += 1;
            match panic::catch_unwind(AssertUnwindSafe(|| subscription.invoke(payload))) {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn!(
                        topic,
                        subscription = %subscription.id(),
                        error = %err,
                        "event handler failed"
                    );
                    self.record_failure(topic);
                }
                Err(panic) => {
                    error!(
                        topic,
                        subscription = %subscription.id(),
                        panic = %panic_message(panic.as_ref()),
                        "event handler panicked"
                    );
                    self.record_failure(topic);
                }
            }
        }

        if delivered == 0 && self.config.log_unhandled {
            debug!(topic, payload = payload_name, "no handler accepted event");
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("EventBus")
            .field("topics", &state.handlers.len())
            .field("queued", &state.queue.len())
            .field("config", &self.config)
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use super::*;
    use crate::HandlerError;

    #[test]
    fn empty_topic_is_rejected() {
        let bus = EventBus::new();
        assert!(bus.subscribe("", |_: &u32| Ok(())).is_none());
        assert!(bus.is_empty());

        bus.publish("", 1u32);
        bus.queue_event("", 1u32);
        assert_eq!(bus.statistics().total_published(), 0);
        assert_eq!(bus.pending_events(), 0);
    }

    #[test]
    fn unsubscribe_unknown_is_a_no_op() {
        let bus = EventBus::new();
        let id = bus.subscribe("player.died", |_: &()| Ok(())).unwrap();

        assert!(!bus.unsubscribe("player.respawned", id));
        assert!(bus.unsubscribe("player.died", id));
        assert!(!bus.unsubscribe("player.died", id));
    }

    #[test]
    fn topic_entry_removed_with_last_handler() {
        let bus = EventBus::new();
        let a = bus.subscribe("ui.settings_opened", |_: &()| Ok(())).unwrap();
        let b = bus.subscribe("ui.settings_opened", |_: &()| Ok(())).unwrap();
        assert_eq!(bus.subscriber_count("ui.settings_opened"), 2);

        bus.unsubscribe("ui.settings_opened", a);
        assert_eq!(bus.topics(), vec!["ui.settings_opened".to_owned()]);

        bus.unsubscribe("ui.settings_opened", b);
        assert!(bus.topics().is_empty());
        assert!(!bus.has_subscribers("ui.settings_opened"));
    }

    #[test]
    fn duplicate_registration_is_not_deduplicated() {
        let bus = EventBus::new();
        let calls = Rc::new(Cell::new(0));

        let handler = {
            let calls = Rc::clone(&calls);
            move |_: &u8| {
                calls.set(calls.get() + 1);
                Ok(())
            }
        };
        let first = bus.subscribe("audio.play_sfx", handler.clone()).unwrap();
        let second = bus.subscribe("audio.play_sfx", handler).unwrap();
        assert_ne!(first, second);

        bus.publish("audio.play_sfx", 1u8);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn mismatched_payload_type_is_skipped() {
        let bus = EventBus::new();
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = Rc::clone(&seen);
        bus.subscribe("ui.fullscreen_toggled", move |on: &bool| {
            log.borrow_mut().push(*on);
            Ok(())
        });

        bus.publish("ui.fullscreen_toggled", "true".to_owned());
        bus.publish("ui.fullscreen_toggled", true);

        assert_eq!(*seen.borrow(), vec![true]);
        // Both publishes are counted, matched or not.
        assert_eq!(bus.publish_count("ui.fullscreen_toggled"), 2);
    }

    #[test]
    fn handler_errors_are_counted_not_propagated() {
        let bus = EventBus::new();
        bus.subscribe("system.error", |_: &String| Err(HandlerError::msg("sink offline")));

        bus.publish("system.error", "disk full".to_owned());

        let stats = bus.statistics();
        assert_eq!(stats.published("system.error"), 1);
        assert_eq!(stats.failures("system.error"), 1);
    }

    #[test]
    fn reentrant_publish_from_handler() {
        let bus = EventBus::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        {
            let bus_handle = bus.clone();
            let order = Rc::clone(&order);
            bus.subscribe("combat.enemy_killed", move |name: &String| {
                order.borrow_mut().push(format!("killed {name}"));
                bus_handle.publish("environment.item_dropped", 15u32);
                Ok(())
            });
        }
        {
            let order = Rc::clone(&order);
            bus.subscribe("environment.item_dropped", move |gold: &u32| {
                order.borrow_mut().push(format!("dropped {gold}"));
                Ok(())
            });
        }

        bus.publish("combat.enemy_killed", "Skeleton".to_owned());
        assert_eq!(*order.borrow(), vec!["killed Skeleton", "dropped 15"]);
        bus.dispose();
    }

    #[test]
    fn subscribe_during_dispatch_applies_to_next_publish() {
        let bus = EventBus::new();
        let late_calls = Rc::new(Cell::new(0));

        {
            let bus_handle = bus.clone();
            let late_calls = Rc::clone(&late_calls);
            bus.subscribe("level.loaded", move |_: &u32| {
                let late_calls = Rc::clone(&late_calls);
                bus_handle.subscribe("level.loaded", move |_: &u32| {
                    late_calls.set(late_calls.get() + 1);
                    Ok(())
                });
                Ok(())
            });
        }

        bus.publish("level.loaded", 1u32);
        assert_eq!(late_calls.get(), 0);

        bus.publish("level.loaded", 2u32);
        assert_eq!(late_calls.get(), 1);
        bus.dispose();
    }

    #[test]
    fn unsubscribe_during_dispatch_does_not_cut_current_pass() {
        let bus = EventBus::new();
        let second_calls = Rc::new(Cell::new(0));
        let second_id = Rc::new(Cell::new(None));

        {
            let bus_handle = bus.clone();
            let second_id = Rc::clone(&second_id);
            bus.subscribe("game.stopped", move |_: &()| {
                if let Some(id) = second_id.get() {
                    bus_handle.unsubscribe("game.stopped", id);
                }
                Ok(())
            });
        }
        {
            let second_calls = Rc::clone(&second_calls);
            let id = bus.subscribe("game.stopped", move |_: &()| {
                second_calls.set(second_calls.get() + 1);
                Ok(())
            });
            second_id.set(id);
        }

        bus.publish("game.stopped", ());
        assert_eq!(second_calls.get(), 1);

        bus.publish("game.stopped", ());
        assert_eq!(second_calls.get(), 1);
        bus.dispose();
    }

    #[test]
    fn clones_share_state() {
        let bus = EventBus::new();
        let other = bus.clone();
        other.subscribe("npc.spawned", |_: &()| Ok(()));
        other.queue_event("npc.spawned", ());

        assert!(bus.has_subscribers("npc.spawned"));
        assert_eq!(bus.pending_events(), 1);
        assert_eq!(bus.process_queued_events(), 1);
        assert_eq!(other.publish_count("npc.spawned"), 1);
    }

    #[test]
    fn config_is_carried_by_clones() {
        let config = BusConfig {
            trace_publishes: true,
            log_unhandled: true,
        };
        let bus = EventBus::with_config(config);
        assert_eq!(bus.clone().config(), config);
        // Unhandled publishes still count.
        bus.publish("audio.volume_changed", 0.5f32);
        assert_eq!(bus.publish_count("audio.volume_changed"), 1);
    }

    #[test]
    fn panic_message_extracts_strings() {
        let boxed: Box<dyn Any + Send> = Box::new("static str");
        assert_eq!(panic_message(boxed.as_ref()), "static str");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
        let boxed: Box<dyn Any + Send> = Box::new(17u8);
        assert_eq!(panic_message(boxed.as_ref()), "non-string panic payload");
    }
}
