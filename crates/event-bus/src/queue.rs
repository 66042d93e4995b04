//! Deferred delivery queue.
//!
//! An [`Envelope`] captures a closure that already knows how to re-publish its
//! own typed payload, so draining the queue needs no runtime type lookup.

use std::collections::VecDeque;
use std::fmt;

use crate::bus::EventBus;

type Redeliver = Box<dyn FnOnce(&EventBus)>;

/// A queued (topic, payload) pair awaiting deferred delivery.
pub struct Envelope {
    topic: String,
    sequence: u64,
    deliver: Redeliver,
}

impl Envelope {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Enqueue order, monotonically increasing per bus.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub(crate) fn deliver(self, bus: &EventBus) {
        (self.deliver)(bus)
    }
}

impl fmt::Debug for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Envelope")
            .field("topic", &self.topic)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

/// FIFO of envelopes.
#[derive(Debug, Default)]
pub(crate) struct DeferredQueue {
    envelopes: VecDeque<Envelope>,
    next_sequence: u64,
}

impl DeferredQueue {
    pub(crate) fn push<P: 'static>(&mut self, topic: &str, payload: P) -> u64 {
        let sequence = self.next_sequence;
        self.next_sequence += 1;

        let owned_topic = topic.to_owned();
        let replay_topic = owned_topic.clone();
        self.envelopes.push_back(Envelope {
            topic: owned_topic,
            sequence,
            deliver: Box::new(move |bus: &EventBus| bus.publish(&replay_topic, payload)),
        });
        sequence
    }

    pub(crate) fn pop(&mut self) -> Option<Envelope> {
        self.envelopes.pop_front()
    }

    pub(crate) fn len(&self) -> usize {
        self.envelopes.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.envelopes.is_empty()
    }

    /// Removes every pending envelope. The sequence counter keeps running.
    pub(crate) fn take(&mut self) -> VecDeque<Envelope> {
        std::mem::take(&mut self.envelopes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequences_increase_in_push_order() {
        let mut queue = DeferredQueue::default();
        assert_eq!(queue.push("a", 1u8), 0);
        assert_eq!(queue.push("b", 2u8), 1);

        let first = queue.pop().unwrap();
        assert_eq!(first.topic(), "a");
        assert_eq!(first.sequence(), 0);
        assert_eq!(queue.pop().unwrap().topic(), "b");
        assert!(queue.pop().is_none());
    }

    #[test]
    fn take_empties_but_keeps_counting() {
        let mut queue = DeferredQueue::default();
        queue.push("a", ());
        queue.push("b", ());
        assert_eq!(queue.take().len(), 2);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.push("c", ()), 2);
    }
}
