//! Per-topic diagnostics.
//!
//! Dispatch never reads these numbers; they exist for logging and debugging.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Counters kept for a single topic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TopicStats {
    /// Publishes on this topic, immediate or drained from the queue.
    pub published: u64,
    /// Handler invocations that returned an error or panicked.
    pub failures: u64,
}

/// Topic → counters table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Statistics {
    topics: BTreeMap<String, TopicStats>,
}

impl Statistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_publish(&mut self, topic: &str) {
        self.entry(topic).published += 1;
    }

    pub fn record_failure(&mut self, topic: &str) {
        self.entry(topic).failures += 1;
    }

    /// Publish count for `topic`; zero if never published.
    pub fn published(&self, topic: &str) -> u64 {
        self.topics.get(topic).map_or(0, |s| s.published)
    }

    pub fn failures(&self, topic: &str) -> u64 {
        self.topics.get(topic).map_or(0, |s| s.failures)
    }

    pub fn get(&self, topic: &str) -> Option<&TopicStats> {
        self.topics.get(topic)
    }

    pub fn total_published(&self) -> u64 {
        self.topics.values().map(|s| s.published).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.topics.values().map(|s| s.failures).sum()
    }

    /// Iterates topics in lexical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &TopicStats)> + '_ {
        self.topics.iter().map(|(topic, stats)| (topic.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    pub fn clear(&mut self) {
        self.topics.clear();
    }

    fn entry(&mut self, topic: &str) -> &mut TopicStats {
        self.topics.entry(topic.to_owned()).or_default()
    }
}
