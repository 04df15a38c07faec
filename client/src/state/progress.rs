//! Learned-topic tracking.

#[cfg(test)]
#[path = "progress_test.rs"]
mod progress_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Topics marked as learned, grouped by subject in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    subjects: BTreeMap<String, Vec<String>>,
}

impl Progress {
    /// Record `topic` under `subject`. Returns `false` if it was already recorded.
    pub fn mark_learned(&mut self, subject: &str, topic: &str) -> bool {
        let subject = subject.trim();
        let topic = topic.trim();
        if subject.is_empty() || topic.is_empty() {
            return false;
        }
        let topics = self.subjects.entry(subject.to_owned()).or_default();
        if topics.iter().any(|t| t == topic) {
            return false;
        }
        topics.push(topic.to_owned());
        true
    }

    pub fn is_learned(&self, subject: &str, topic: &str) -> bool {
        self.topics(subject).iter().any(|t| t == topic.trim())
    }

    pub fn topics(&self, subject: &str) -> &[String] {
        self.subjects.get(subject.trim()).map_or(&[][..], Vec::as_slice)
    }

    /// Subjects with at least one learned topic, alphabetically.
    pub fn subjects(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.subjects.iter().map(|(subject, topics)| (subject.as_str(), topics.as_slice()))
    }

    pub fn total(&self) -> usize {
        self.subjects.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
