use metrics::{counter, gauge, histogram};

use crate::Topic;

/// Metrics collector for broadcast and connection activity
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    pub fn new() -> Self {
        Self { prefix: "lh_ws" }
    }

    /// Record new connection established
    pub fn connection_established(&self, topic: Topic) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        counter!(format!("{}.connections.established.{}", self.prefix, topic)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record connection closed
    pub fn connection_closed(&self, topic: Topic, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}.{}", self.prefix, topic, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Record admission refused before registration
    pub fn admission_refused(&self, reason: &str) {
        counter!(format!("{}.admission.refused", self.prefix)).increment(1);
        counter!(format!("{}.admission.refused.{}", self.prefix, reason)).increment(1);
    }

    /// Record a snapshot computed for a topic
    pub fn snapshot_computed(&self, topic: Topic, duration: std::time::Duration) {
        counter!(format!("{}.snapshots.computed.{}", self.prefix, topic)).increment(1);
        histogram!(format!("{}.snapshots.build_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }

    /// Record envelopes delivered in one broadcast cycle
    pub fn envelopes_sent(&self, topic: Topic, count: usize) {
        counter!(format!("{}.envelopes.sent.{}", self.prefix, topic)).increment(count as u64);
    }

    /// Record a subscriber pruned after a failed send
    pub fn send_failure(&self, topic: Topic) {
        counter!(format!("{}.envelopes.send_failures.{}", self.prefix, topic)).increment(1);
    }

    /// Record error occurrence
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
