use lh_core::LogRecord;
use serde::{Deserialize, Serialize};

/// How many of the newest records the threats feed carries
pub const THREAT_FEED_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreatsSnapshot {
    pub threats: Vec<LogRecord>,
}

impl ThreatsSnapshot {
    /// `records` must already be ordered newest first.
    pub fn build(records: &[LogRecord]) -> Self {
        Self {
            threats: records.iter().take(THREAT_FEED_LIMIT).cloned().collect(),
        }
    }
}
