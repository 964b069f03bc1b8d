use serde::{Deserialize, Serialize};

use crate::{AnalyticsSnapshot, DashboardSnapshot, ThreatsSnapshot, Topic};

/// Heartbeat frame emitted on the liveness interval. Clients are not
/// required to reply.
pub const HEARTBEAT_FRAME: &str = r#"{"type":"ping"}"#;

/// Tagged wire envelope for topic updates. The `type` field carries
/// the topic discriminator; the payload fields sit beside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum UpdateEnvelope {
    #[serde(rename = "dashboard_update")]
    Dashboard(DashboardSnapshot),
    #[serde(rename = "threats_update")]
    Threats(ThreatsSnapshot),
    #[serde(rename = "analytics_update")]
    Analytics(AnalyticsSnapshot),
}

impl UpdateEnvelope {
    pub fn topic(&self) -> Topic {
        match self {
            UpdateEnvelope::Dashboard(_) => Topic::Dashboard,
            UpdateEnvelope::Threats(_) => Topic::Threats,
            UpdateEnvelope::Analytics(_) => Topic::Analytics,
        }
    }
}
