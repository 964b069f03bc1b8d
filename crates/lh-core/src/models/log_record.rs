//! Analyzed security-log record, the unit every aggregate is computed from.

use crate::ThreatStatus;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single analyzed log entry, scoped to exactly one tenant.
///
/// `attack_type = None` means the classifier saw no attack in this entry.
/// `probability` is a 0-100 score; records without one are excluded from
/// risk histograms rather than counted as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub tenant_id: String,
    pub ip: Option<String>,
    pub log_text: Option<String>,
    pub source: Option<String>,
    pub attack_type: Option<String>,
    pub mitre_id: Option<String>,
    pub probability: Option<f64>,
    pub recommendation: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub severity_windows: Option<String>,
    pub severity_syslog: Option<String>,
    /// Time the logged event occurred (as opposed to ingestion time).
    pub timestamp: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub status: ThreatStatus,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl LogRecord {
    /// Create a fresh, unresolved record for ingestion.
    pub fn new(tenant_id: impl Into<String>, log_text: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: 0,
            tenant_id: tenant_id.into(),
            ip: None,
            log_text: Some(log_text.into()),
            source: None,
            attack_type: None,
            mitre_id: None,
            probability: None,
            recommendation: None,
            country: None,
            city: None,
            severity_windows: None,
            severity_syslog: None,
            timestamp: Some(now),
            created_at: now,
            status: ThreatStatus::Active,
            resolved_by: None,
            resolved_at: None,
        }
    }

    /// An attack was detected in this entry.
    pub fn is_attack(&self) -> bool {
        self.attack_type.is_some()
    }

    pub fn is_resolved(&self) -> bool {
        self.status == ThreatStatus::Blocked
    }
}
