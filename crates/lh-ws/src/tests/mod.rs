mod aggregates;
mod topic;

use chrono::{Duration, Utc};
use lh_core::LogRecord;

/// Benign record with an event timestamp offset in seconds from now.
pub(crate) fn record(tenant_id: &str, offset_secs: i64) -> LogRecord {
    let mut record = LogRecord::new(tenant_id, "Accepted password for ops");
    record.source = Some("syslog".to_string());
    record.timestamp = Some(Utc::now() + Duration::seconds(offset_secs));
    record
}

/// Attack record with classifier output filled in.
pub(crate) fn attack(tenant_id: &str, attack_type: &str, probability: f64) -> LogRecord {
    let mut record = record(tenant_id, 0);
    record.log_text = Some(format!("{attack_type} attempt from 203.0.113.7"));
    record.ip = Some("203.0.113.7".to_string());
    record.attack_type = Some(attack_type.to_string());
    record.mitre_id = Some("T1110".to_string());
    record.probability = Some(probability);
    record
}
