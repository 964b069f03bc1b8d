use std::collections::HashMap;

use lh_core::{HIGH_RISK_THRESHOLD, LogRecord};
use serde::{Deserialize, Serialize};

/// How many of the newest records the dashboard preview carries
pub const RECENT_LOG_LIMIT: usize = 5;
/// How many attack types the top-attacks list carries
pub const TOP_ATTACK_LIMIT: usize = 3;
/// How many MITRE techniques the dashboard histogram carries
pub const TOP_MITRE_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitreCount {
    pub mitre_id: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_logs: u64,
    pub total_analyzed: u64,
    pub attacks_detected: u64,
    pub high_risk_attacks: u64,
    pub attack_types: Vec<NamedCount>,
    pub top_mitre_ids: Vec<MitreCount>,
    pub top_3_attacks: Vec<NamedCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    #[serde(rename = "userCount")]
    pub user_count: i64,
    #[serde(rename = "recentLogs")]
    pub recent_logs: Vec<LogRecord>,
}

impl DashboardSnapshot {
    /// `records` must already be ordered newest first.
    pub fn build(records: &[LogRecord], user_count: i64) -> Self {
        let total_logs = records.len() as u64;
        let total_analyzed = records.iter().filter(|r| r.probability.is_some()).count() as u64;
        let attacks_detected = records.iter().filter(|r| r.is_attack()).count() as u64;
        let high_risk_attacks = records
            .iter()
            .filter(|r| r.is_attack() && r.probability.is_some_and(|p| p >= HIGH_RISK_THRESHOLD))
            .count() as u64;

        let mut attack_counts: HashMap<&str, u64> = HashMap::new();
        let mut mitre_counts: HashMap<&str, u64> = HashMap::new();
        for record in records {
            if let Some(attack_type) = record.attack_type.as_deref() {
                *attack_counts.entry(attack_type).or_insert(0) += 1;
            }
            if let Some(mitre_id) = record.mitre_id.as_deref() {
                *mitre_counts.entry(mitre_id).or_insert(0) += 1;
            }
        }

        let attack_types: Vec<NamedCount> = sorted_descending(attack_counts)
            .into_iter()
            .map(|(name, count)| NamedCount {
                name: name.to_string(),
                count,
            })
            .collect();
        let top_3_attacks = attack_types.iter().take(TOP_ATTACK_LIMIT).cloned().collect();

        let top_mitre_ids: Vec<MitreCount> = sorted_descending(mitre_counts)
            .into_iter()
            .take(TOP_MITRE_LIMIT)
            .map(|(mitre_id, count)| MitreCount {
                mitre_id: mitre_id.to_string(),
                count,
            })
            .collect();

        Self {
            stats: DashboardStats {
                total_logs,
                total_analyzed,
                attacks_detected,
                high_risk_attacks,
                attack_types,
                top_mitre_ids,
                top_3_attacks,
            },
            user_count,
            recent_logs: records.iter().take(RECENT_LOG_LIMIT).cloned().collect(),
        }
    }
}

/// Sorts histogram entries by count descending, then name ascending
/// for a deterministic order among ties.
fn sorted_descending(counts: HashMap<&str, u64>) -> Vec<(&str, u64)> {
    let mut entries: Vec<(&str, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
