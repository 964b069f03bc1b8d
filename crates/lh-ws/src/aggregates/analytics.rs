use std::collections::{BTreeMap, HashMap};

use chrono::Timelike;
use lh_core::{LogRecord, RiskTier};
use lh_geo::{GeoInfo, GeoResolver};
use serde::{Deserialize, Serialize};

use crate::extract_ips;

/// How many MITRE techniques the analytics histogram carries
pub const MITRE_HISTOGRAM_LIMIT: usize = 5;
/// Hourly buckets in the activity series
pub const ACTIVITY_BUCKETS: usize = 24;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeverityHistograms {
    pub windows: BTreeMap<String, u64>,
    pub syslog: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskLevels {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    pub activity: Vec<u64>,
    pub geo: Vec<GeoInfo>,
    pub severity: SeverityHistograms,
    pub attack_types: BTreeMap<String, u64>,
    pub risk_levels: RiskLevels,
    pub mitre_data: BTreeMap<String, u64>,
}

impl AnalyticsSnapshot {
    /// Builds the full analytics rollup. A failed geo lookup degrades
    /// that IP's entry to placeholders and never aborts the build.
    pub async fn build(records: &[LogRecord], geo_resolver: &dyn GeoResolver) -> Self {
        let mut activity = vec![0u64; ACTIVITY_BUCKETS];
        let mut severity = SeverityHistograms::default();
        let mut attack_types: BTreeMap<String, u64> = BTreeMap::new();
        let mut risk_levels = RiskLevels::default();
        let mut mitre_counts: BTreeMap<String, u64> = BTreeMap::new();
        let mut geo: Vec<GeoInfo> = Vec::new();
        let mut resolved: HashMap<String, GeoInfo> = HashMap::new();

        for record in records {
            // Hour-of-day rollup over the tenant's full history
            let effective_ts = record.timestamp.unwrap_or(record.created_at);
            activity[effective_ts.hour() as usize] += 1;

            if let Some(level) = record.severity_windows.as_deref() {
                *severity.windows.entry(level.to_string()).or_insert(0) += 1;
            }
            if let Some(level) = record.severity_syslog.as_deref() {
                *severity.syslog.entry(level.to_string()).or_insert(0) += 1;
            }

            if let Some(attack_type) = record.attack_type.as_deref() {
                *attack_types.entry(attack_type.to_string()).or_insert(0) += 1;
            }
            if let Some(mitre_id) = record.mitre_id.as_deref() {
                *mitre_counts.entry(mitre_id.to_string()).or_insert(0) += 1;
            }

            // Records the classifier never scored carry no risk tier
            if let Some(probability) = record.probability {
                match RiskTier::classify(probability) {
                    RiskTier::Low => risk_levels.low += 1,
                    RiskTier::Medium => risk_levels.medium += 1,
                    RiskTier::High => risk_levels.high += 1,
                }
            }

            // One entry per (record, IP); an IP shared across records
            // appears once per record, resolved only once per build
            for ip in extract_ips(record) {
                let info = match resolved.get(&ip) {
                    Some(info) => info.clone(),
                    None => {
                        let info = geo_resolver.resolve_or_unknown(&ip).await;
                        resolved.insert(ip, info.clone());
                        info
                    }
                };
                geo.push(info);
            }
        }

        let mitre_data = top_n(mitre_counts, MITRE_HISTOGRAM_LIMIT);

        Self {
            activity,
            geo,
            severity,
            attack_types,
            risk_levels,
            mitre_data,
        }
    }
}

/// Keeps the n highest-count entries, breaking ties by key order.
fn top_n(counts: BTreeMap<String, u64>, n: usize) -> BTreeMap<String, u64> {
    let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.into_iter().take(n).collect()
}
