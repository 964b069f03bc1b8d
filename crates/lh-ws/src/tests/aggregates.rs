use crate::tests::{attack, record};
use crate::{AnalyticsSnapshot, DashboardSnapshot, THREAT_FEED_LIMIT, ThreatsSnapshot};

use chrono::Timelike;
use lh_geo::DisabledGeoResolver;

#[test]
fn given_mixed_records_when_dashboard_built_then_counters_correct() {
    let records = vec![
        attack("acme", "Brute Force", 85.0),
        attack("acme", "Brute Force", 40.0),
        attack("acme", "SQL Injection", 92.0),
        record("acme", -10),
        record("acme", -20),
    ];

    let snapshot = DashboardSnapshot::build(&records, 7);

    assert_eq!(snapshot.stats.total_logs, 5);
    assert_eq!(snapshot.stats.total_analyzed, 3);
    assert_eq!(snapshot.stats.attacks_detected, 3);
    assert_eq!(snapshot.stats.high_risk_attacks, 2);
    assert_eq!(snapshot.user_count, 7);
}

#[test]
fn given_attack_histogram_when_built_then_descending_with_deterministic_ties() {
    let records = vec![
        attack("acme", "Brute Force", 85.0),
        attack("acme", "Brute Force", 40.0),
        attack("acme", "XSS", 55.0),
        attack("acme", "SQL Injection", 92.0),
    ];

    let snapshot = DashboardSnapshot::build(&records, 0);
    let names: Vec<&str> = snapshot
        .stats
        .attack_types
        .iter()
        .map(|e| e.name.as_str())
        .collect();

    assert_eq!(names, vec!["Brute Force", "SQL Injection", "XSS"]);
    assert_eq!(snapshot.stats.attack_types[0].count, 2);
    assert_eq!(snapshot.stats.top_3_attacks.len(), 3);
}

#[test]
fn given_risk_boundaries_when_dashboard_built_then_only_seventy_and_above_high_risk() {
    let records = vec![
        attack("acme", "A", 29.0),
        attack("acme", "B", 30.0),
        attack("acme", "C", 69.0),
        attack("acme", "D", 70.0),
    ];

    let snapshot = DashboardSnapshot::build(&records, 0);

    assert_eq!(snapshot.stats.high_risk_attacks, 1);
}

#[test]
fn given_many_records_when_dashboard_built_then_recent_preview_capped_at_five() {
    let records: Vec<_> = (0..8).map(|i| record("acme", -i)).collect();

    let snapshot = DashboardSnapshot::build(&records, 0);

    assert_eq!(snapshot.recent_logs.len(), 5);
    // Newest-first input order is preserved
    assert_eq!(
        snapshot.recent_logs[0].timestamp,
        records[0].timestamp
    );
}

#[test]
fn given_more_than_fifty_records_when_threats_built_then_feed_capped() {
    let records: Vec<_> = (0..60).map(|i| record("acme", -i)).collect();

    let snapshot = ThreatsSnapshot::build(&records);

    assert_eq!(snapshot.threats.len(), THREAT_FEED_LIMIT);
    assert_eq!(snapshot.threats[0].timestamp, records[0].timestamp);
}

#[tokio::test]
async fn given_severity_fields_when_analytics_built_then_histograms_keyed_by_level() {
    let mut r1 = record("acme", 0);
    r1.severity_windows = Some("Error".to_string());
    r1.severity_syslog = Some("crit".to_string());
    let mut r2 = record("acme", -5);
    r2.severity_windows = Some("Error".to_string());

    let snapshot = AnalyticsSnapshot::build(&[r1, r2], &DisabledGeoResolver).await;

    assert_eq!(snapshot.severity.windows.get("Error"), Some(&2));
    assert_eq!(snapshot.severity.syslog.get("crit"), Some(&1));
}

#[tokio::test]
async fn given_unscored_records_when_analytics_built_then_excluded_from_risk_histogram() {
    let records = vec![
        attack("acme", "A", 10.0),
        attack("acme", "B", 50.0),
        attack("acme", "C", 90.0),
        record("acme", 0), // no probability
    ];

    let snapshot = AnalyticsSnapshot::build(&records, &DisabledGeoResolver).await;

    assert_eq!(snapshot.risk_levels.low, 1);
    assert_eq!(snapshot.risk_levels.medium, 1);
    assert_eq!(snapshot.risk_levels.high, 1);
}

#[tokio::test]
async fn given_six_mitre_ids_when_analytics_built_then_histogram_capped_at_five() {
    let mut records = Vec::new();
    for (i, mitre) in ["T1110", "T1059", "T1021", "T1078", "T1190", "T1566"]
        .iter()
        .enumerate()
    {
        let mut r = attack("acme", "Brute Force", 50.0);
        r.mitre_id = Some(mitre.to_string());
        // Distinct counts make the cut deterministic
        for _ in 0..i {
            records.push(r.clone());
        }
        records.push(r);
    }

    let snapshot = AnalyticsSnapshot::build(&records, &DisabledGeoResolver).await;

    assert_eq!(snapshot.mitre_data.len(), 5);
    // The single-occurrence technique is the one cut
    assert!(!snapshot.mitre_data.contains_key("T1110"));
}

#[tokio::test]
async fn given_recent_record_when_analytics_built_then_counted_in_its_hour_bucket() {
    let r = record("acme", 0);
    let hour = r.timestamp.unwrap().hour() as usize;

    let snapshot = AnalyticsSnapshot::build(&[r], &DisabledGeoResolver).await;

    assert_eq!(snapshot.activity.len(), 24);
    assert_eq!(snapshot.activity[hour], 1);
    assert_eq!(snapshot.activity.iter().sum::<u64>(), 1);
}

#[tokio::test]
async fn given_record_older_than_a_day_when_analytics_built_then_still_in_activity_series() {
    // The rollup covers the tenant's full history, not a sliding window
    let r = record("acme", -30 * 3600);
    let hour = r.timestamp.unwrap().hour() as usize;

    let snapshot = AnalyticsSnapshot::build(&[r], &DisabledGeoResolver).await;

    assert_eq!(snapshot.activity[hour], 1);
    assert_eq!(snapshot.activity.iter().sum::<u64>(), 1);
}

#[tokio::test]
async fn given_disabled_geo_when_analytics_built_then_entries_degrade_to_unknown() {
    let records = vec![
        attack("acme", "Brute Force", 85.0),
        attack("acme", "SQL Injection", 90.0), // same IP as above
    ];

    let snapshot = AnalyticsSnapshot::build(&records, &DisabledGeoResolver).await;

    // One entry per (record, IP), degraded rather than dropped
    assert_eq!(snapshot.geo.len(), 2);
    for entry in &snapshot.geo {
        assert_eq!(entry.ip, "203.0.113.7");
        assert_eq!(entry.country, "Unknown");
        assert_eq!(entry.city, "\u{2014}");
        assert_eq!(entry.lat, None);
    }
}

#[tokio::test]
async fn given_ip_shared_across_records_when_analytics_built_then_one_geo_entry_per_record() {
    let mut solo = record("acme", -60);
    solo.ip = Some("198.51.100.9".to_string());
    let records = vec![
        attack("acme", "Brute Force", 85.0),
        attack("acme", "Brute Force", 40.0), // same IP, second record
        solo,
    ];

    let snapshot = AnalyticsSnapshot::build(&records, &DisabledGeoResolver).await;

    let shared = snapshot.geo.iter().filter(|e| e.ip == "203.0.113.7").count();
    let lone = snapshot.geo.iter().filter(|e| e.ip == "198.51.100.9").count();
    assert_eq!(shared, 2);
    assert_eq!(lone, 1);
    assert_eq!(snapshot.geo.len(), 3);
}
