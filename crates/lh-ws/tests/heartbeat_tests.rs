mod common;

use common::create_harness_with_config;

use lh_ws::{ConnectionConfig, Topic};

use serde_json::Value;
use std::time::Duration;

#[tokio::test]
async fn given_idle_connection_when_interval_elapses_then_ping_frames_arrive() {
    let harness = create_harness_with_config(ConnectionConfig {
        send_buffer_size: 16,
        heartbeat_interval_secs: 1,
    })
    .await;
    harness.seed_user("alice", "acme").await;

    let mut ws = harness.connect(Topic::Dashboard, "acme", "alice").await;
    harness.wait_for_partition("acme", Topic::Dashboard, 1).await;

    for _ in 0..2 {
        let text = tokio::time::timeout(Duration::from_secs(3), ws.receive_text())
            .await
            .expect("No heartbeat before timeout");
        let json: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["type"], "ping");
    }
}

#[tokio::test]
async fn given_broadcasts_and_heartbeats_when_interleaved_then_connection_survives() {
    let harness = create_harness_with_config(ConnectionConfig {
        send_buffer_size: 16,
        heartbeat_interval_secs: 1,
    })
    .await;
    harness.seed_user("alice", "acme").await;

    let mut ws = harness.connect(Topic::Threats, "acme", "alice").await;
    harness.wait_for_partition("acme", Topic::Threats, 1).await;

    harness.dispatcher.broadcast("acme", Topic::Threats).await;

    // Expect both frame kinds within a few intervals
    let mut saw_ping = false;
    let mut saw_update = false;
    for _ in 0..6 {
        let text = tokio::time::timeout(Duration::from_secs(3), ws.receive_text())
            .await
            .expect("Socket went silent");
        let json: Value = serde_json::from_str(&text).unwrap();
        match json["type"].as_str() {
            Some("ping") => saw_ping = true,
            Some("threats_update") => saw_update = true,
            other => panic!("Unexpected frame type: {other:?}"),
        }
        if saw_ping && saw_update {
            break;
        }
    }

    assert!(saw_ping && saw_update);
    assert_eq!(harness.state.registry.count("acme", Topic::Threats).await, 1);
}
