#![allow(dead_code)]

use crate::common::jwt_helper::create_test_token;

use lh_auth::JwtValidator;
use lh_db::{LogRepository, UserRepository, connect_in_memory};
use lh_geo::DisabledGeoResolver;
use lh_ws::{
    AppState, BroadcastDispatcher, ConnectionConfig, ConnectionRegistry, Metrics,
    ShutdownCoordinator, Topic, analytics_handler, dashboard_handler, threats_handler,
};

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::{TestServer, TestWebSocket};

/// Default JWT secret for all tests (HS256 requires at least 32 bytes)
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";

/// Test server with access to engine internals for assertions
pub struct TestHarness {
    pub server: TestServer,
    pub state: AppState,
    pub dispatcher: BroadcastDispatcher,
    pub logs: Arc<LogRepository>,
    pub users: Arc<UserRepository>,
}

impl TestHarness {
    /// Seed a principal so admission lets it in
    pub async fn seed_user(&self, username: &str, tenant_id: &str) {
        self.users.insert(username, tenant_id).await.unwrap();
    }

    /// Connect an admitted WebSocket client on a topic
    pub async fn connect(&self, topic: Topic, tenant_id: &str, user_id: &str) -> TestWebSocket {
        let token = create_test_token(tenant_id, user_id, TEST_JWT_SECRET);
        self.connect_with_token(topic, &token).await
    }

    /// Connect with an explicit (possibly bad) token
    pub async fn connect_with_token(&self, topic: Topic, token: &str) -> TestWebSocket {
        self.server
            .get_websocket(&format!("/ws/{}", topic.as_str()))
            .add_query_param("token", token)
            .await
            .into_websocket()
            .await
    }

    /// Connect without any token at all
    pub async fn connect_without_token(&self, topic: Topic) -> TestWebSocket {
        self.server
            .get_websocket(&format!("/ws/{}", topic.as_str()))
            .await
            .into_websocket()
            .await
    }

    /// Registration happens in the connection task after the upgrade
    /// completes, so assertions poll for the expected partition size.
    pub async fn wait_for_partition(&self, tenant_id: &str, topic: Topic, expected: usize) {
        for _ in 0..200 {
            if self.state.registry.count(tenant_id, topic).await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "Partition {tenant_id}/{topic} never reached {expected} connections (now {})",
            self.state.registry.count(tenant_id, topic).await
        );
    }
}

/// Create a test harness with default connection config
pub async fn create_harness() -> TestHarness {
    create_harness_with_config(ConnectionConfig::default()).await
}

/// Create a test harness with custom connection config
pub async fn create_harness_with_config(config: ConnectionConfig) -> TestHarness {
    let pool = connect_in_memory().await.expect("Failed to create test pool");
    let logs = Arc::new(LogRepository::new(pool.clone()));
    let users = Arc::new(UserRepository::new(pool));

    let registry = ConnectionRegistry::new();
    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();

    let state = AppState {
        jwt_validator: Arc::new(JwtValidator::with_hs256(TEST_JWT_SECRET)),
        users: Arc::clone(&users),
        registry: registry.clone(),
        metrics: metrics.clone(),
        shutdown,
        config,
    };

    let dispatcher = BroadcastDispatcher::new(
        registry,
        Arc::clone(&logs),
        Arc::clone(&users),
        Arc::new(DisabledGeoResolver),
        metrics,
    );

    let router = Router::new()
        .route("/ws/dashboard", get(dashboard_handler))
        .route("/ws/threats", get(threats_handler))
        .route("/ws/analytics", get(analytics_handler))
        .with_state(state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(router)
        .expect("Failed to create test server");

    TestHarness {
        server,
        state,
        dispatcher,
        logs,
        users,
    }
}
