#![allow(dead_code)]

use crate::common::jwt_helper::create_test_token;

use lh_auth::JwtValidator;
use lh_db::{LogRepository, UserRepository, connect_in_memory};
use lh_geo::DisabledGeoResolver;
use lh_server::{ApiState, build_router};
use lh_ws::{
    AppState, BroadcastDispatcher, BroadcastQueue, ConnectionConfig, ConnectionRegistry, Metrics,
    ShutdownCoordinator, Topic, spawn_consumer,
};

use std::sync::Arc;
use std::time::Duration;

use axum_test::{TestServer, TestWebSocket};

/// Default JWT secret for all tests (HS256 requires at least 32 bytes)
pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-server-tests-min-32-bytes-long";

/// Full server harness: REST trigger endpoints wired to the broadcast
/// engine exactly as in main.
pub struct TestHarness {
    pub server: TestServer,
    pub ws_state: AppState,
    pub logs: Arc<LogRepository>,
    pub users: Arc<UserRepository>,
}

impl TestHarness {
    pub async fn seed_user(&self, username: &str, tenant_id: &str) {
        self.users.insert(username, tenant_id).await.unwrap();
    }

    pub fn token_for(&self, tenant_id: &str, user_id: &str) -> String {
        create_test_token(tenant_id, user_id, TEST_JWT_SECRET)
    }

    /// Connect an admitted WebSocket client on a topic
    pub async fn connect(&self, topic: Topic, tenant_id: &str, user_id: &str) -> TestWebSocket {
        let token = self.token_for(tenant_id, user_id);
        self.server
            .get_websocket(&format!("/ws/{}", topic.as_str()))
            .add_query_param("token", &token)
            .await
            .into_websocket()
            .await
    }

    /// Registration happens in the connection task after the upgrade
    /// completes, so assertions poll for the expected partition size.
    pub async fn wait_for_partition(&self, tenant_id: &str, topic: Topic, expected: usize) {
        for _ in 0..200 {
            if self.ws_state.registry.count(tenant_id, topic).await == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!(
            "Partition {tenant_id}/{topic} never reached {expected} connections (now {})",
            self.ws_state.registry.count(tenant_id, topic).await
        );
    }
}

pub async fn create_harness() -> TestHarness {
    let pool = connect_in_memory().await.expect("Failed to create test pool");
    let logs = Arc::new(LogRepository::new(pool.clone()));
    let users = Arc::new(UserRepository::new(pool));

    let jwt_validator = Arc::new(JwtValidator::with_hs256(TEST_JWT_SECRET));
    let registry = ConnectionRegistry::new();
    let metrics = Metrics::new();
    let shutdown = ShutdownCoordinator::new();

    let ws_state = AppState {
        jwt_validator: Arc::clone(&jwt_validator),
        users: Arc::clone(&users),
        registry: registry.clone(),
        metrics: metrics.clone(),
        shutdown,
        config: ConnectionConfig::default(),
    };

    let dispatcher = BroadcastDispatcher::new(
        registry,
        Arc::clone(&logs),
        Arc::clone(&users),
        Arc::new(DisabledGeoResolver),
        metrics,
    );
    let (queue, queue_rx) = BroadcastQueue::new();
    spawn_consumer(dispatcher, queue_rx);

    let api_state = ApiState {
        jwt_validator,
        logs: Arc::clone(&logs),
        users: Arc::clone(&users),
        queue,
    };

    let server = TestServer::builder()
        .http_transport()
        .build(build_router(ws_state.clone(), api_state))
        .expect("Failed to create test server");

    TestHarness {
        server,
        ws_state,
        logs,
        users,
    }
}
