pub mod aggregates;
pub mod app_state;
pub mod broadcast_dispatcher;
pub mod broadcast_queue;
pub mod connection_config;
pub mod connection_id;
pub mod connection_registry;
pub mod envelope;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod shutdown_coordinator;
pub mod shutdown_guard;
pub mod topic;
pub mod topic_connection;

pub use aggregates::analytics::{AnalyticsSnapshot, RiskLevels, SeverityHistograms};
pub use aggregates::dashboard::{DashboardSnapshot, DashboardStats, MitreCount, NamedCount};
pub use aggregates::ip_extract::extract_ips;
pub use aggregates::threats::{THREAT_FEED_LIMIT, ThreatsSnapshot};
pub use app_state::AppState;
pub use broadcast_dispatcher::BroadcastDispatcher;
pub use broadcast_queue::{BroadcastEvent, BroadcastQueue, spawn_consumer};
pub use connection_config::ConnectionConfig;
pub use connection_id::ConnectionId;
pub use connection_registry::ConnectionRegistry;
pub use envelope::{HEARTBEAT_FRAME, UpdateEnvelope};
pub use error::{Result, WsError};
pub use handlers::{analytics_handler, dashboard_handler, threats_handler};
pub use metrics::Metrics;
pub use shutdown_coordinator::ShutdownCoordinator;
pub use shutdown_guard::ShutdownGuard;
pub use topic::Topic;
pub use topic_connection::TopicConnection;

#[cfg(test)]
mod tests;
