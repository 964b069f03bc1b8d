use crate::{ConnectionConfig, ConnectionRegistry, Metrics, ShutdownCoordinator};

use lh_auth::JwtValidator;
use lh_db::UserRepository;

use std::sync::Arc;

/// Shared application state for the WebSocket endpoints
#[derive(Clone)]
pub struct AppState {
    pub jwt_validator: Arc<JwtValidator>,
    pub users: Arc<UserRepository>,
    pub registry: ConnectionRegistry,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}
