pub mod auth;
pub mod error;
pub mod logs;
pub mod threats;
pub mod users;

use lh_auth::JwtValidator;
use lh_db::{LogRepository, UserRepository};
use lh_ws::BroadcastQueue;

use std::sync::Arc;

/// Shared state for the trigger API endpoints
#[derive(Clone)]
pub struct ApiState {
    pub jwt_validator: Arc<JwtValidator>,
    pub logs: Arc<LogRepository>,
    pub users: Arc<UserRepository>,
    pub queue: BroadcastQueue,
}
