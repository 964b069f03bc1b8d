//! User registration endpoint. Open by necessity: the first principal
//! of a tenant cannot present a token yet. A new user refreshes the
//! dashboard's user count.

use crate::ApiError;
use crate::api::ApiState;
use crate::api::error::Result as ApiResult;

use lh_ws::{BroadcastEvent, Topic};

use std::panic::Location;

use axum::Json;
use axum::extract::State;
use error_location::ErrorLocation;
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub tenant_id: String,
}

#[derive(Debug, Serialize)]
pub struct CreateUserResponse {
    pub id: i64,
    pub username: String,
    pub tenant_id: String,
}

/// POST /api/users
pub async fn create_user(
    State(state): State<ApiState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<Json<CreateUserResponse>> {
    if request.username.is_empty() || request.tenant_id.is_empty() {
        return Err(ApiError::Validation {
            message: "username and tenant_id must be non-empty".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    if state.users.find_tenant(&request.username).await?.is_some() {
        return Err(ApiError::Validation {
            message: format!("Username {} is already taken", request.username),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let id = state
        .users
        .insert(&request.username, &request.tenant_id)
        .await?;

    info!(
        "Created user {} in tenant {}",
        request.username, request.tenant_id
    );

    state.queue.publish(BroadcastEvent::for_topics(
        &request.tenant_id,
        &[Topic::Dashboard],
    ));

    Ok(Json(CreateUserResponse {
        id,
        username: request.username,
        tenant_id: request.tenant_id,
    }))
}
