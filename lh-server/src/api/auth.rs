//! Bearer-token authentication for the trigger API endpoints.
//!
//! The same JWT that admits a WebSocket client authorizes API calls;
//! here it arrives as `Authorization: Bearer <token>` and a failure is
//! an HTTP 401 rather than a close frame.

use crate::api::ApiState;
use crate::{ApiError, ApiResult};

use lh_auth::TenantContext;

use std::panic::Location;

use axum::http::HeaderMap;
use error_location::ErrorLocation;
use log::warn;

pub async fn authenticate(state: &ApiState, headers: &HeaderMap) -> ApiResult<TenantContext> {
    let auth_header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized {
            message: "Missing Authorization header".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized {
            message: "Invalid authorization scheme: expected 'Bearer'".to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

    let claims = state.jwt_validator.validate(token).map_err(|e| {
        warn!("API token rejected: {e}");
        ApiError::Unauthorized {
            message: "Invalid token".to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    })?;

    let context = TenantContext::from_claims(claims);

    let known = state
        .users
        .exists_in_tenant(&context.user_id, &context.tenant_id)
        .await?;
    if !known {
        warn!(
            "API token rejected: unknown principal {} in tenant {}",
            context.user_id, context.tenant_id
        );
        return Err(ApiError::Unauthorized {
            message: "Unknown principal".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(context)
}
