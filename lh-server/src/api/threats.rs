//! Threat resolution endpoint. Marking a record blocked refreshes the
//! threats feed and the dashboard counters.

use crate::api::error::Result as ApiResult;
use crate::api::{ApiState, auth::authenticate};
use crate::ApiError;

use lh_ws::{BroadcastEvent, Topic};

use std::panic::Location;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use chrono::Utc;
use error_location::ErrorLocation;
use log::info;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ResolveThreatResponse {
    pub id: i64,
    pub status: String,
}

/// POST /api/threats/{id}/resolve
pub async fn resolve_threat(
    State(state): State<ApiState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> ApiResult<Json<ResolveThreatResponse>> {
    let context = authenticate(&state, &headers).await?;

    let resolved = state
        .logs
        .resolve(&context.tenant_id, id, &context.user_id, Utc::now())
        .await?;

    if !resolved {
        return Err(ApiError::NotFound {
            message: format!("Active threat {} not found", id),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    info!(
        "Threat {id} resolved by {} (tenant {})",
        context.user_id, context.tenant_id
    );

    state.queue.publish(BroadcastEvent::for_topics(
        &context.tenant_id,
        &[Topic::Threats, Topic::Dashboard],
    ));

    Ok(Json(ResolveThreatResponse {
        id,
        status: "blocked".to_string(),
    }))
}
