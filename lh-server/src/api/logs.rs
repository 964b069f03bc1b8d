//! Log ingestion endpoint. A committed record triggers broadcasts on
//! all three topics for the caller's tenant.

use crate::api::{ApiState, auth::authenticate};
use crate::api::error::Result as ApiResult;

use lh_core::LogRecord;
use lh_ws::BroadcastEvent;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct CreateLogRequest {
    pub log_text: Option<String>,
    pub ip: Option<String>,
    pub source: Option<String>,
    pub attack_type: Option<String>,
    pub mitre_id: Option<String>,
    pub probability: Option<f64>,
    pub recommendation: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub severity_windows: Option<String>,
    pub severity_syslog: Option<String>,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct CreateLogResponse {
    pub id: i64,
}

/// POST /api/logs
pub async fn create_log(
    State(state): State<ApiState>,
    headers: HeaderMap,
    Json(request): Json<CreateLogRequest>,
) -> ApiResult<Json<CreateLogResponse>> {
    let context = authenticate(&state, &headers).await?;

    let mut record = LogRecord::new(&context.tenant_id, "");
    record.log_text = request.log_text;
    record.ip = request.ip;
    record.source = request.source;
    record.attack_type = request.attack_type;
    record.mitre_id = request.mitre_id;
    record.probability = request.probability;
    record.recommendation = request.recommendation;
    record.country = request.country;
    record.city = request.city;
    record.severity_windows = request.severity_windows;
    record.severity_syslog = request.severity_syslog;
    if request.timestamp.is_some() {
        record.timestamp = request.timestamp;
    }

    let id = state.logs.insert(&record).await?;

    info!(
        "Ingested log record {id} for tenant {} (attack: {})",
        context.tenant_id,
        record.attack_type.as_deref().unwrap_or("none")
    );

    // Commit first, then wake the broadcast engine
    state
        .queue
        .publish(BroadcastEvent::all_topics(&context.tenant_id));

    Ok(Json(CreateLogResponse { id }))
}
