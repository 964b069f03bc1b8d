//! WebSocket endpoint handlers.
//!
//! Admission runs inside the upgrade callback so a refusal can be
//! delivered as a proper close frame (1008 policy violation) instead
//! of an HTTP status. A refused socket never touches the registry.

use crate::{AppState, Metrics, Topic, TopicConnection};

use lh_auth::{AuthError, TenantContext};

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade, close_code};
use axum::extract::{Query, State};
use axum::response::Response;
use log::{debug, error, warn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: Option<String>,
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    serve(state, query, ws, Topic::Dashboard)
}

pub async fn threats_handler(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    serve(state, query, ws, Topic::Threats)
}

pub async fn analytics_handler(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
    ws: WebSocketUpgrade,
) -> Response {
    serve(state, query, ws, Topic::Analytics)
}

fn serve(state: AppState, query: TokenQuery, ws: WebSocketUpgrade, topic: Topic) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state, query.token, topic))
}

async fn handle_socket(socket: WebSocket, state: AppState, token: Option<String>, topic: Topic) {
    let context = match admit(&state, token.as_deref()).await {
        Ok(context) => context,
        Err(refusal) => {
            refuse(socket, refusal, &state.metrics).await;
            return;
        }
    };

    debug!(
        "Admitted user {} (tenant {}) on {topic}",
        context.user_id, context.tenant_id
    );

    let shutdown_guard = state.shutdown.subscribe_guard();
    let connection = TopicConnection::new(
        context,
        topic,
        state.config.clone(),
        state.metrics.clone(),
        state.registry.clone(),
    );

    if let Err(e) = connection.handle(socket, shutdown_guard).await {
        error!("Connection on {topic} ended with error: {e}");
    }
}

struct Refusal {
    code: u16,
    reason: &'static str,
    metric: &'static str,
}

impl Refusal {
    fn policy(reason: &'static str, metric: &'static str) -> Self {
        Self {
            code: close_code::POLICY,
            reason,
            metric,
        }
    }
}

/// Validate the token and resolve the principal before any registry
/// interaction.
async fn admit(state: &AppState, token: Option<&str>) -> Result<TenantContext, Refusal> {
    let token = match token {
        Some(token) => token,
        None => {
            warn!("WebSocket admission refused: missing token");
            return Err(Refusal::policy("missing token", "missing_token"));
        }
    };

    let claims = state.jwt_validator.validate(token).map_err(|e| {
        warn!("WebSocket admission refused: {e}");
        let metric = match e {
            AuthError::TokenExpired { .. } => "token_expired",
            _ => "invalid_token",
        };
        Refusal::policy(e.close_reason(), metric)
    })?;

    let context = TenantContext::from_claims(claims);

    match state
        .users
        .exists_in_tenant(&context.user_id, &context.tenant_id)
        .await
    {
        Ok(true) => Ok(context),
        Ok(false) => {
            warn!(
                "WebSocket admission refused: unknown principal {} in tenant {}",
                context.user_id, context.tenant_id
            );
            Err(Refusal::policy("unknown principal", "unknown_principal"))
        }
        Err(e) => {
            error!("Principal lookup failed during admission: {e}");
            Err(Refusal {
                code: close_code::ERROR,
                reason: "internal error",
                metric: "internal",
            })
        }
    }
}

async fn refuse(mut socket: WebSocket, refusal: Refusal, metrics: &Metrics) {
    metrics.admission_refused(refusal.metric);
    let _ = socket
        .send(Message::Close(Some(CloseFrame {
            code: refusal.code,
            reason: refusal.reason.into(),
        })))
        .await;
}
