use crate::{
    AnalyticsSnapshot, ConnectionRegistry, DashboardSnapshot, Metrics, Result as WsErrorResult,
    ThreatsSnapshot, Topic, UpdateEnvelope,
};

use lh_db::{LogRepository, UserRepository};
use lh_geo::GeoResolver;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use axum::extract::ws::Message;
use log::{debug, error, warn};

/// Recomputes a topic's aggregate and fans the serialized envelope out
/// to every live subscriber of the (tenant, topic) partition.
///
/// Broadcast is fire-and-forget: a store or serialization failure
/// abandons the cycle for this pair; a failed send prunes that one
/// subscriber and delivery continues to the rest.
pub struct BroadcastDispatcher {
    registry: ConnectionRegistry,
    logs: Arc<LogRepository>,
    users: Arc<UserRepository>,
    geo: Arc<dyn GeoResolver>,
    metrics: Metrics,
    snapshots_computed: Arc<AtomicU64>,
}

impl BroadcastDispatcher {
    pub fn new(
        registry: ConnectionRegistry,
        logs: Arc<LogRepository>,
        users: Arc<UserRepository>,
        geo: Arc<dyn GeoResolver>,
        metrics: Metrics,
    ) -> Self {
        Self {
            registry,
            logs,
            users,
            geo,
            metrics,
            snapshots_computed: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Broadcast the current aggregate for (tenant, topic). Never
    /// propagates errors to the caller.
    pub async fn broadcast(&self, tenant_id: &str, topic: Topic) {
        // Empty partition: skip the store read and the builder entirely
        if self.registry.count(tenant_id, topic).await == 0 {
            debug!("No subscribers for {tenant_id}/{topic}, skipping broadcast");
            return;
        }

        let payload = match self.build_envelope_text(tenant_id, topic).await {
            Ok(text) => text,
            Err(e) => {
                error!("Broadcast cycle for {tenant_id}/{topic} abandoned: {e}");
                self.metrics.error_occurred("snapshot_build");
                return;
            }
        };

        self.fan_out(tenant_id, topic, payload).await;
    }

    /// Snapshots computed since startup. Stays flat across broadcasts
    /// to empty partitions.
    pub fn snapshots_computed(&self) -> u64 {
        self.snapshots_computed.load(Ordering::Relaxed)
    }

    async fn build_envelope_text(&self, tenant_id: &str, topic: Topic) -> WsErrorResult<String> {
        let started = Instant::now();
        let records = self.logs.all_for_tenant(tenant_id).await?;

        let envelope = match topic {
            Topic::Dashboard => {
                let user_count = self.users.count_for_tenant(tenant_id).await?;
                UpdateEnvelope::Dashboard(DashboardSnapshot::build(&records, user_count))
            }
            Topic::Threats => UpdateEnvelope::Threats(ThreatsSnapshot::build(&records)),
            Topic::Analytics => {
                UpdateEnvelope::Analytics(AnalyticsSnapshot::build(&records, self.geo.as_ref()).await)
            }
        };

        let text = serde_json::to_string(&envelope)?;

        self.snapshots_computed.fetch_add(1, Ordering::Relaxed);
        self.metrics.snapshot_computed(topic, started.elapsed());

        Ok(text)
    }

    /// Serialize-once fan-out over a copy of the member list. Failed
    /// sends deregister that connection mid-iteration.
    async fn fan_out(&self, tenant_id: &str, topic: Topic, payload: String) {
        let members = self.registry.snapshot(tenant_id, topic).await;
        let mut delivered = 0usize;

        for (connection_id, sender) in members {
            match sender.try_send(Message::Text(payload.clone().into())) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    warn!(
                        "Dropping subscriber {connection_id} on {tenant_id}/{topic} after failed send: {e}"
                    );
                    self.metrics.send_failure(topic);
                    self.registry.deregister(tenant_id, topic, connection_id).await;
                }
            }
        }

        self.metrics.envelopes_sent(topic, delivered);
        debug!("Broadcast {tenant_id}/{topic} delivered to {delivered} subscribers");
    }
}

impl Clone for BroadcastDispatcher {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry.clone(),
            logs: Arc::clone(&self.logs),
            users: Arc::clone(&self.users),
            geo: Arc::clone(&self.geo),
            metrics: self.metrics.clone(),
            snapshots_computed: Arc::clone(&self.snapshots_computed),
        }
    }
}
