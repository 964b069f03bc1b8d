use crate::{ConnectionId, Topic};

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Message;
use log::info;
use tokio::sync::{RwLock, mpsc};

/// Registry of live connections, partitioned by (tenant, topic).
///
/// The registry holds only the outbound sender half of each connection;
/// the socket itself is owned by the connection task. Partitions whose
/// last member leaves are dropped from the map.
pub struct ConnectionRegistry {
    inner: Arc<RwLock<RegistryInner>>,
}

struct RegistryInner {
    partitions: HashMap<(String, Topic), HashMap<ConnectionId, mpsc::Sender<Message>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(RegistryInner {
                partitions: HashMap::new(),
            })),
        }
    }

    /// Register a connection's sender under (tenant, topic).
    /// Registering an id that is already present replaces its sender.
    pub async fn register(
        &self,
        tenant_id: &str,
        topic: Topic,
        sender: mpsc::Sender<Message>,
    ) -> ConnectionId {
        let connection_id = ConnectionId::new();
        let mut inner = self.inner.write().await;

        let partition = inner
            .partitions
            .entry((tenant_id.to_string(), topic))
            .or_default();
        partition.insert(connection_id, sender);

        info!(
            "Registered connection {connection_id} on {tenant_id}/{topic} ({} in partition)",
            partition.len()
        );

        connection_id
    }

    /// Remove a connection. Removing an absent id is a no-op.
    pub async fn deregister(&self, tenant_id: &str, topic: Topic, connection_id: ConnectionId) {
        let mut inner = self.inner.write().await;

        let key = (tenant_id.to_string(), topic);
        if let Some(partition) = inner.partitions.get_mut(&key) {
            if partition.remove(&connection_id).is_some() {
                info!(
                    "Deregistered connection {connection_id} from {tenant_id}/{topic} ({} remaining)",
                    partition.len()
                );
            }
            if partition.is_empty() {
                inner.partitions.remove(&key);
            }
        }
    }

    /// Copy-on-read member list, safe to iterate while concurrent
    /// deregisters occur.
    pub async fn snapshot(
        &self,
        tenant_id: &str,
        topic: Topic,
    ) -> Vec<(ConnectionId, mpsc::Sender<Message>)> {
        let inner = self.inner.read().await;
        inner
            .partitions
            .get(&(tenant_id.to_string(), topic))
            .map(|partition| {
                partition
                    .iter()
                    .map(|(id, sender)| (*id, sender.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Member count for one (tenant, topic) partition
    pub async fn count(&self, tenant_id: &str, topic: Topic) -> usize {
        let inner = self.inner.read().await;
        inner
            .partitions
            .get(&(tenant_id.to_string(), topic))
            .map(|partition| partition.len())
            .unwrap_or(0)
    }

    /// Total connection count across all partitions
    pub async fn total_count(&self) -> usize {
        let inner = self.inner.read().await;
        inner.partitions.values().map(|p| p.len()).sum()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ConnectionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
