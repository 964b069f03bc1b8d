use crate::{
    ConnectionConfig, ConnectionRegistry, HEARTBEAT_FRAME, Metrics, Result as WsErrorResult,
    ShutdownGuard, Topic, WsError,
};

use lh_auth::TenantContext;

use std::panic::Location;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use log::{debug, info, warn};
use tokio::sync::mpsc;

/// Manages a single admitted connection: registration, the outbound
/// pump, the heartbeat interval, and deregistration on every terminal
/// path.
pub struct TopicConnection {
    tenant_context: TenantContext,
    topic: Topic,
    config: ConnectionConfig,
    metrics: Metrics,
    registry: ConnectionRegistry,
}

impl TopicConnection {
    pub fn new(
        tenant_context: TenantContext,
        topic: Topic,
        config: ConnectionConfig,
        metrics: Metrics,
        registry: ConnectionRegistry,
    ) -> Self {
        Self {
            tenant_context,
            topic,
            config,
            metrics,
            registry,
        }
    }

    /// Handle the connection lifecycle after admission.
    pub async fn handle(
        self,
        socket: WebSocket,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        let tenant_id = self.tenant_context.tenant_id.clone();
        let topic = self.topic;

        // Bounded channel for outgoing messages (backpressure handling).
        // The registry holds a clone of tx for broadcast fan-out.
        let (tx, mut rx) = mpsc::channel::<Message>(self.config.send_buffer_size);

        let connection_id = self.registry.register(&tenant_id, topic, tx.clone()).await;
        self.metrics.connection_established(topic);

        info!(
            "Connection {connection_id} established on {tenant_id}/{topic} (user {})",
            self.tenant_context.user_id
        );

        let (mut ws_sender, mut ws_receiver) = socket.split();

        // Send pump: the only writer to the socket
        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let mut heartbeat =
            tokio::time::interval(Duration::from_secs(self.config.heartbeat_interval_secs));
        // The first tick fires immediately; the client just connected
        heartbeat.tick().await;

        let result = loop {
            tokio::select! {
                msg = ws_receiver.next() => {
                    match msg {
                        Some(Ok(Message::Close(_))) => {
                            info!("Connection {connection_id} sent close frame");
                            break Ok(());
                        }
                        Some(Ok(Message::Ping(data))) => {
                            if tx.send(Message::Pong(data)).await.is_err() {
                                break Err(WsError::SendBufferFull {
                                    location: ErrorLocation::from(Location::caller()),
                                });
                            }
                        }
                        Some(Ok(other)) => {
                            // Client frames carry no protocol meaning on these feeds
                            debug!("Ignoring inbound frame on {connection_id}: {other:?}");
                        }
                        Some(Err(e)) => {
                            warn!("Transport error on connection {connection_id}: {e}");
                            break Err(WsError::ConnectionClosed {
                                reason: format!("WebSocket error: {}", e),
                                location: ErrorLocation::from(Location::caller()),
                            });
                        }
                        None => {
                            info!("Connection {connection_id} closed by client");
                            break Ok(());
                        }
                    }
                }

                _ = heartbeat.tick() => {
                    if tx.send(Message::Text(HEARTBEAT_FRAME.into())).await.is_err() {
                        info!("Heartbeat undeliverable on {connection_id}, closing");
                        break Err(WsError::ConnectionClosed {
                            reason: "heartbeat send failed".to_string(),
                            location: ErrorLocation::from(Location::caller()),
                        });
                    }
                }

                _ = shutdown_guard.wait() => {
                    info!("Shutting down connection {connection_id} gracefully");
                    break Ok(());
                }
            }
        };

        // Cleanup: deregistration is idempotent with dispatcher pruning
        self.registry.deregister(&tenant_id, topic, connection_id).await;
        drop(tx);
        let _ = send_task.await;

        self.metrics
            .connection_closed(topic, if result.is_ok() { "normal" } else { "error" });

        info!("Connection {connection_id} closed on {tenant_id}/{topic}");

        result
    }
}
