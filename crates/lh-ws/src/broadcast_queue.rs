use crate::{BroadcastDispatcher, Topic};

use log::info;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// One triggering event: a tenant whose listed topics need a fresh
/// broadcast. Ingest touches all three topics; resolve and user
/// creation touch subsets.
#[derive(Debug, Clone)]
pub struct BroadcastEvent {
    pub tenant_id: String,
    pub topics: Vec<Topic>,
}

impl BroadcastEvent {
    pub fn all_topics(tenant_id: impl Into<String>) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            topics: Topic::ALL.to_vec(),
        }
    }

    pub fn for_topics(tenant_id: impl Into<String>, topics: &[Topic]) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            topics: topics.to_vec(),
        }
    }
}

/// Producer handle for broadcast events. Request handlers publish here
/// after committing, so request latency is decoupled from broadcast
/// cost.
#[derive(Clone)]
pub struct BroadcastQueue {
    tx: mpsc::UnboundedSender<BroadcastEvent>,
}

impl BroadcastQueue {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BroadcastEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Enqueue an event. A closed consumer means the process is
    /// shutting down; the event is dropped silently.
    pub fn publish(&self, event: BroadcastEvent) {
        let _ = self.tx.send(event);
    }
}

/// Consumer loop: one spawned task per event, so broadcasts for
/// different pairs are independently schedulable.
pub fn spawn_consumer(
    dispatcher: BroadcastDispatcher,
    mut rx: mpsc::UnboundedReceiver<BroadcastEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                for topic in &event.topics {
                    dispatcher.broadcast(&event.tenant_id, *topic).await;
                }
            });
        }
        info!("Broadcast queue closed, consumer exiting");
    })
}
