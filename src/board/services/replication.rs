//! Asynchronous replication of committed snapshots to a repository.
//!
//! [`SnapshotReplicator`] is the store-facing half: a subscriber that hands
//! each committed snapshot to an unbounded channel without blocking.
//! [`ReplicationWorker`] is the background half: it drains the channel,
//! keeps only the newest snapshot of a burst, and saves it with retry and
//! exponential backoff. The worker stops once every replicator is dropped.

use crate::board::{
    config::ReplicationConfig,
    domain::BoardSnapshot,
    ports::{BoardRepository, BoardSubscriber},
};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Subscriber forwarding committed snapshots to a [`ReplicationWorker`].
#[derive(Debug, Clone)]
pub struct SnapshotReplicator {
    sender: mpsc::UnboundedSender<BoardSnapshot>,
}

impl SnapshotReplicator {
    /// Creates a connected replicator and worker pair.
    #[must_use]
    pub fn channel<R>(
        repository: Arc<R>,
        config: ReplicationConfig,
    ) -> (Self, ReplicationWorker<R>)
    where
        R: BoardRepository,
    {
        let (sender, receiver) = mpsc::unbounded_channel();
        let worker = ReplicationWorker {
            repository,
            receiver,
            config,
            last_saved: None,
        };
        (Self { sender }, worker)
    }
}

impl BoardSubscriber for SnapshotReplicator {
    fn on_commit(&self, snapshot: &BoardSnapshot) {
        if self.sender.send(snapshot.clone()).is_err() {
            tracing::warn!(
                version = snapshot.version(),
                "replication worker has stopped; snapshot not replicated"
            );
        }
    }
}

/// Background task saving replicated snapshots to a repository.
pub struct ReplicationWorker<R>
where
    R: BoardRepository,
{
    repository: Arc<R>,
    receiver: mpsc::UnboundedReceiver<BoardSnapshot>,
    config: ReplicationConfig,
    last_saved: Option<BoardSnapshot>,
}

impl<R> ReplicationWorker<R>
where
    R: BoardRepository,
{
    /// Runs until every [`SnapshotReplicator`] has been dropped and the
    /// channel is drained.
    pub async fn run(mut self) {
        while let Some(received) = self.receiver.recv().await {
            let mut latest = received;
            while let Ok(newer) = self.receiver.try_recv() {
                latest = newer;
            }
            self.replicate(latest).await;
        }
        tracing::info!("board replication channel closed, worker shutting down");
    }

    async fn replicate(&mut self, snapshot: BoardSnapshot) {
        if self
            .last_saved
            .as_ref()
            .is_some_and(|saved| saved.shares_tables_with(&snapshot))
        {
            tracing::debug!(
                version = snapshot.version(),
                "snapshot tables unchanged since last save"
            );
            return;
        }

        let attempts = self.config.max_attempts.max(1);
        for attempt in 1..=attempts {
            match self.repository.save(&snapshot).await {
                Ok(()) => {
                    tracing::debug!(version = snapshot.version(), attempt, "snapshot replicated");
                    self.last_saved = Some(snapshot);
                    return;
                }
                Err(err) if attempt < attempts => {
                    let delay = self.config.backoff_after(attempt);
                    tracing::warn!(
                        version = snapshot.version(),
                        attempt,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "snapshot replication failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => {
                    tracing::error!(
                        version = snapshot.version(),
                        attempts,
                        error = %err,
                        "snapshot replication failed, giving up"
                    );
                }
            }
        }
    }
}
