// ==========================================
// Voltway Industrial OS - Snapshot refresh service
// ==========================================
// Flow: take ticket → load CatalogData → build snapshot → publish
// Rule: a slower, older refresh never overwrites a newer snapshot
// Runtime: SQLite loads run on the blocking pool
// ==========================================

use crate::snapshot::catalog::CatalogSnapshot;
use crate::snapshot::source::{SnapshotError, SnapshotSource};
use crate::snapshot::store::{PublishOutcome, SnapshotStore};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone)]
pub struct RefreshResult {
    pub ticket: u64,
    pub outcome: PublishOutcome,
    pub snapshot: Arc<CatalogSnapshot>,
}

#[derive(Clone)]
pub struct SnapshotRefreshService {
    source: Arc<dyn SnapshotSource>,
    store: Arc<SnapshotStore>,
}

impl SnapshotRefreshService {
    pub fn new(source: Arc<dyn SnapshotSource>, store: Arc<SnapshotStore>) -> Self {
        Self { source, store }
    }

    pub fn store(&self) -> &Arc<SnapshotStore> {
        &self.store
    }

    /// Synchronous refresh on the calling thread
    ///
    /// # Returns
    /// The snapshot visible after the attempt: the freshly built one when
    /// published, otherwise the newer one that superseded it.
    pub fn refresh_blocking(&self) -> Result<RefreshResult, SnapshotError> {
        let ticket = self.store.begin_refresh();
        let data = self.source.load()?;
        let snapshot = CatalogSnapshot::build(data);
        let outcome = self.store.publish(ticket, snapshot);

        let current = self
            .store
            .latest()
            .ok_or_else(|| SnapshotError::Task("no snapshot after publish".to_string()))?;
        tracing::info!(
            ticket = ticket.value(),
            ?outcome,
            parts = current.part_count(),
            issues = current.issues().len(),
            "catalog snapshot refreshed"
        );
        Ok(RefreshResult {
            ticket: ticket.value(),
            outcome,
            snapshot: current,
        })
    }

    /// Make a committed write visible to the next read; failures are logged
    pub fn refresh_after_write(&self, table: &str) {
        if let Err(e) = self.refresh_blocking() {
            tracing::warn!(table, error = %e, "snapshot refresh after write failed");
        }
    }

    pub async fn refresh(&self) -> Result<RefreshResult, SnapshotError> {
        let this = self.clone();
        tokio::task::spawn_blocking(move || this.refresh_blocking())
            .await
            .map_err(|e| SnapshotError::Task(e.to_string()))?
    }

    /// Latest snapshot, loading one first if none was published yet
    pub async fn current(&self) -> Result<Arc<CatalogSnapshot>, SnapshotError> {
        match self.store.latest() {
            Some(snapshot) => Ok(snapshot),
            None => Ok(self.refresh().await?.snapshot),
        }
    }

    /// Background polling; the first tick fires immediately
    pub fn spawn_polling(&self, every: Duration) -> PollingHandle {
        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let this = self.clone();

        let join = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = this.refresh().await {
                            tracing::error!(error = %e, "background snapshot refresh failed");
                        }
                    }
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::debug!("snapshot polling stopped");
        });

        tracing::info!(interval_ms = every.as_millis() as u64, "snapshot polling started");
        PollingHandle { shutdown_tx, join }
    }
}

pub struct PollingHandle {
    shutdown_tx: watch::Sender<bool>,
    join: JoinHandle<()>,
}

impl PollingHandle {
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(true);
        if let Err(e) = self.join.await {
            tracing::warn!(error = %e, "snapshot polling task ended abnormally");
        }
    }
}
