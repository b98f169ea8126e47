// ==========================================
// Voltway Industrial OS - Snapshot store
// ==========================================
// Holds the latest completed snapshot behind an Arc (atomic swap)
// Refresh requests take increasing tickets; an older ticket never
// replaces a newer published snapshot (last request wins)
// ==========================================

use crate::snapshot::catalog::CatalogSnapshot;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

/// Ticket handed out when a refresh starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Published,
    /// A newer refresh already published; this result was discarded
    Superseded,
}

#[derive(Default)]
struct Published {
    ticket: u64,
    snapshot: Option<Arc<CatalogSnapshot>>,
}

#[derive(Default)]
pub struct SnapshotStore {
    next_ticket: AtomicU64,
    published: RwLock<Published>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with a snapshot (ticket 0)
    pub fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        let store = Self::default();
        {
            let mut guard = store.published.write().unwrap_or_else(|p| p.into_inner());
            guard.snapshot = Some(Arc::new(snapshot));
        }
        store
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.next_ticket.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Publish a completed snapshot unless a newer one is already visible
    pub fn publish(&self, ticket: RefreshTicket, snapshot: CatalogSnapshot) -> PublishOutcome {
        let mut guard = self.published.write().unwrap_or_else(|p| p.into_inner());
        if ticket.0 <= guard.ticket && guard.snapshot.is_some() {
            tracing::debug!(
                ticket = ticket.0,
                published = guard.ticket,
                "refresh superseded, discarding snapshot"
            );
            return PublishOutcome::Superseded;
        }
        guard.ticket = ticket.0;
        guard.snapshot = Some(Arc::new(snapshot));
        PublishOutcome::Published
    }

    /// Latest completed snapshot; readers keep their Arc for a whole pass
    pub fn latest(&self) -> Option<Arc<CatalogSnapshot>> {
        let guard = self.published.read().unwrap_or_else(|p| p.into_inner());
        guard.snapshot.clone()
    }

    pub fn published_ticket(&self) -> u64 {
        let guard = self.published.read().unwrap_or_else(|p| p.into_inner());
        guard.ticket
    }
}
