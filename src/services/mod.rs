// ==========================================
// Voltway Industrial OS - Services
// ==========================================

pub mod refresh_service;

pub use refresh_service::{PollingHandle, RefreshResult, SnapshotRefreshService};
