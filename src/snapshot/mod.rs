// ==========================================
// Voltway Industrial OS - Catalog snapshot layer
// ==========================================
// Catalog data → validated CatalogSnapshot → SnapshotStore
// ==========================================

pub mod catalog;
pub mod source;
pub mod store;

pub use catalog::{
    BomRequirement, CatalogData, CatalogSnapshot, MalformedLine, SnapshotIssue, StockScope,
};
pub use source::{SnapshotError, SnapshotSource, SqliteSnapshotSource, StaticSnapshotSource};
pub use store::{PublishOutcome, RefreshTicket, SnapshotStore};
