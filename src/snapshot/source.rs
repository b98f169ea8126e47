// ==========================================
// Voltway Industrial OS - Snapshot sources
// ==========================================
// Responsibility: materialize CatalogData at one retrieval instant
// Rule: consumers never re-fetch per lookup; they read a built snapshot
// ==========================================

use crate::repository::columns::lock_conn;
use crate::repository::error::RepositoryError;
use crate::repository::{
    BomRepository, DispatchParameterRepository, PartRepository, ProductRepository,
    PurchaseOrderRepository, SalesOrderRepository, StockRepository, SupplierRepository,
};
use crate::snapshot::catalog::CatalogData;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("snapshot load failed: {0}")]
    Source(#[from] RepositoryError),

    #[error("snapshot load task failed: {0}")]
    Task(String),
}

/// Anything that can produce a consistent CatalogData
pub trait SnapshotSource: Send + Sync {
    fn load(&self) -> Result<CatalogData, SnapshotError>;
}

// ==========================================
// SqliteSnapshotSource
// ==========================================
/// Reads every catalog table inside one transaction on the shared
/// connection; concurrent writers on that connection wait for the lock.
pub struct SqliteSnapshotSource {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSnapshotSource {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }
}

impl SnapshotSource for SqliteSnapshotSource {
    fn load(&self) -> Result<CatalogData, SnapshotError> {
        let conn = lock_conn(&self.conn)?;
        let tx = conn
            .unchecked_transaction()
            .map_err(RepositoryError::from)?;

        let data = CatalogData {
            parts: PartRepository::query_all(&tx)?,
            products: ProductRepository::query_all(&tx)?,
            bom_lines: BomRepository::query_all(&tx)?,
            stock: StockRepository::query_all(&tx)?,
            dispatch_parameters: DispatchParameterRepository::query_all(&tx)?,
            supplier_offers: SupplierRepository::query_all(&tx)?,
            purchase_orders: PurchaseOrderRepository::query_all(&tx)?,
            sales_orders: SalesOrderRepository::query_all(&tx)?,
        };

        tx.commit().map_err(RepositoryError::from)?;

        tracing::debug!(
            parts = data.parts.len(),
            products = data.products.len(),
            bom_lines = data.bom_lines.len(),
            stock_rows = data.stock.len(),
            "catalog data loaded"
        );
        Ok(data)
    }
}

// ==========================================
// StaticSnapshotSource
// ==========================================
/// In-memory source; `replace` swaps the whole dataset at once
#[derive(Default)]
pub struct StaticSnapshotSource {
    data: Mutex<CatalogData>,
}

impl StaticSnapshotSource {
    pub fn new(data: CatalogData) -> Self {
        Self {
            data: Mutex::new(data),
        }
    }

    pub fn replace(&self, data: CatalogData) {
        let mut guard = self.data.lock().unwrap_or_else(|p| p.into_inner());
        *guard = data;
    }
}

impl SnapshotSource for StaticSnapshotSource {
    fn load(&self) -> Result<CatalogData, SnapshotError> {
        let guard = self.data.lock().unwrap_or_else(|p| p.into_inner());
        Ok(guard.clone())
    }
}
