// ==========================================
// Voltway Industrial OS - Inventory API
// ==========================================
// Stock view with free-text filter, stock movements, PO receipt
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{require_key, require_positive};
use crate::app::view_state::matches_search;
use crate::domain::stock::{StockMovement, StockRecord};
use crate::domain::types::MovementType;
use crate::engine::shortage::is_short;
use crate::repository::{PurchaseOrderRepository, StockRepository};
use crate::services::SnapshotRefreshService;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryRow {
    pub part_id: String,
    pub part_name: String,
    pub part_type: String,
    pub location: String,
    pub quantity_available: u64,
    pub minimum_stock_threshold: Option<u64>,
    pub is_short: bool,
}

pub struct InventoryApi {
    stock_repo: Arc<StockRepository>,
    purchase_order_repo: Arc<PurchaseOrderRepository>,
    refresh: Arc<SnapshotRefreshService>,
}

impl InventoryApi {
    pub fn new(
        stock_repo: Arc<StockRepository>,
        purchase_order_repo: Arc<PurchaseOrderRepository>,
        refresh: Arc<SnapshotRefreshService>,
    ) -> Self {
        Self {
            stock_repo,
            purchase_order_repo,
            refresh,
        }
    }

    /// Stock rows joined with part master, filtered on part name or type
    pub async fn list_inventory(&self, search: &str) -> ApiResult<Vec<InventoryRow>> {
        let snapshot = self.refresh.current().await?;
        let rows = snapshot
            .stock_rows()
            .iter()
            .filter_map(|record| {
                let (name, part_type) = snapshot
                    .part(&record.part_id)
                    .map(|p| (p.part_name.clone(), p.part_type.clone()))
                    .unwrap_or_else(|| (record.part_id.clone(), String::new()));
                if !matches_search(search, &[&name, &part_type]) {
                    return None;
                }
                let config = snapshot.reorder_config(&record.part_id);
                let qty = record.quantity_available.max(0) as u64;
                Some(InventoryRow {
                    part_id: record.part_id.clone(),
                    part_name: name,
                    part_type,
                    location: record.location.clone(),
                    quantity_available: qty,
                    minimum_stock_threshold: config.map(|c| c.minimum_stock_threshold),
                    is_short: is_short(qty, config),
                })
            })
            .collect();
        Ok(rows)
    }

    /// Book an inbound/outbound movement against one location
    pub fn record_movement(
        &self,
        date: NaiveDate,
        part_id: &str,
        location: &str,
        movement_type: MovementType,
        quantity: i64,
    ) -> ApiResult<StockRecord> {
        require_key("part_id", part_id)?;
        require_key("location", location)?;
        require_positive("quantity", quantity)?;

        let movement = StockMovement::new(date, part_id, location, movement_type, quantity);
        let record = self.stock_repo.record_movement(&movement)?;
        tracing::info!(
            part_id,
            location,
            movement = movement_type.as_str(),
            quantity,
            after = record.quantity_available,
            "stock movement recorded"
        );
        self.refresh.refresh_after_write("stock");
        Ok(record)
    }

    pub fn list_movements(&self, part_id: &str) -> ApiResult<Vec<StockMovement>> {
        require_key("part_id", part_id)?;
        Ok(self.stock_repo.list_movements(part_id)?)
    }

    /// Book a pending purchase order inbound and mark it delivered in one transaction
    pub fn receive_purchase_order(
        &self,
        order_id: &str,
        location: &str,
        delivered_at: NaiveDate,
    ) -> ApiResult<StockRecord> {
        require_key("order_id", order_id)?;
        require_key("location", location)?;

        let (order, record) = self
            .purchase_order_repo
            .receive(order_id, location, delivered_at)?;
        tracing::info!(
            order_id,
            part_id = %order.part_id,
            quantity = order.quantity_ordered,
            after = record.quantity_available,
            "purchase order received"
        );
        self.refresh.refresh_after_write("material_orders");
        Ok(record)
    }
}
