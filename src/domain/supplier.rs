// ==========================================
// Voltway Industrial OS - Supplier catalog
// ==========================================
// Table: suppliers (one row per supplier/part offer)
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOffer {
    pub supplier_id: String,
    pub part_id: String,
    pub price_per_unit: f64,
    pub lead_time_days: i64,
    pub min_order_qty: i64,
    pub reliability_rating: f64, // [0, 1]
}
