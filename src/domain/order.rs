// ==========================================
// Voltway Industrial OS - Orders
// ==========================================
// Tables: material_orders (purchase), sales_orders
// ==========================================

use crate::domain::types::PurchaseOrderStatus;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sales order statuses that no longer consume build capacity
const CLOSED_SALES_STATUSES: [&str; 4] = ["delivered", "shipped", "cancelled", "closed"];

/// Purchase order placed with a supplier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub order_id: String,
    pub part_id: String,
    pub supplier_id: String,
    pub quantity_ordered: i64,
    pub order_date: NaiveDate,
    pub expected_delivery_date: NaiveDate,
    pub status: PurchaseOrderStatus,
    #[serde(default)]
    pub actual_delivered_at: Option<NaiveDate>,
}

impl PurchaseOrder {
    pub fn is_pending(&self) -> bool {
        self.status == PurchaseOrderStatus::Ordered
    }
}

/// Customer sales order; `status` is free-form text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesOrder {
    pub sales_order_id: String,
    pub product_id: String,
    pub customer_id: String,
    pub quantity: i64,
    pub order_type: String,
    pub requested_date: NaiveDate,
    pub created_at: NaiveDate,
    pub accepted_request_date: NaiveDate,
    pub status: String,
}

impl SalesOrder {
    pub fn is_open(&self) -> bool {
        let status = self.status.trim().to_ascii_lowercase();
        !CLOSED_SALES_STATUSES.contains(&status.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(status: &str) -> SalesOrder {
        let d = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        SalesOrder {
            sales_order_id: "SO-1".to_string(),
            product_id: "S1_V1".to_string(),
            customer_id: "C100".to_string(),
            quantity: 5,
            order_type: "fleet".to_string(),
            requested_date: d,
            created_at: d,
            accepted_request_date: d,
            status: status.to_string(),
        }
    }

    #[test]
    fn test_sales_order_open_status() {
        assert!(order("confirmed").is_open());
        assert!(order("").is_open());
        assert!(!order("Shipped").is_open());
        assert!(!order("cancelled").is_open());
    }
}
