// ==========================================
// Test data builders
// ==========================================

use chrono::NaiveDate;
use serde_json::json;
use voltway_ios::domain::{
    BomLine, DispatchParameter, Part, Product, PurchaseOrder, PurchaseOrderStatus, SalesOrder,
    StockRecord, SupplierOffer,
};
use voltway_ios::snapshot::CatalogData;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ==========================================
// CatalogBuilder
// ==========================================

/// Fluent CatalogData construction; parts referenced by BOM/stock
/// are created on demand with a generic name
#[derive(Default)]
pub struct CatalogBuilder {
    data: CatalogData,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn part(mut self, part_id: &str, name: &str, part_type: &str) -> Self {
        self.data.parts.retain(|p| p.part_id != part_id);
        self.data.parts.push(Part::new(part_id, name, part_type, 1.0));
        self
    }

    pub fn successors(mut self, part_id: &str, successors: &[&str]) -> Self {
        self.ensure_part(part_id);
        if let Some(p) = self.data.parts.iter_mut().find(|p| p.part_id == part_id) {
            p.successor_parts = successors.iter().map(|s| s.to_string()).collect();
        }
        self
    }

    pub fn product(mut self, product_id: &str) -> Self {
        self.data
            .products
            .push(Product::new(product_id, "T", "V1", &format!("Test {}", product_id)));
        self
    }

    pub fn bom(mut self, product_id: &str, part_id: &str, quantity: i64) -> Self {
        self.ensure_part(part_id);
        self.data
            .bom_lines
            .push(BomLine::new(product_id, part_id, quantity));
        self
    }

    pub fn stock(mut self, part_id: &str, location: &str, qty: i64) -> Self {
        self.ensure_part(part_id);
        self.data.stock.push(StockRecord::new(part_id, location, qty));
        self
    }

    pub fn min_stock(mut self, part_id: &str, min_stock: u64) -> Self {
        self.data.dispatch_parameters.push(DispatchParameter {
            part_id: part_id.to_string(),
            config_data: json!({ "minimum_stock_threshold": min_stock }),
            updated_at: date(2025, 1, 1),
        });
        self
    }

    pub fn raw_config(mut self, part_id: &str, config_data: serde_json::Value) -> Self {
        self.data.dispatch_parameters.push(DispatchParameter {
            part_id: part_id.to_string(),
            config_data,
            updated_at: date(2025, 1, 1),
        });
        self
    }

    pub fn offer(mut self, supplier_id: &str, part_id: &str, price: f64) -> Self {
        self.data.supplier_offers.push(SupplierOffer {
            supplier_id: supplier_id.to_string(),
            part_id: part_id.to_string(),
            price_per_unit: price,
            lead_time_days: 7,
            min_order_qty: 1,
            reliability_rating: 0.9,
        });
        self
    }

    pub fn purchase_order(mut self, order_id: &str, part_id: &str, status: PurchaseOrderStatus) -> Self {
        self.data.purchase_orders.push(PurchaseOrder {
            order_id: order_id.to_string(),
            part_id: part_id.to_string(),
            supplier_id: "SupT".to_string(),
            quantity_ordered: 10,
            order_date: date(2025, 5, 1),
            expected_delivery_date: date(2025, 5, 15),
            status,
            actual_delivered_at: None,
        });
        self
    }

    pub fn sales_order(
        mut self,
        sales_order_id: &str,
        product_id: &str,
        quantity: i64,
        requested: NaiveDate,
        status: &str,
    ) -> Self {
        self.data.sales_orders.push(SalesOrder {
            sales_order_id: sales_order_id.to_string(),
            product_id: product_id.to_string(),
            customer_id: "C100".to_string(),
            quantity,
            order_type: "fleet".to_string(),
            requested_date: requested,
            created_at: date(2025, 4, 1),
            accepted_request_date: requested,
            status: status.to_string(),
        });
        self
    }

    pub fn build(self) -> CatalogData {
        self.data
    }

    fn ensure_part(&mut self, part_id: &str) {
        if !self.data.parts.iter().any(|p| p.part_id == part_id) {
            self.data
                .parts
                .push(Part::new(part_id, &format!("Part {}", part_id), "assembly", 1.0));
        }
    }
}
