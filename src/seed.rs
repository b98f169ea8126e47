// ==========================================
// Voltway Industrial OS - Demo dataset
// ==========================================
// Seeding order: primary entities → dependent entities → transactions
// Re-running the seed is safe (every write is an upsert)
// ==========================================

use crate::domain::customer::Customer;
use crate::domain::order::{PurchaseOrder, SalesOrder};
use crate::domain::part::Part;
use crate::domain::product::{BomLine, Product};
use crate::domain::reorder::DispatchParameter;
use crate::domain::stock::{StockMovement, StockRecord, Warehouse};
use crate::domain::supplier::SupplierOffer;
use crate::domain::types::{CustomerType, MovementType, PurchaseOrderStatus};
use crate::repository::{
    BomRepository, CustomerRepository, DispatchParameterRepository, PartRepository,
    ProductRepository, PurchaseOrderRepository, RepositoryResult, SalesOrderRepository,
    StockRepository, SupplierRepository, WarehouseRepository,
};
use crate::snapshot::catalog::CatalogData;
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

const DEMO_MOVEMENT_ID: &str = "5f0c2d1e-8a4b-4c7e-9b1a-2d3e4f5a6b7c";

#[derive(Debug, Clone)]
pub struct DemoDataset {
    pub parts: Vec<Part>,
    pub products: Vec<Product>,
    pub customers: Vec<Customer>,
    pub warehouses: Vec<Warehouse>,
    pub bom_lines: Vec<BomLine>,
    pub stock: Vec<StockRecord>,
    pub supplier_offers: Vec<SupplierOffer>,
    pub dispatch_parameters: Vec<DispatchParameter>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub sales_orders: Vec<SalesOrder>,
    pub stock_movements: Vec<StockMovement>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub parts: usize,
    pub products: usize,
    pub bom_lines: usize,
    pub stock_records: usize,
    pub supplier_offers: usize,
    pub orders: usize,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn offer(supplier: &str, part: &str, price: f64, lead: i64, moq: i64, rating: f64) -> SupplierOffer {
    SupplierOffer {
        supplier_id: supplier.to_string(),
        part_id: part.to_string(),
        price_per_unit: price,
        lead_time_days: lead,
        min_order_qty: moq,
        reliability_rating: rating,
    }
}

impl DemoDataset {
    pub fn new() -> Self {
        let parts = vec![
            Part::new("P300", "500W Brushless Motor", "assembly", 3.79).with_successors(&["P304"]),
            Part::new("P301", "Li-Ion 36V 10Ah Battery", "assembly", 4.84)
                .with_successors(&["P305"]),
            Part::new("P302", "Analog Controller ZX", "assembly", 2.29),
            Part::new("P303", "Aluminum Frame S1", "assembly", 4.01),
            Part::new("P304", "750W Brushless Motor", "assembly", 3.31),
            Part::new("P337", "Hex Nut M8", "hardware", 0.05),
            Part::new("P338", "Lock Washer M8", "hardware", 0.02),
        ];

        let products = vec![
            Product::new("S1_V1", "S1", "V1", "Voltway S1 Standard"),
            Product::new("S1_V2", "S1", "V2", "Voltway S1 Pro"),
        ];

        let customers = vec![
            Customer {
                customer_id: "C100".to_string(),
                name: "Berlin Micro-Mobility GmbH".to_string(),
                customer_type: CustomerType::Fleet,
            },
            Customer {
                customer_id: "C101".to_string(),
                name: "Individual Retail".to_string(),
                customer_type: CustomerType::Retail,
            },
        ];

        let warehouses = vec![Warehouse {
            location: "WH1".to_string(),
            description: Some("Main Assembly Facility - Berlin".to_string()),
        }];

        let bom_lines = vec![
            BomLine::new("S1_V1", "P300", 1),
            BomLine::new("S1_V1", "P301", 1),
            BomLine::new("S1_V1", "P337", 12),
            BomLine::new("S1_V2", "P304", 1),
            BomLine::new("S1_V2", "P301", 1),
            BomLine::new("S1_V2", "P337", 12),
        ];

        let stock = vec![
            StockRecord::new("P300", "WH1", 158),
            StockRecord::new("P301", "WH1", 45),
            StockRecord::new("P304", "WH1", 12),
            StockRecord::new("P337", "WH1", 4500),
        ];

        let supplier_offers = vec![
            offer("SupA", "P304", 185.00, 14, 10, 0.92),
            offer("SupB", "P301", 245.50, 10, 5, 0.88),
        ];

        // legacy key spelling, as the original data carries it
        let dispatch_parameters = vec![DispatchParameter {
            part_id: "P300".to_string(),
            config_data: serde_json::json!({ "min_stock": 50, "reorder_qty": 100 }),
            updated_at: date(2025, 4, 1),
        }];

        let purchase_orders = vec![PurchaseOrder {
            order_id: "PO-9001".to_string(),
            part_id: "P304".to_string(),
            supplier_id: "SupA".to_string(),
            quantity_ordered: 50,
            order_date: date(2025, 5, 1),
            expected_delivery_date: date(2025, 5, 15),
            status: PurchaseOrderStatus::Ordered,
            actual_delivered_at: None,
        }];

        let sales_orders = vec![SalesOrder {
            sales_order_id: "SO-1001".to_string(),
            product_id: "S1_V1".to_string(),
            customer_id: "C100".to_string(),
            quantity: 20,
            order_type: "fleet".to_string(),
            requested_date: date(2025, 6, 1),
            created_at: date(2025, 4, 10),
            accepted_request_date: date(2025, 4, 12),
            status: "confirmed".to_string(),
        }];

        let mut inbound =
            StockMovement::new(date(2025, 4, 20), "P300", "WH1", MovementType::Inbound, 100);
        inbound.movement_id = DEMO_MOVEMENT_ID.to_string();

        Self {
            parts,
            products,
            customers,
            warehouses,
            bom_lines,
            stock,
            supplier_offers,
            dispatch_parameters,
            purchase_orders,
            sales_orders,
            stock_movements: vec![inbound],
        }
    }

    pub fn catalog_data(&self) -> CatalogData {
        CatalogData {
            parts: self.parts.clone(),
            products: self.products.clone(),
            bom_lines: self.bom_lines.clone(),
            stock: self.stock.clone(),
            dispatch_parameters: self.dispatch_parameters.clone(),
            supplier_offers: self.supplier_offers.clone(),
            purchase_orders: self.purchase_orders.clone(),
            sales_orders: self.sales_orders.clone(),
        }
    }

    /// Write the dataset through the repositories in dependency order
    pub fn seed(&self, conn: Arc<Mutex<Connection>>) -> RepositoryResult<SeedReport> {
        let mut report = SeedReport::default();

        // ===== Primary entities =====
        report.parts = PartRepository::from_connection(conn.clone()).batch_upsert(&self.parts)?;
        report.products =
            ProductRepository::from_connection(conn.clone()).batch_upsert(&self.products)?;
        let customers = CustomerRepository::from_connection(conn.clone());
        for c in &self.customers {
            customers.upsert(c)?;
        }
        let warehouses = WarehouseRepository::from_connection(conn.clone());
        for w in &self.warehouses {
            warehouses.upsert(w)?;
        }

        // ===== Dependent entities =====
        report.bom_lines =
            BomRepository::from_connection(conn.clone()).batch_upsert(&self.bom_lines)?;
        let stock = StockRepository::from_connection(conn.clone());
        report.stock_records = stock.batch_upsert(&self.stock)?;
        report.supplier_offers = SupplierRepository::from_connection(conn.clone())
            .batch_upsert(&self.supplier_offers)?;
        DispatchParameterRepository::from_connection(conn.clone())
            .batch_upsert(&self.dispatch_parameters)?;

        // ===== Transactions =====
        let purchase_orders = PurchaseOrderRepository::from_connection(conn.clone());
        for po in &self.purchase_orders {
            purchase_orders.upsert(po)?;
        }
        let sales_orders = SalesOrderRepository::from_connection(conn);
        for so in &self.sales_orders {
            sales_orders.upsert(so)?;
        }
        report.orders = self.purchase_orders.len() + self.sales_orders.len();
        stock.import_movements(&self.stock_movements)?;

        tracing::info!(?report, "demo dataset seeded");
        Ok(report)
    }
}

impl Default for DemoDataset {
    fn default() -> Self {
        Self::new()
    }
}

/// Demo dataset as raw catalog rows
pub fn demo_catalog_data() -> CatalogData {
    DemoDataset::new().catalog_data()
}
