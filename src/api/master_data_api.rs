// ==========================================
// Voltway Industrial OS - Master data API
// ==========================================
// CRUD for every catalog table; input checked before the repository
// Every successful write triggers a snapshot refresh
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{
    require_key, require_non_negative, require_non_negative_f64, require_positive, require_ratio,
};
use crate::domain::customer::Customer;
use crate::domain::order::{PurchaseOrder, SalesOrder};
use crate::domain::part::Part;
use crate::domain::product::Product;
use crate::domain::reorder::{DispatchParameter, ReorderConfig};
use crate::domain::stock::{StockRecord, Warehouse};
use crate::domain::supplier::SupplierOffer;
use crate::repository::{
    CustomerRepository, DispatchParameterRepository, PartRepository, ProductRepository,
    PurchaseOrderRepository, SalesOrderRepository, StockRepository, SupplierRepository,
    WarehouseRepository,
};
use crate::services::SnapshotRefreshService;
use chrono::NaiveDate;
use std::sync::Arc;

/// Repositories behind the master data API
pub struct MasterDataRepositories {
    pub parts: Arc<PartRepository>,
    pub products: Arc<ProductRepository>,
    pub customers: Arc<CustomerRepository>,
    pub warehouses: Arc<WarehouseRepository>,
    pub stock: Arc<StockRepository>,
    pub suppliers: Arc<SupplierRepository>,
    pub dispatch_parameters: Arc<DispatchParameterRepository>,
    pub purchase_orders: Arc<PurchaseOrderRepository>,
    pub sales_orders: Arc<SalesOrderRepository>,
}

pub struct MasterDataApi {
    repos: MasterDataRepositories,
    refresh: Arc<SnapshotRefreshService>,
}

impl MasterDataApi {
    pub fn new(repos: MasterDataRepositories, refresh: Arc<SnapshotRefreshService>) -> Self {
        Self { repos, refresh }
    }

    fn written(&self, table: &str, key: &str) {
        tracing::info!(table, key, "master data written");
        self.refresh.refresh_after_write(table);
    }

    // ==========================================
    // Parts (materials)
    // ==========================================

    pub fn list_parts(&self) -> ApiResult<Vec<Part>> {
        Ok(self.repos.parts.list_all()?)
    }

    pub fn get_part(&self, part_id: &str) -> ApiResult<Option<Part>> {
        require_key("part_id", part_id)?;
        Ok(self.repos.parts.find_by_id(part_id)?)
    }

    /// Successor references are stored as given; unknown ones stay advisory
    pub fn save_part(&self, part: &Part) -> ApiResult<()> {
        require_key("part_id", &part.part_id)?;
        require_key("part_name", &part.part_name)?;
        require_key("part_type", &part.part_type)?;
        require_non_negative_f64("weight", part.weight)?;
        self.repos.parts.upsert(part)?;
        self.written("materials", &part.part_id);
        Ok(())
    }

    pub fn delete_part(&self, part_id: &str) -> ApiResult<()> {
        require_key("part_id", part_id)?;
        self.repos.parts.delete(part_id)?;
        self.written("materials", part_id);
        Ok(())
    }

    // ==========================================
    // Products
    // ==========================================

    pub fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.repos.products.list_all()?)
    }

    pub fn save_product(&self, product: &Product) -> ApiResult<()> {
        require_key("product_id", &product.product_id)?;
        require_key("product_name", &product.product_name)?;
        self.repos.products.upsert(product)?;
        self.written("products", &product.product_id);
        Ok(())
    }

    /// Removes the product's BOM lines with it
    pub fn delete_product(&self, product_id: &str) -> ApiResult<()> {
        require_key("product_id", product_id)?;
        self.repos.products.delete(product_id)?;
        self.written("products", product_id);
        Ok(())
    }

    // ==========================================
    // Customers / warehouses
    // ==========================================

    pub fn list_customers(&self) -> ApiResult<Vec<Customer>> {
        Ok(self.repos.customers.list_all()?)
    }

    pub fn save_customer(&self, customer: &Customer) -> ApiResult<()> {
        require_key("customer_id", &customer.customer_id)?;
        require_key("name", &customer.name)?;
        self.repos.customers.upsert(customer)?;
        self.written("customers", &customer.customer_id);
        Ok(())
    }

    pub fn delete_customer(&self, customer_id: &str) -> ApiResult<()> {
        require_key("customer_id", customer_id)?;
        self.repos.customers.delete(customer_id)?;
        self.written("customers", customer_id);
        Ok(())
    }

    pub fn list_warehouses(&self) -> ApiResult<Vec<Warehouse>> {
        Ok(self.repos.warehouses.list_all()?)
    }

    pub fn save_warehouse(&self, warehouse: &Warehouse) -> ApiResult<()> {
        require_key("location", &warehouse.location)?;
        self.repos.warehouses.upsert(warehouse)?;
        self.written("warehouses", &warehouse.location);
        Ok(())
    }

    pub fn delete_warehouse(&self, location: &str) -> ApiResult<()> {
        require_key("location", location)?;
        self.repos.warehouses.delete(location)?;
        self.written("warehouses", location);
        Ok(())
    }

    // ==========================================
    // Stock records
    // ==========================================

    /// Direct correction of on-hand stock (no movement booked)
    pub fn save_stock_record(&self, record: &StockRecord) -> ApiResult<()> {
        require_key("part_id", &record.part_id)?;
        require_key("location", &record.location)?;
        require_non_negative("quantity_available", record.quantity_available)?;
        self.repos.stock.upsert(record)?;
        self.written("stock", &record.part_id);
        Ok(())
    }

    pub fn delete_stock_record(&self, part_id: &str, location: &str) -> ApiResult<()> {
        require_key("part_id", part_id)?;
        require_key("location", location)?;
        self.repos.stock.delete(part_id, location)?;
        self.written("stock", part_id);
        Ok(())
    }

    // ==========================================
    // Supplier catalog
    // ==========================================

    pub fn list_supplier_offers(&self) -> ApiResult<Vec<SupplierOffer>> {
        Ok(self.repos.suppliers.list_all()?)
    }

    pub fn save_supplier_offer(&self, offer: &SupplierOffer) -> ApiResult<()> {
        require_key("supplier_id", &offer.supplier_id)?;
        require_key("part_id", &offer.part_id)?;
        require_non_negative_f64("price_per_unit", offer.price_per_unit)?;
        require_non_negative("lead_time_days", offer.lead_time_days)?;
        require_positive("min_order_qty", offer.min_order_qty)?;
        require_ratio("reliability_rating", offer.reliability_rating)?;
        self.repos.suppliers.upsert(offer)?;
        self.written("suppliers", &offer.supplier_id);
        Ok(())
    }

    pub fn delete_supplier_offer(&self, supplier_id: &str, part_id: &str) -> ApiResult<()> {
        require_key("supplier_id", supplier_id)?;
        require_key("part_id", part_id)?;
        self.repos.suppliers.delete(supplier_id, part_id)?;
        self.written("suppliers", supplier_id);
        Ok(())
    }

    // ==========================================
    // Reorder configuration (dispatch_parameters)
    // ==========================================

    pub fn list_dispatch_parameters(&self) -> ApiResult<Vec<DispatchParameter>> {
        Ok(self.repos.dispatch_parameters.list_all()?)
    }

    pub fn save_reorder_config(&self, config: &ReorderConfig, updated_at: NaiveDate) -> ApiResult<()> {
        require_key("part_id", &config.part_id)?;
        if let Some(qty) = config.reorder_quantity {
            require_positive("reorder_quantity", i64::try_from(qty).unwrap_or(i64::MAX))?;
        }
        self.repos
            .dispatch_parameters
            .upsert_reorder_config(config, updated_at)?;
        self.written("dispatch_parameters", &config.part_id);
        Ok(())
    }

    pub fn delete_reorder_config(&self, part_id: &str) -> ApiResult<()> {
        require_key("part_id", part_id)?;
        self.repos.dispatch_parameters.delete(part_id)?;
        self.written("dispatch_parameters", part_id);
        Ok(())
    }

    // ==========================================
    // Orders
    // ==========================================

    pub fn list_purchase_orders(&self) -> ApiResult<Vec<PurchaseOrder>> {
        Ok(self.repos.purchase_orders.list_all()?)
    }

    pub fn save_purchase_order(&self, order: &PurchaseOrder) -> ApiResult<()> {
        require_key("order_id", &order.order_id)?;
        require_key("part_id", &order.part_id)?;
        require_key("supplier_id", &order.supplier_id)?;
        require_positive("quantity_ordered", order.quantity_ordered)?;
        self.repos.purchase_orders.upsert(order)?;
        self.written("material_orders", &order.order_id);
        Ok(())
    }

    pub fn delete_purchase_order(&self, order_id: &str) -> ApiResult<()> {
        require_key("order_id", order_id)?;
        self.repos.purchase_orders.delete(order_id)?;
        self.written("material_orders", order_id);
        Ok(())
    }

    pub fn list_sales_orders(&self) -> ApiResult<Vec<SalesOrder>> {
        Ok(self.repos.sales_orders.list_all()?)
    }

    pub fn save_sales_order(&self, order: &SalesOrder) -> ApiResult<()> {
        require_key("sales_order_id", &order.sales_order_id)?;
        require_key("product_id", &order.product_id)?;
        require_key("customer_id", &order.customer_id)?;
        require_positive("quantity", order.quantity)?;
        self.repos.sales_orders.upsert(order)?;
        self.written("sales_orders", &order.sales_order_id);
        Ok(())
    }

    pub fn delete_sales_order(&self, sales_order_id: &str) -> ApiResult<()> {
        require_key("sales_order_id", sales_order_id)?;
        self.repos.sales_orders.delete(sales_order_id)?;
        self.written("sales_orders", sales_order_id);
        Ok(())
    }
}
