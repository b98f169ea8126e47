// ==========================================
// Voltway Industrial OS - Domain model
// ==========================================
// Responsibility: entities and value types of the catalog
// Rule: no data access, no engine logic
// ==========================================

pub mod customer;
pub mod order;
pub mod part;
pub mod product;
pub mod reorder;
pub mod stock;
pub mod supplier;
pub mod types;

// Re-exports
pub use customer::Customer;
pub use order::{PurchaseOrder, SalesOrder};
pub use part::Part;
pub use product::{BomLine, Product};
pub use reorder::{DispatchParameter, ReorderConfig, ReorderConfigError};
pub use stock::{StockMovement, StockRecord, Warehouse};
pub use supplier::SupplierOffer;
pub use types::{CustomerType, MovementType, PurchaseOrderStatus};
