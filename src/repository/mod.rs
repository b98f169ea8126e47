// ==========================================
// Voltway Industrial OS - Repository layer
// ==========================================
// Rule: repositories hold no business logic
// Rule: every query is parameterized
// ==========================================

pub(crate) mod columns;
pub mod customer_repo;
pub mod dispatch_parameter_repo;
pub mod error;
pub mod order_repo;
pub mod part_repo;
pub mod product_repo;
pub mod stock_repo;
pub mod supplier_repo;

// Re-exports
pub use customer_repo::CustomerRepository;
pub use dispatch_parameter_repo::DispatchParameterRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::{PurchaseOrderRepository, SalesOrderRepository};
pub use part_repo::PartRepository;
pub use product_repo::{BomRepository, ProductRepository};
pub use stock_repo::{StockRepository, WarehouseRepository};
pub use supplier_repo::SupplierRepository;
