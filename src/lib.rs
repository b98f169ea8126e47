// ==========================================
// Voltway Industrial OS - Core library
// ==========================================
// Stack: Rust + SQLite (+ hosted LLM for the assistant)
// Scope: inventory and production planning backend
// ==========================================

// i18n bootstrap
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// Modules
// ==========================================

// Domain - entities and value types
pub mod domain;

// Repository - data access
pub mod repository;

// Catalog snapshot - consistent point-in-time view
pub mod snapshot;

// Engines - shortage, build feasibility, metrics
pub mod engine;

// Services - snapshot refresh
pub mod services;

// Configuration
pub mod config;

// Assistant ("Hugo")
pub mod assistant;

// API - caller-facing operations
pub mod api;

// Application wiring and view state
pub mod app;

// SQLite setup (PRAGMAs, schema)
pub mod db;

pub mod logging;
pub mod i18n;

// Demo dataset
pub mod seed;

// ==========================================
// Re-exports
// ==========================================

pub use domain::{
    BomLine, Customer, CustomerType, DispatchParameter, MovementType, Part, Product,
    PurchaseOrder, PurchaseOrderStatus, ReorderConfig, SalesOrder, StockMovement, StockRecord,
    SupplierOffer, Warehouse,
};

pub use snapshot::{CatalogData, CatalogSnapshot, SnapshotStore, StockScope};

pub use engine::{
    is_short, BuildFeasibilityEvaluator, BuildPotential, EngineError, EvaluationOptions,
    ShortageDetector, StockAlert, SubstitutionPolicy,
};

pub use api::{ApiError, ApiResult, BomApi, ChatApi, DashboardApi, InventoryApi, MasterDataApi};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "Voltway Industrial OS";
