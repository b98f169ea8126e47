// ==========================================
// Voltway Industrial OS - API layer
// ==========================================
// Responsibility: caller-facing operations over engines and repositories
// ==========================================

pub mod bom_api;
pub mod chat_api;
pub mod config_api;
pub mod dashboard_api;
pub mod error;
pub mod inventory_api;
pub mod master_data_api;
pub mod validator;

pub use bom_api::BomApi;
pub use chat_api::{ChatApi, ChatReply, ReplyKind};
pub use config_api::ConfigApi;
pub use dashboard_api::{DashboardApi, DashboardView};
pub use error::{ApiError, ApiResult};
pub use inventory_api::{InventoryApi, InventoryRow};
pub use master_data_api::{MasterDataApi, MasterDataRepositories};
