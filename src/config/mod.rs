// ==========================================
// Voltway Industrial OS - Configuration layer
// ==========================================
// Storage: config_kv table, global scope
// ==========================================

pub mod config_manager;
pub mod planning_config_trait;

pub use config_manager::{
    config_keys, ConfigError, ConfigManager, ConfigResult, PlanningSettings,
};
pub use planning_config_trait::PlanningConfigReader;
