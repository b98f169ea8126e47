// ==========================================
// Voltway Industrial OS - Planning configuration reader
// ==========================================
// Responsibility: read-side configuration interface (no writes)
// Implementor: ConfigManager (config_kv table)
// ==========================================

use crate::config::config_manager::ConfigResult;
use async_trait::async_trait;

#[async_trait]
pub trait PlanningConfigReader: Send + Sync {
    // ===== Snapshot refresh =====

    /// Polling interval of the background snapshot refresh
    ///
    /// # Default
    /// - 30 seconds
    async fn get_refresh_interval_secs(&self) -> ConfigResult<u64>;

    // ===== Build feasibility =====

    /// Whether build potential credits successor stock by default
    ///
    /// # Default
    /// - false (PrimaryOnly)
    async fn get_credit_successors(&self) -> ConfigResult<bool>;

    /// Number of stock rows shown in the utilization chart
    ///
    /// # Default
    /// - 6
    async fn get_utilization_chart_size(&self) -> ConfigResult<usize>;

    // ===== Assistant =====

    async fn get_locale(&self) -> ConfigResult<String>;

    /// # Default
    /// - gemini-3-pro-preview
    async fn get_assistant_model(&self) -> ConfigResult<String>;

    /// # Default
    /// - 0.3
    async fn get_assistant_temperature(&self) -> ConfigResult<f32>;
}
