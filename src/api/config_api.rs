// ==========================================
// Voltway Industrial OS - Configuration API
// ==========================================
// Query / update / snapshot of config_kv (global scope)
// Only known keys are writable; values are checked by re-reading them
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{config_keys, ConfigManager, PlanningConfigReader, PlanningSettings};
use std::sync::Arc;

const KNOWN_KEYS: [&str; 6] = [
    config_keys::REFRESH_INTERVAL_SECS,
    config_keys::CREDIT_SUCCESSORS,
    config_keys::UTILIZATION_CHART_SIZE,
    config_keys::LOCALE,
    config_keys::ASSISTANT_MODEL,
    config_keys::ASSISTANT_TEMPERATURE,
];

pub struct ConfigApi {
    config_manager: Arc<ConfigManager>,
}

impl ConfigApi {
    pub fn new(config_manager: Arc<ConfigManager>) -> Self {
        Self { config_manager }
    }

    /// Effective settings (stored values over defaults)
    pub async fn get_settings(&self) -> ApiResult<PlanningSettings> {
        Ok(PlanningSettings::load(self.config_manager.as_ref()).await?)
    }

    pub fn get_config(&self, key: &str) -> ApiResult<Option<String>> {
        Ok(self.config_manager.get_global_config_value(key)?)
    }

    /// Write one key; an unparsable value is rolled back to the previous one
    pub async fn update_config(&self, key: &str, value: &str) -> ApiResult<()> {
        if !KNOWN_KEYS.contains(&key) {
            return Err(ApiError::InvalidInput(format!("unknown config key: {}", key)));
        }
        let previous = self.config_manager.get_global_config_value(key)?;
        self.config_manager.set_global_config_value(key, value)?;

        if let Err(e) = PlanningSettings::load(self.config_manager.as_ref()).await {
            match previous {
                Some(v) => self.config_manager.set_global_config_value(key, &v)?,
                None => {
                    self.config_manager.remove_global_config_value(key)?;
                }
            }
            return Err(ApiError::InvalidInput(e.to_string()));
        }
        if key == config_keys::LOCALE {
            crate::i18n::set_locale(&self.config_manager.get_locale().await?);
        }
        Ok(())
    }

    pub fn get_config_snapshot(&self) -> ApiResult<String> {
        Ok(self.config_manager.get_config_snapshot()?)
    }

    pub fn restore_from_snapshot(&self, snapshot_json: &str) -> ApiResult<usize> {
        Ok(self.config_manager.restore_config_from_snapshot(snapshot_json)?)
    }
}
