// ==========================================
// Voltway Industrial OS - Configuration manager
// ==========================================
// Storage: config_kv (scope_id + key → value)
// Responsibility: load, query, override settings
// ==========================================

use crate::config::planning_config_trait::PlanningConfigReader;
use crate::db::open_sqlite_connection;
use crate::engine::feasibility::{EvaluationOptions, SubstitutionPolicy};
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;

const GLOBAL_SCOPE: &str = "global";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config storage error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("config lock poisoned: {0}")]
    Lock(String),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("config snapshot is not valid JSON: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// ==========================================
// ConfigManager
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    pub fn new(db_path: &str) -> ConfigResult<Self> {
        let conn = open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Reuse a shared connection; PRAGMAs are re-applied (idempotent)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ConfigResult<Self> {
        {
            let guard = conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
            crate::db::configure_sqlite_connection(&guard)?;
        }
        Ok(Self { conn })
    }

    pub fn get_global_config_value(&self, key: &str) -> ConfigResult<Option<String>> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![GLOBAL_SCOPE, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_global_config_value(&self, key: &str, value: &str) -> ConfigResult<()> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = datetime('now')
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!(key, value, "config value updated");
        Ok(())
    }

    pub fn remove_global_config_value(&self, key: &str) -> ConfigResult<bool> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        let affected = conn.execute(
            "DELETE FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
        )?;
        Ok(affected > 0)
    }

    /// All global settings as a JSON object string
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key")?;
        let rows = stmt.query_map(params![GLOBAL_SCOPE], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut map = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            map.insert(key, value);
        }
        Ok(serde_json::to_string(&map)?)
    }

    /// Overwrite global settings from `get_config_snapshot` output
    pub fn restore_config_from_snapshot(&self, snapshot_json: &str) -> ConfigResult<usize> {
        let map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;
        let conn = self.conn.lock().map_err(|e| ConfigError::Lock(e.to_string()))?;
        let tx = conn.unchecked_transaction()?;
        let mut count = 0;
        for (key, value) in &map {
            count += tx.execute(
                r#"
                INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
                ON CONFLICT(scope_id, key) DO UPDATE SET value = excluded.value
                "#,
                params![GLOBAL_SCOPE, key, value],
            )?;
        }
        tx.commit()?;
        Ok(count)
    }

    fn get_config_or_default(&self, key: &str, default: &str) -> ConfigResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    fn get_parsed<T: FromStr>(&self, key: &str, default: &str) -> ConfigResult<T> {
        let value = self.get_config_or_default(key, default)?;
        value.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value,
        })
    }
}

#[async_trait]
impl PlanningConfigReader for ConfigManager {
    async fn get_refresh_interval_secs(&self) -> ConfigResult<u64> {
        let secs: u64 = self.get_parsed(config_keys::REFRESH_INTERVAL_SECS, "30")?;
        if secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: config_keys::REFRESH_INTERVAL_SECS.to_string(),
                value: "0".to_string(),
            });
        }
        Ok(secs)
    }

    async fn get_credit_successors(&self) -> ConfigResult<bool> {
        let value = self.get_config_or_default(config_keys::CREDIT_SUCCESSORS, "false")?;
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: config_keys::CREDIT_SUCCESSORS.to_string(),
                value,
            }),
        }
    }

    async fn get_utilization_chart_size(&self) -> ConfigResult<usize> {
        self.get_parsed(config_keys::UTILIZATION_CHART_SIZE, "6")
    }

    async fn get_locale(&self) -> ConfigResult<String> {
        self.get_config_or_default(config_keys::LOCALE, "en")
    }

    async fn get_assistant_model(&self) -> ConfigResult<String> {
        self.get_config_or_default(config_keys::ASSISTANT_MODEL, "gemini-3-pro-preview")
    }

    async fn get_assistant_temperature(&self) -> ConfigResult<f32> {
        let t: f32 = self.get_parsed(config_keys::ASSISTANT_TEMPERATURE, "0.3")?;
        if !(0.0..=2.0).contains(&t) {
            return Err(ConfigError::InvalidValue {
                key: config_keys::ASSISTANT_TEMPERATURE.to_string(),
                value: t.to_string(),
            });
        }
        Ok(t)
    }
}

// ==========================================
// PlanningSettings - resolved values
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct PlanningSettings {
    pub refresh_interval: Duration,
    pub credit_successors: bool,
    pub utilization_chart_size: usize,
    pub locale: String,
    pub assistant_model: String,
    pub assistant_temperature: f32,
}

impl Default for PlanningSettings {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
            credit_successors: false,
            utilization_chart_size: 6,
            locale: "en".to_string(),
            assistant_model: "gemini-3-pro-preview".to_string(),
            assistant_temperature: 0.3,
        }
    }
}

impl PlanningSettings {
    pub async fn load(reader: &dyn PlanningConfigReader) -> ConfigResult<Self> {
        Ok(Self {
            refresh_interval: Duration::from_secs(reader.get_refresh_interval_secs().await?),
            credit_successors: reader.get_credit_successors().await?,
            utilization_chart_size: reader.get_utilization_chart_size().await?,
            locale: reader.get_locale().await?,
            assistant_model: reader.get_assistant_model().await?,
            assistant_temperature: reader.get_assistant_temperature().await?,
        })
    }

    /// Default evaluator options (all locations)
    pub fn evaluation_options(&self) -> EvaluationOptions {
        let substitution = if self.credit_successors {
            SubstitutionPolicy::CreditSuccessors
        } else {
            SubstitutionPolicy::PrimaryOnly
        };
        EvaluationOptions {
            substitution,
            ..EvaluationOptions::default()
        }
    }
}

// ==========================================
// Config keys
// ==========================================
pub mod config_keys {
    // snapshot refresh
    pub const REFRESH_INTERVAL_SECS: &str = "refresh_interval_secs";

    // build feasibility
    pub const CREDIT_SUCCESSORS: &str = "credit_successors";
    pub const UTILIZATION_CHART_SIZE: &str = "utilization_chart_size";

    // assistant
    pub const LOCALE: &str = "locale";
    pub const ASSISTANT_MODEL: &str = "assistant_model";
    pub const ASSISTANT_TEMPERATURE: &str = "assistant_temperature";
}
