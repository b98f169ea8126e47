// ==========================================
// Voltway Industrial OS - Reorder configuration
// ==========================================
// Table: dispatch_parameters (config_data is a JSON blob)
// Boundary: the blob is parsed into ReorderConfig when a snapshot is built
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Raw per-part dispatch parameters as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispatchParameter {
    pub part_id: String,
    pub config_data: Value,
    pub updated_at: NaiveDate,
}

/// Typed reorder policy for one part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderConfig {
    pub part_id: String,
    pub minimum_stock_threshold: u64,
    pub reorder_quantity: Option<u64>,
    pub reorder_interval_days: Option<u32>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderConfigError {
    #[error("config_data for part {part_id} is not a JSON object")]
    NotAnObject { part_id: String },

    #[error("config_data for part {part_id} has no minimum stock threshold")]
    MissingThreshold { part_id: String },

    #[error("config_data for part {part_id}: field {field} must be a non-negative integer")]
    InvalidField { part_id: String, field: String },
}

// Accepted spellings, canonical name first
const THRESHOLD_KEYS: [&str; 2] = ["minimum_stock_threshold", "min_stock"];
const REORDER_QTY_KEYS: [&str; 2] = ["reorder_quantity", "reorder_qty"];
const INTERVAL_KEYS: [&str; 1] = ["reorder_interval_days"];

impl ReorderConfig {
    pub fn new(part_id: &str, minimum_stock_threshold: u64) -> Self {
        Self {
            part_id: part_id.to_string(),
            minimum_stock_threshold,
            reorder_quantity: None,
            reorder_interval_days: None,
        }
    }

    pub fn with_reorder_quantity(mut self, qty: u64) -> Self {
        self.reorder_quantity = Some(qty);
        self
    }

    /// Parse the dynamic `config_data` blob
    ///
    /// A missing threshold is an error rather than an implicit zero.
    pub fn from_dispatch(param: &DispatchParameter) -> Result<Self, ReorderConfigError> {
        let part_id = param.part_id.as_str();
        let obj = param
            .config_data
            .as_object()
            .ok_or_else(|| ReorderConfigError::NotAnObject {
                part_id: part_id.to_string(),
            })?;

        let minimum_stock_threshold = read_u64(obj, part_id, &THRESHOLD_KEYS)?.ok_or_else(|| {
            ReorderConfigError::MissingThreshold {
                part_id: part_id.to_string(),
            }
        })?;
        let reorder_quantity = read_u64(obj, part_id, &REORDER_QTY_KEYS)?;
        let reorder_interval_days = read_u64(obj, part_id, &INTERVAL_KEYS)?
            .map(|d| {
                u32::try_from(d).map_err(|_| ReorderConfigError::InvalidField {
                    part_id: part_id.to_string(),
                    field: INTERVAL_KEYS[0].to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            part_id: part_id.to_string(),
            minimum_stock_threshold,
            reorder_quantity,
            reorder_interval_days,
        })
    }

    /// Serialize back to the canonical blob layout
    pub fn to_config_data(&self) -> Value {
        let mut obj = serde_json::Map::new();
        obj.insert(
            THRESHOLD_KEYS[0].to_string(),
            Value::from(self.minimum_stock_threshold),
        );
        if let Some(q) = self.reorder_quantity {
            obj.insert(REORDER_QTY_KEYS[0].to_string(), Value::from(q));
        }
        if let Some(d) = self.reorder_interval_days {
            obj.insert(INTERVAL_KEYS[0].to_string(), Value::from(d));
        }
        Value::Object(obj)
    }
}

fn read_u64(
    obj: &serde_json::Map<String, Value>,
    part_id: &str,
    keys: &[&str],
) -> Result<Option<u64>, ReorderConfigError> {
    for key in keys {
        match obj.get(*key) {
            None | Some(Value::Null) => continue,
            Some(v) => {
                return v.as_u64().map(Some).ok_or_else(|| ReorderConfigError::InvalidField {
                    part_id: part_id.to_string(),
                    field: key.to_string(),
                })
            }
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn param(data: Value) -> DispatchParameter {
        DispatchParameter {
            part_id: "P300".to_string(),
            config_data: data,
            updated_at: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
        }
    }

    #[test]
    fn test_parse_legacy_field_names() {
        let cfg = ReorderConfig::from_dispatch(&param(json!({"min_stock": 50, "reorder_qty": 100})))
            .unwrap();
        assert_eq!(cfg.minimum_stock_threshold, 50);
        assert_eq!(cfg.reorder_quantity, Some(100));
        assert_eq!(cfg.reorder_interval_days, None);
    }

    #[test]
    fn test_parse_canonical_field_names() {
        let cfg = ReorderConfig::from_dispatch(&param(json!({
            "minimum_stock_threshold": 0,
            "reorder_quantity": 20,
            "reorder_interval_days": 14
        })))
        .unwrap();
        assert_eq!(cfg.minimum_stock_threshold, 0);
        assert_eq!(cfg.reorder_interval_days, Some(14));
    }

    #[test]
    fn test_missing_threshold_is_not_zero() {
        let err = ReorderConfig::from_dispatch(&param(json!({"reorder_qty": 100}))).unwrap_err();
        assert!(matches!(err, ReorderConfigError::MissingThreshold { .. }));
    }

    #[test]
    fn test_negative_threshold_rejected() {
        let err = ReorderConfig::from_dispatch(&param(json!({"min_stock": -5}))).unwrap_err();
        assert!(matches!(err, ReorderConfigError::InvalidField { .. }));

        let err = ReorderConfig::from_dispatch(&param(json!([1, 2]))).unwrap_err();
        assert!(matches!(err, ReorderConfigError::NotAnObject { .. }));
    }

    #[test]
    fn test_round_trip_through_blob() {
        let cfg = ReorderConfig::new("P300", 50).with_reorder_quantity(100);
        let parsed = ReorderConfig::from_dispatch(&param(cfg.to_config_data())).unwrap();
        assert_eq!(parsed, cfg);
    }
}
