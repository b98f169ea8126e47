// ==========================================
// Voltway Industrial OS - Stock
// ==========================================
// Tables: warehouses, stock, stock_movements
// ==========================================

use crate::domain::types::MovementType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Stock on hand for one part at one location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub part_id: String,
    pub location: String,
    pub quantity_available: i64,
}

impl StockRecord {
    pub fn new(part_id: &str, location: &str, quantity_available: i64) -> Self {
        Self {
            part_id: part_id.to_string(),
            location: location.to_string(),
            quantity_available,
        }
    }
}

/// Inbound/outbound stock booking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockMovement {
    pub movement_id: String, // uuid v4
    pub date: NaiveDate,
    pub part_id: String,
    pub location: String,
    pub movement_type: MovementType,
    pub quantity: i64,
}

impl StockMovement {
    pub fn new(
        date: NaiveDate,
        part_id: &str,
        location: &str,
        movement_type: MovementType,
        quantity: i64,
    ) -> Self {
        Self {
            movement_id: uuid::Uuid::new_v4().to_string(),
            date,
            part_id: part_id.to_string(),
            location: location.to_string(),
            movement_type,
            quantity,
        }
    }

    /// Signed effect on the stock record
    pub fn signed_quantity(&self) -> i64 {
        match self.movement_type {
            MovementType::Inbound => self.quantity,
            MovementType::Outbound => -self.quantity,
        }
    }
}
