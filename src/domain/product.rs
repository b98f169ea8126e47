// ==========================================
// Voltway Industrial OS - Product & BOM
// ==========================================
// Tables: products, bom
// ==========================================

use serde::{Deserialize, Serialize};

/// Product definition (model + version)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,   // e.g. S1_V1
    pub model: String,        // S1
    pub version: String,      // V1
    pub product_name: String, // Voltway S1 Standard
}

/// One bill-of-materials line, keyed by (product_id, part_id)
///
/// `quantity` is kept as the raw stored value; lines with a non-positive
/// quantity are rejected when a snapshot is built.
impl Product {
    pub fn new(product_id: &str, model: &str, version: &str, product_name: &str) -> Self {
        Self {
            product_id: product_id.to_string(),
            model: model.to_string(),
            version: version.to_string(),
            product_name: product_name.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    pub product_id: String,
    pub part_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BomLine {
    pub fn new(product_id: &str, part_id: &str, quantity: i64) -> Self {
        Self {
            product_id: product_id.to_string(),
            part_id: part_id.to_string(),
            quantity,
            notes: None,
        }
    }
}
