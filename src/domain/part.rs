// ==========================================
// Voltway Industrial OS - Part (material master)
// ==========================================
// Table: materials
// ==========================================

use serde::{Deserialize, Serialize};

/// Part master record
///
/// `successor_parts` lists engineering-change replacements that may stand in
/// for this part. References are advisory: nothing guarantees they exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    // ===== Key =====
    pub part_id: String,

    // ===== Master data =====
    pub part_name: String,
    pub part_type: String, // assembly / hardware / ...
    #[serde(default)]
    pub dimensions: Option<String>,
    pub weight: f64, // kg

    // ===== Engineering change =====
    /// Advisory; listed in the assistant context, never read by the evaluator
    #[serde(default)]
    pub blocked_parts: Vec<String>,
    #[serde(default)]
    pub successor_parts: Vec<String>,

    #[serde(default)]
    pub comment: Option<String>,
}

impl Part {
    pub fn new(part_id: &str, part_name: &str, part_type: &str, weight: f64) -> Self {
        Self {
            part_id: part_id.to_string(),
            part_name: part_name.to_string(),
            part_type: part_type.to_string(),
            dimensions: None,
            weight,
            blocked_parts: Vec::new(),
            successor_parts: Vec::new(),
            comment: None,
        }
    }

    pub fn with_successors(mut self, successors: &[&str]) -> Self {
        self.successor_parts = successors.iter().map(|s| s.to_string()).collect();
        self
    }

    /// First word of the display name, used for compact chart labels
    pub fn short_name(&self) -> &str {
        self.part_name.split_whitespace().next().unwrap_or(&self.part_id)
    }
}
