// ==========================================
// Voltway Industrial OS - Shortage detector
// ==========================================
// Input: CatalogSnapshot
// Output: StockAlert list, sorted by part id (then location)
// Rule: a part is short iff it has a ReorderConfig and
//       quantity_available <= minimum_stock_threshold
// ==========================================

use crate::domain::reorder::ReorderConfig;
use crate::snapshot::catalog::{CatalogSnapshot, StockScope};
use serde::Serialize;
use std::collections::BTreeSet;

/// Shortage predicate; no configuration means never short
///
/// # Arguments
/// - `quantity_available`: stock to test
/// - `config`: reorder configuration of the part, if any
///
/// # Returns
/// true when a threshold exists and `quantity_available` is at or below it
pub fn is_short(quantity_available: u64, config: Option<&ReorderConfig>) -> bool {
    match config {
        Some(cfg) => quantity_available <= cfg.minimum_stock_threshold,
        None => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockAlert {
    pub part_id: String,
    pub part_name: String,
    /// None for the part-level (all locations) view
    pub location: Option<String>,
    pub quantity_available: u64,
    pub minimum_stock_threshold: u64,
    pub reorder_quantity: Option<u64>,
}

impl StockAlert {
    fn new(
        snapshot: &CatalogSnapshot,
        config: &ReorderConfig,
        location: Option<String>,
        quantity_available: u64,
    ) -> Self {
        let part_name = snapshot
            .part(&config.part_id)
            .map(|p| p.part_name.clone())
            .unwrap_or_else(|| config.part_id.clone());
        Self {
            part_id: config.part_id.clone(),
            part_name,
            location,
            quantity_available,
            minimum_stock_threshold: config.minimum_stock_threshold,
            reorder_quantity: config.reorder_quantity,
        }
    }

    /// Units missing to get back above the threshold
    pub fn deficit(&self) -> u64 {
        (self.minimum_stock_threshold + 1).saturating_sub(self.quantity_available)
    }
}

// ==========================================
// ShortageDetector
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ShortageDetector;

impl ShortageDetector {
    pub fn new() -> Self {
        Self
    }

    /// Part-level view: stock summed over every location
    ///
    /// Configured parts without any stock row are evaluated at 0.
    ///
    /// # Arguments
    /// - `snapshot`: catalog view captured before the call
    ///
    /// # Returns
    /// One StockAlert per short part, sorted by part id; `location` is None
    pub fn detect(&self, snapshot: &CatalogSnapshot) -> Vec<StockAlert> {
        let mut part_ids: BTreeSet<&str> = snapshot.stocked_part_ids().into_iter().collect();
        part_ids.extend(snapshot.reorder_configs().map(|c| c.part_id.as_str()));

        let alerts: Vec<StockAlert> = part_ids
            .into_iter()
            .filter_map(|part_id| {
                let config = snapshot.reorder_config(part_id)?;
                let qty = snapshot.stock_for(part_id, &StockScope::AllLocations);
                is_short(qty, Some(config)).then(|| StockAlert::new(snapshot, config, None, qty))
            })
            .collect();

        tracing::debug!(alerts = alerts.len(), "part-level shortage detection");
        alerts
    }

    /// Location-level view: each stock record on its own
    ///
    /// # Returns
    /// One StockAlert per short (part, location), sorted by part then location
    pub fn detect_by_location(&self, snapshot: &CatalogSnapshot) -> Vec<StockAlert> {
        let mut alerts: Vec<StockAlert> = snapshot
            .stock_rows()
            .iter()
            .filter_map(|record| {
                let config = snapshot.reorder_config(&record.part_id)?;
                let qty = record.quantity_available.max(0) as u64;
                is_short(qty, Some(config)).then(|| {
                    StockAlert::new(snapshot, config, Some(record.location.clone()), qty)
                })
            })
            .collect();

        alerts.sort_by(|a, b| {
            a.part_id
                .cmp(&b.part_id)
                .then_with(|| a.location.cmp(&b.location))
        });
        alerts
    }
}
