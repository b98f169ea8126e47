// ==========================================
// Voltway Industrial OS - Planning metrics
// ==========================================
// Derived aggregates for the dashboard cards and chart
// Input: CatalogSnapshot (+ results of the two core engines)
// ==========================================

use crate::engine::feasibility::{BuildFeasibilityEvaluator, EvaluationOptions};
use crate::engine::shortage::ShortageDetector;
use crate::snapshot::catalog::CatalogSnapshot;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardCards {
    pub critical_stockouts: usize,
    pub pending_deliveries: usize,
    pub open_order_units: u64,
    pub active_suppliers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitBuildCost {
    pub product_id: String,
    pub unit_cost: f64,
    /// BOM parts without any supplier offer (counted as 0)
    pub unpriced_parts: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueAtRisk {
    pub product_id: String,
    pub buildable_units: u64,
    pub open_units: u64,
    pub unserved_units: u64,
    pub unit_cost: f64,
    pub value_at_risk: f64,
    /// Open orders (requested-date order) that cannot be fully served
    pub affected_orders: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UtilizationBar {
    pub part_id: String,
    pub name: String,
    pub quantity: u64,
    pub threshold: u64,
    pub below_threshold: bool,
}

pub fn pending_deliveries(snapshot: &CatalogSnapshot) -> usize {
    snapshot
        .purchase_orders()
        .iter()
        .filter(|po| po.is_pending())
        .count()
}

pub fn open_order_units(snapshot: &CatalogSnapshot) -> u64 {
    snapshot
        .sales_orders()
        .iter()
        .filter(|so| so.is_open())
        .map(|so| so.quantity.max(0) as u64)
        .sum()
}

pub fn active_suppliers(snapshot: &CatalogSnapshot) -> usize {
    snapshot
        .supplier_offers()
        .iter()
        .map(|o| o.supplier_id.as_str())
        .collect::<BTreeSet<_>>()
        .len()
}

pub fn dashboard_cards(snapshot: &CatalogSnapshot) -> DashboardCards {
    DashboardCards {
        critical_stockouts: ShortageDetector::new().detect(snapshot).len(),
        pending_deliveries: pending_deliveries(snapshot),
        open_order_units: open_order_units(snapshot),
        active_suppliers: active_suppliers(snapshot),
    }
}

/// Cheapest offer price × quantity, summed over accepted BOM lines
///
/// # Arguments
/// - `snapshot`: catalog view with the supplier offers
/// - `product_id`: product whose accepted BOM lines are priced
///
/// # Returns
/// UnitBuildCost; parts without an offer add 0 and are listed as unpriced
pub fn unit_build_cost(snapshot: &CatalogSnapshot, product_id: &str) -> UnitBuildCost {
    let mut unit_cost = 0.0;
    let mut unpriced_parts = Vec::new();

    for req in snapshot.bom_lines(product_id) {
        let cheapest = snapshot
            .offers_for(&req.part_id)
            .iter()
            .map(|o| o.price_per_unit)
            .min_by(|a, b| a.total_cmp(b));
        match cheapest {
            Some(price) => unit_cost += price * req.quantity.get() as f64,
            None => unpriced_parts.push(req.part_id.clone()),
        }
    }

    UnitBuildCost {
        product_id: product_id.to_string(),
        unit_cost,
        unpriced_parts,
    }
}

/// Serve open sales orders from build potential in requested-date order
///
/// Products that cannot be evaluated are skipped (and logged by the evaluator).
///
/// # Returns
/// Per-product unserved units and their value at unit build cost
pub fn revenue_at_risk(
    snapshot: &CatalogSnapshot,
    options: &EvaluationOptions,
) -> Vec<RevenueAtRisk> {
    let mut orders_by_product: HashMap<&str, Vec<_>> = HashMap::new();
    for so in snapshot.sales_orders().iter().filter(|so| so.is_open()) {
        orders_by_product
            .entry(so.product_id.as_str())
            .or_default()
            .push(so);
    }

    let evaluator = BuildFeasibilityEvaluator::new();
    let mut out = Vec::new();
    for (product_id, result) in evaluator.evaluate_all(snapshot, options) {
        let Ok(potential) = result else { continue };
        let Some(orders) = orders_by_product.get_mut(product_id.as_str()) else {
            continue;
        };
        orders.sort_by(|a, b| {
            a.requested_date
                .cmp(&b.requested_date)
                .then_with(|| a.sales_order_id.cmp(&b.sales_order_id))
        });

        let mut remaining = potential.buildable_units;
        let mut open_units = 0;
        let mut affected_orders = Vec::new();
        for so in orders.iter() {
            let qty = so.quantity.max(0) as u64;
            open_units += qty;
            if qty > remaining {
                affected_orders.push(so.sales_order_id.clone());
            }
            remaining = remaining.saturating_sub(qty);
        }

        let unserved_units = open_units.saturating_sub(potential.buildable_units);
        let unit_cost = unit_build_cost(snapshot, &product_id).unit_cost;
        out.push(RevenueAtRisk {
            product_id,
            buildable_units: potential.buildable_units,
            open_units,
            unserved_units,
            unit_cost,
            value_at_risk: unserved_units as f64 * unit_cost,
            affected_orders,
        });
    }
    out
}

/// First `limit` stock rows as chart bars
pub fn utilization_chart(snapshot: &CatalogSnapshot, limit: usize) -> Vec<UtilizationBar> {
    snapshot
        .stock_rows()
        .iter()
        .take(limit)
        .map(|record| {
            let name = snapshot
                .part(&record.part_id)
                .map(|p| p.short_name().to_string())
                .unwrap_or_else(|| record.part_id.clone());
            let threshold = snapshot
                .reorder_config(&record.part_id)
                .map(|c| c.minimum_stock_threshold)
                .unwrap_or(0);
            let quantity = record.quantity_available.max(0) as u64;
            UtilizationBar {
                part_id: record.part_id.clone(),
                name,
                quantity,
                threshold,
                below_threshold: quantity < threshold,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::stock::StockRecord;
    use crate::seed::demo_catalog_data;

    #[test]
    fn test_demo_cards() {
        let snapshot = CatalogSnapshot::build(demo_catalog_data());
        let cards = dashboard_cards(&snapshot);
        assert_eq!(cards.critical_stockouts, 0);
        assert_eq!(cards.pending_deliveries, 1);
        assert_eq!(cards.open_order_units, 20);
        assert_eq!(cards.active_suppliers, 2);
    }

    #[test]
    fn test_unit_cost_uses_cheapest_offer() {
        let snapshot = CatalogSnapshot::build(demo_catalog_data());
        let cost = unit_build_cost(&snapshot, "S1_V2");
        // P304 at 185.00 + P301 at 245.50; P337 has no offer
        assert!((cost.unit_cost - 430.5).abs() < 1e-9);
        assert_eq!(cost.unpriced_parts, vec!["P337".to_string()]);
    }

    #[test]
    fn test_revenue_at_risk_when_short() {
        let mut data = demo_catalog_data();
        data.stock.retain(|r| r.part_id != "P301");
        data.stock.push(StockRecord::new("P301", "WH1", 15));
        let snapshot = CatalogSnapshot::build(data);

        let risk = revenue_at_risk(&snapshot, &EvaluationOptions::default());
        assert_eq!(risk.len(), 1);
        let s1 = &risk[0];
        assert_eq!(s1.product_id, "S1_V1");
        assert_eq!(s1.buildable_units, 15);
        assert_eq!(s1.unserved_units, 5);
        assert_eq!(s1.affected_orders, vec!["SO-1001".to_string()]);
        // only P301 is priced for S1_V1
        assert!((s1.value_at_risk - 5.0 * 245.5).abs() < 1e-9);
    }

    #[test]
    fn test_utilization_chart_short_names() {
        let snapshot = CatalogSnapshot::build(demo_catalog_data());
        let bars = utilization_chart(&snapshot, 6);
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[0].name, "500W");
        assert_eq!(bars[0].threshold, 50);
        assert!(!bars[0].below_threshold);
        assert_eq!(bars[1].threshold, 0);

        assert_eq!(utilization_chart(&snapshot, 2).len(), 2);
    }
}
