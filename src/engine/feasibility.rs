// ==========================================
// Voltway Industrial OS - Build-feasibility evaluator
// ==========================================
// Input: CatalogSnapshot + EvaluationOptions
// Output: BuildPotential (units, per-line breakdown, bottleneck)
// Rule: units = min over BOM lines of floor(available / quantity)
// Rule: empty BOM → 0; missing stock → 0 for that part
// Rule: BOM part missing from the part master → NotFound, never 0
// Rule: successor crediting is one level deep, self references ignored
// ==========================================

use crate::engine::error::{EngineError, EngineResult};
use crate::snapshot::catalog::{BomRequirement, CatalogSnapshot, StockScope};
use serde::{Deserialize, Serialize};

/// Whether successor parts may stand in for a BOM part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubstitutionPolicy {
    #[default]
    PrimaryOnly,
    CreditSuccessors,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EvaluationOptions {
    pub substitution: SubstitutionPolicy,
    pub scope: StockScope,
}

impl EvaluationOptions {
    pub fn crediting_successors() -> Self {
        Self {
            substitution: SubstitutionPolicy::CreditSuccessors,
            scope: StockScope::AllLocations,
        }
    }

    pub fn at_location(mut self, location: &str) -> Self {
        self.scope = StockScope::Location(location.to_string());
        self
    }
}

/// One BOM line's contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineCapacity {
    pub part_id: String,
    pub quantity_per_unit: u64,
    pub primary_available: u64,
    /// Successor stock counted toward this line (0 under PrimaryOnly)
    pub credited_available: u64,
    pub credited_from: Vec<String>,
    pub buildable_units: u64,
}

impl LineCapacity {
    pub fn total_available(&self) -> u64 {
        self.primary_available + self.credited_available
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildPotential {
    pub product_id: String,
    pub buildable_units: u64,
    /// Part of the first line reaching the minimum; None for an empty BOM
    pub bottleneck_part: Option<String>,
    pub lines: Vec<LineCapacity>,
}

// ==========================================
// BuildFeasibilityEvaluator
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildFeasibilityEvaluator;

impl BuildFeasibilityEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Maximum whole units of one product buildable from snapshot stock
    ///
    /// # Arguments
    /// - `snapshot`: catalog view captured before the call
    /// - `product_id`: product to evaluate
    /// - `options`: substitution policy and stock scope
    ///
    /// # Returns
    /// BuildPotential with the per-line breakdown and the bottleneck part
    ///
    /// # Errors
    /// - `NotFound` (Product): product not in the snapshot
    /// - `MalformedBomLine`: a line of this product has quantity <= 0
    /// - `NotFound` (Part): a line names a part missing from the part master
    pub fn evaluate(
        &self,
        snapshot: &CatalogSnapshot,
        product_id: &str,
        options: &EvaluationOptions,
    ) -> EngineResult<BuildPotential> {
        if snapshot.product(product_id).is_none() {
            return Err(EngineError::NotFound {
                entity: "Product".to_string(),
                id: product_id.to_string(),
            });
        }

        if let Some(bad) = snapshot.malformed_lines(product_id).first() {
            return Err(EngineError::MalformedBomLine {
                product_id: product_id.to_string(),
                part_id: bad.part_id.clone(),
                quantity: bad.quantity,
            });
        }

        if let Some(part_id) = snapshot.unknown_bom_parts(product_id).first() {
            return Err(EngineError::NotFound {
                entity: "Part".to_string(),
                id: part_id.clone(),
            });
        }

        let lines: Vec<LineCapacity> = snapshot
            .bom_lines(product_id)
            .iter()
            .map(|req| line_capacity(snapshot, req, options))
            .collect();

        let bottleneck = lines.iter().min_by_key(|l| l.buildable_units);
        let buildable_units = bottleneck.map(|l| l.buildable_units).unwrap_or(0);
        let bottleneck_part = bottleneck.map(|l| l.part_id.clone());

        tracing::debug!(
            product_id,
            buildable_units,
            bottleneck = ?bottleneck_part,
            "build potential evaluated"
        );

        Ok(BuildPotential {
            product_id: product_id.to_string(),
            buildable_units,
            bottleneck_part,
            lines,
        })
    }

    /// Every product in id order; one failure does not hide the others
    ///
    /// # Returns
    /// (product_id, result) pairs; failures are also logged at `warn`
    pub fn evaluate_all(
        &self,
        snapshot: &CatalogSnapshot,
        options: &EvaluationOptions,
    ) -> Vec<(String, EngineResult<BuildPotential>)> {
        snapshot
            .products()
            .map(|p| {
                let result = self.evaluate(snapshot, &p.product_id, options);
                if let Err(e) = &result {
                    tracing::warn!(product_id = %p.product_id, error = %e, "product not evaluable");
                }
                (p.product_id.clone(), result)
            })
            .collect()
    }
}

fn line_capacity(
    snapshot: &CatalogSnapshot,
    req: &BomRequirement,
    options: &EvaluationOptions,
) -> LineCapacity {
    let primary_available = snapshot.stock_for(&req.part_id, &options.scope);

    let mut credited_from: Vec<String> = Vec::new();
    if options.substitution == SubstitutionPolicy::CreditSuccessors {
        if let Some(part) = snapshot.part(&req.part_id) {
            for successor in &part.successor_parts {
                if successor != &req.part_id && !credited_from.contains(successor) {
                    credited_from.push(successor.clone());
                }
            }
        }
    }
    let credited_available: u64 = credited_from
        .iter()
        .map(|s| snapshot.stock_for(s, &options.scope))
        .sum();

    let quantity_per_unit = req.quantity.get();
    LineCapacity {
        part_id: req.part_id.clone(),
        quantity_per_unit,
        primary_available,
        credited_available,
        credited_from,
        buildable_units: (primary_available + credited_available) / quantity_per_unit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::part::Part;
    use crate::domain::product::{BomLine, Product};
    use crate::domain::stock::StockRecord;
    use crate::seed::demo_catalog_data;
    use crate::snapshot::catalog::CatalogData;

    fn set_stock(data: &mut CatalogData, part_id: &str, qty: i64) {
        data.stock.retain(|r| r.part_id != part_id);
        data.stock.push(StockRecord::new(part_id, "WH1", qty));
    }

    fn units(snapshot: &CatalogSnapshot, product_id: &str, options: &EvaluationOptions) -> u64 {
        BuildFeasibilityEvaluator::new()
            .evaluate(snapshot, product_id, options)
            .unwrap()
            .buildable_units
    }

    #[test]
    fn test_demo_s1_v1_builds_45() {
        let snapshot = CatalogSnapshot::build(demo_catalog_data());
        let potential = BuildFeasibilityEvaluator::new()
            .evaluate(&snapshot, "S1_V1", &EvaluationOptions::default())
            .unwrap();
        // P300: 158, P301: 45, P337: 4500 / 12 = 375
        assert_eq!(potential.buildable_units, 45);
        assert_eq!(potential.bottleneck_part.as_deref(), Some("P301"));
        assert_eq!(potential.lines.len(), 3);
    }

    #[test]
    fn test_zero_stock_blocks_build() {
        let mut data = demo_catalog_data();
        set_stock(&mut data, "P301", 0);
        let snapshot = CatalogSnapshot::build(data);
        assert_eq!(units(&snapshot, "S1_V1", &EvaluationOptions::default()), 0);
    }

    #[test]
    fn test_successor_stock_credited() {
        let mut data = demo_catalog_data();
        set_stock(&mut data, "P300", 10);
        set_stock(&mut data, "P304", 20);
        let snapshot = CatalogSnapshot::build(data);

        assert_eq!(units(&snapshot, "S1_V1", &EvaluationOptions::default()), 10);

        let credited = BuildFeasibilityEvaluator::new()
            .evaluate(&snapshot, "S1_V1", &EvaluationOptions::crediting_successors())
            .unwrap();
        assert_eq!(credited.buildable_units, 30);
        assert_eq!(credited.bottleneck_part.as_deref(), Some("P300"));
        let motor = &credited.lines[0];
        assert_eq!(motor.credited_from, vec!["P304".to_string()]);
        assert_eq!(motor.total_available(), 30);
    }

    #[test]
    fn test_dangling_successor_credits_nothing() {
        // P301 lists P305, which is not in the part master
        let snapshot = CatalogSnapshot::build(demo_catalog_data());
        assert_eq!(
            units(&snapshot, "S1_V1", &EvaluationOptions::crediting_successors()),
            45
        );
    }

    #[test]
    fn test_self_and_duplicate_successors_ignored() {
        let mut data = demo_catalog_data();
        data.parts.retain(|p| p.part_id != "P300");
        data.parts
            .push(Part::new("P300", "500W Brushless Motor", "assembly", 3.79)
                .with_successors(&["P300", "P304", "P304"]));
        set_stock(&mut data, "P300", 10);
        set_stock(&mut data, "P304", 20);
        let snapshot = CatalogSnapshot::build(data);
        assert_eq!(
            units(&snapshot, "S1_V1", &EvaluationOptions::crediting_successors()),
            30
        );
    }

    #[test]
    fn test_successors_not_transitive() {
        let mut data = demo_catalog_data();
        data.parts.retain(|p| p.part_id != "P304");
        data.parts.push(
            Part::new("P304", "750W Brushless Motor", "assembly", 3.31).with_successors(&["P303"]),
        );
        set_stock(&mut data, "P300", 10);
        set_stock(&mut data, "P304", 0);
        data.stock.push(StockRecord::new("P303", "WH1", 500));
        let snapshot = CatalogSnapshot::build(data);
        assert_eq!(
            units(&snapshot, "S1_V1", &EvaluationOptions::crediting_successors()),
            10
        );
    }

    #[test]
    fn test_empty_bom_is_zero() {
        let mut data = demo_catalog_data();
        data.products
            .push(Product::new("S2_V1", "S2", "V1", "Voltway S2 Concept"));
        let snapshot = CatalogSnapshot::build(data);
        let potential = BuildFeasibilityEvaluator::new()
            .evaluate(&snapshot, "S2_V1", &EvaluationOptions::default())
            .unwrap();
        assert_eq!(potential.buildable_units, 0);
        assert!(potential.bottleneck_part.is_none());
    }

    #[test]
    fn test_unknown_product_not_found() {
        let snapshot = CatalogSnapshot::build(demo_catalog_data());
        let err = BuildFeasibilityEvaluator::new()
            .evaluate(&snapshot, "S9_V9", &EvaluationOptions::default())
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn test_malformed_line_only_fails_its_product() {
        let mut data = demo_catalog_data();
        data.bom_lines.push(BomLine::new("S1_V2", "P338", 0));
        let snapshot = CatalogSnapshot::build(data);
        let results = BuildFeasibilityEvaluator::new()
            .evaluate_all(&snapshot, &EvaluationOptions::default());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "S1_V1");
        assert_eq!(results[0].1.as_ref().unwrap().buildable_units, 45);
        assert!(matches!(
            results[1].1,
            Err(EngineError::MalformedBomLine { quantity: 0, .. })
        ));
    }

    #[test]
    fn test_location_scope() {
        let mut data = demo_catalog_data();
        data.stock.push(StockRecord::new("P301", "WH2", 100));
        let snapshot = CatalogSnapshot::build(data);

        assert_eq!(units(&snapshot, "S1_V1", &EvaluationOptions::default()), 145);
        let wh1 = EvaluationOptions::default().at_location("WH1");
        assert_eq!(units(&snapshot, "S1_V1", &wh1), 45);
        let wh2 = EvaluationOptions::default().at_location("WH2");
        assert_eq!(units(&snapshot, "S1_V1", &wh2), 0);
    }

    #[test]
    fn test_repeated_evaluation_is_stable() {
        let snapshot = CatalogSnapshot::build(demo_catalog_data());
        let evaluator = BuildFeasibilityEvaluator::new();
        let options = EvaluationOptions::crediting_successors();
        let first = evaluator.evaluate(&snapshot, "S1_V2", &options).unwrap();
        let second = evaluator.evaluate(&snapshot, "S1_V2", &options).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_more_stock_never_lowers_potential() {
        let base = CatalogSnapshot::build(demo_catalog_data());
        let mut data = demo_catalog_data();
        set_stock(&mut data, "P337", 9000);
        let more = CatalogSnapshot::build(data);
        let options = EvaluationOptions::default();
        assert!(units(&more, "S1_V1", &options) >= units(&base, "S1_V1", &options));
    }
}
