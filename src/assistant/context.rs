// ==========================================
// Voltway Industrial OS - Assistant planning context
// ==========================================
// Numeric summary of one snapshot, rendered into the system instruction
// ==========================================

use crate::engine::feasibility::{BuildFeasibilityEvaluator, EvaluationOptions};
use crate::engine::metrics;
use crate::engine::shortage::{ShortageDetector, StockAlert};
use crate::i18n::{t, t_with_args};
use crate::snapshot::catalog::CatalogSnapshot;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductBuildSummary {
    pub product_id: String,
    pub buildable_units: Option<u64>,
    pub bottleneck_part: Option<String>,
    /// Set when the product could not be evaluated
    pub error: Option<String>,
}

/// Engineering-change block listed on a part master record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockedPartSummary {
    pub part_id: String,
    pub blocked: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningContext {
    pub part_count: usize,
    pub product_count: usize,
    pub bom_line_count: usize,
    pub build_potentials: Vec<ProductBuildSummary>,
    pub shortages: Vec<StockAlert>,
    /// Advisory only, never consulted by the evaluator
    pub blocked_parts: Vec<BlockedPartSummary>,
    pub pending_deliveries: usize,
    pub open_order_units: u64,
    pub active_suppliers: usize,
}

impl PlanningContext {
    pub fn from_snapshot(snapshot: &CatalogSnapshot, options: &EvaluationOptions) -> Self {
        let build_potentials = BuildFeasibilityEvaluator::new()
            .evaluate_all(snapshot, options)
            .into_iter()
            .map(|(product_id, result)| match result {
                Ok(p) => ProductBuildSummary {
                    product_id,
                    buildable_units: Some(p.buildable_units),
                    bottleneck_part: p.bottleneck_part,
                    error: None,
                },
                Err(e) => ProductBuildSummary {
                    product_id,
                    buildable_units: None,
                    bottleneck_part: None,
                    error: Some(e.to_string()),
                },
            })
            .collect();

        let mut blocked_parts: Vec<BlockedPartSummary> = snapshot
            .parts()
            .filter(|p| !p.blocked_parts.is_empty())
            .map(|p| BlockedPartSummary {
                part_id: p.part_id.clone(),
                blocked: p.blocked_parts.clone(),
            })
            .collect();
        blocked_parts.sort_by(|a, b| a.part_id.cmp(&b.part_id));

        Self {
            part_count: snapshot.part_count(),
            product_count: snapshot.product_count(),
            bom_line_count: snapshot.bom_line_count(),
            build_potentials,
            shortages: ShortageDetector::new().detect(snapshot),
            blocked_parts,
            pending_deliveries: metrics::pending_deliveries(snapshot),
            open_order_units: metrics::open_order_units(snapshot),
            active_suppliers: metrics::active_suppliers(snapshot),
        }
    }

    /// Context block in the current locale, one fact per line
    pub fn render(&self) -> String {
        let mut lines = vec![
            t("context.header"),
            t_with_args("context.part_count", &[("count", &self.part_count.to_string())]),
            t_with_args("context.product_count", &[("count", &self.product_count.to_string())]),
            t_with_args(
                "context.bom_line_count",
                &[("count", &self.bom_line_count.to_string())],
            ),
        ];

        for b in &self.build_potentials {
            match (b.buildable_units, &b.error) {
                (Some(units), _) => {
                    lines.push(t_with_args(
                        "context.build_potential",
                        &[("product", &b.product_id), ("units", &units.to_string())],
                    ));
                    if let Some(part) = &b.bottleneck_part {
                        lines.push(t_with_args(
                            "context.build_bottleneck",
                            &[("product", &b.product_id), ("part", part)],
                        ));
                    }
                }
                (None, reason) => lines.push(t_with_args(
                    "context.build_unavailable",
                    &[
                        ("product", &b.product_id),
                        ("reason", reason.as_deref().unwrap_or_default()),
                    ],
                )),
            }
        }

        if self.shortages.is_empty() {
            lines.push(t("context.no_shortages"));
        }
        for s in &self.shortages {
            lines.push(t_with_args(
                "context.shortage",
                &[
                    ("part", &s.part_id),
                    ("qty", &s.quantity_available.to_string()),
                    ("min", &s.minimum_stock_threshold.to_string()),
                ],
            ));
        }

        for b in &self.blocked_parts {
            lines.push(t_with_args(
                "context.blocked_parts",
                &[("part", &b.part_id), ("blocked", &b.blocked.join(", "))],
            ));
        }

        lines.push(t_with_args(
            "context.pending_deliveries",
            &[("count", &self.pending_deliveries.to_string())],
        ));
        lines.push(t_with_args(
            "context.open_order_units",
            &[("units", &self.open_order_units.to_string())],
        ));
        lines.push(t_with_args(
            "context.active_suppliers",
            &[("count", &self.active_suppliers.to_string())],
        ));
        lines.join("\n")
    }

    /// Persona and rules followed by the rendered context
    pub fn system_instruction(&self) -> String {
        [
            t("assistant.persona"),
            t("assistant.crud_rules"),
            t("assistant.safety_rules"),
            self.render(),
            t("assistant.format_rules"),
        ]
        .join("\n\n")
    }
}
