// ==========================================
// Voltway Industrial OS - Dashboard API
// ==========================================
// Read-only: every call works on one snapshot end to end
// ==========================================

use crate::api::error::ApiResult;
use crate::assistant::context::{PlanningContext, ProductBuildSummary};
use crate::config::PlanningSettings;
use crate::engine::metrics::{self, DashboardCards, RevenueAtRisk, UtilizationBar};
use crate::engine::shortage::{ShortageDetector, StockAlert};
use crate::i18n::t_with_args;
use crate::services::SnapshotRefreshService;
use crate::snapshot::catalog::{CatalogSnapshot, SnapshotIssue};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub captured_at: DateTime<Utc>,
    pub cards: DashboardCards,
    pub alerts: Vec<StockAlert>,
    /// Localized alert lines (health review first)
    pub smart_alerts: Vec<String>,
    pub build_potentials: Vec<ProductBuildSummary>,
    pub utilization: Vec<UtilizationBar>,
    pub revenue_at_risk: Vec<RevenueAtRisk>,
    pub issues: Vec<SnapshotIssue>,
}

pub struct DashboardApi {
    refresh: Arc<SnapshotRefreshService>,
    settings: PlanningSettings,
}

impl DashboardApi {
    pub fn new(refresh: Arc<SnapshotRefreshService>, settings: PlanningSettings) -> Self {
        Self { refresh, settings }
    }

    pub async fn get_dashboard(&self) -> ApiResult<DashboardView> {
        let snapshot = self.refresh.current().await?;
        Ok(self.build_view(&snapshot))
    }

    /// Part-level alerts, or one per stock record when `by_location`
    pub async fn get_stock_alerts(&self, by_location: bool) -> ApiResult<Vec<StockAlert>> {
        let snapshot = self.refresh.current().await?;
        let detector = ShortageDetector::new();
        Ok(if by_location {
            detector.detect_by_location(&snapshot)
        } else {
            detector.detect(&snapshot)
        })
    }

    fn build_view(&self, snapshot: &CatalogSnapshot) -> DashboardView {
        let options = self.settings.evaluation_options();
        let context = PlanningContext::from_snapshot(snapshot, &options);
        let alerts = context.shortages.clone();

        let mut smart_alerts = vec![t_with_args(
            "alerts.health_review",
            &[("count", &alerts.len().to_string())],
        )];
        smart_alerts.extend(alerts.iter().map(|a| {
            t_with_args(
                "alerts.below_threshold",
                &[
                    ("part", &a.part_name),
                    ("qty", &a.quantity_available.to_string()),
                    ("min", &a.minimum_stock_threshold.to_string()),
                ],
            )
        }));

        let cards = DashboardCards {
            critical_stockouts: alerts.len(),
            pending_deliveries: context.pending_deliveries,
            open_order_units: context.open_order_units,
            active_suppliers: context.active_suppliers,
        };

        DashboardView {
            captured_at: snapshot.captured_at(),
            cards,
            alerts,
            smart_alerts,
            build_potentials: context.build_potentials,
            utilization: metrics::utilization_chart(snapshot, self.settings.utilization_chart_size),
            revenue_at_risk: metrics::revenue_at_risk(snapshot, &options),
            issues: snapshot.issues().to_vec(),
        }
    }
}
