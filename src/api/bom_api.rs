// ==========================================
// Voltway Industrial OS - BOM API
// ==========================================
// Build potential and cost on the snapshot; BOM edits through the repository
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::{require_key, require_positive};
use crate::config::PlanningSettings;
use crate::domain::product::BomLine;
use crate::engine::feasibility::{BuildFeasibilityEvaluator, BuildPotential, EvaluationOptions};
use crate::engine::metrics::{self, UnitBuildCost};
use crate::engine::EngineResult;
use crate::repository::BomRepository;
use crate::services::SnapshotRefreshService;
use std::sync::Arc;

pub struct BomApi {
    bom_repo: Arc<BomRepository>,
    refresh: Arc<SnapshotRefreshService>,
    settings: PlanningSettings,
    evaluator: BuildFeasibilityEvaluator,
}

impl BomApi {
    pub fn new(
        bom_repo: Arc<BomRepository>,
        refresh: Arc<SnapshotRefreshService>,
        settings: PlanningSettings,
    ) -> Self {
        Self {
            bom_repo,
            refresh,
            settings,
            evaluator: BuildFeasibilityEvaluator::new(),
        }
    }

    // ==========================================
    // Queries
    // ==========================================

    /// Options default to the configured substitution policy, all locations
    pub async fn get_build_potential(
        &self,
        product_id: &str,
        options: Option<EvaluationOptions>,
    ) -> ApiResult<BuildPotential> {
        require_key("product_id", product_id)?;
        let options = options.unwrap_or_else(|| self.settings.evaluation_options());
        let snapshot = self.refresh.current().await?;
        Ok(self.evaluator.evaluate(&snapshot, product_id, &options)?)
    }

    pub async fn get_all_build_potentials(
        &self,
        options: Option<EvaluationOptions>,
    ) -> ApiResult<Vec<(String, EngineResult<BuildPotential>)>> {
        let options = options.unwrap_or_else(|| self.settings.evaluation_options());
        let snapshot = self.refresh.current().await?;
        Ok(self.evaluator.evaluate_all(&snapshot, &options))
    }

    pub async fn get_unit_cost(&self, product_id: &str) -> ApiResult<UnitBuildCost> {
        require_key("product_id", product_id)?;
        let snapshot = self.refresh.current().await?;
        Ok(metrics::unit_build_cost(&snapshot, product_id))
    }

    pub fn list_bom(&self, product_id: &str) -> ApiResult<Vec<BomLine>> {
        require_key("product_id", product_id)?;
        Ok(self.bom_repo.list_by_product(product_id)?)
    }

    // ==========================================
    // Edits
    // ==========================================

    pub fn save_bom_line(&self, line: &BomLine) -> ApiResult<()> {
        require_key("product_id", &line.product_id)?;
        require_key("part_id", &line.part_id)?;
        require_positive("quantity", line.quantity)?;
        self.bom_repo.upsert(line)?;
        tracing::info!(
            product_id = %line.product_id,
            part_id = %line.part_id,
            quantity = line.quantity,
            "BOM line saved"
        );
        self.refresh.refresh_after_write("bom");
        Ok(())
    }

    pub fn remove_bom_line(&self, product_id: &str, part_id: &str) -> ApiResult<()> {
        require_key("product_id", product_id)?;
        require_key("part_id", part_id)?;
        self.bom_repo.delete(product_id, part_id)?;
        tracing::info!(product_id, part_id, "BOM line removed");
        self.refresh.refresh_after_write("bom");
        Ok(())
    }
}
