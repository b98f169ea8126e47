// ==========================================
// Voltway Industrial OS - Engine layer
// ==========================================
// Responsibility: planning rules over a CatalogSnapshot
// Rule: engines never touch SQL; they only read snapshots
// ==========================================

pub mod error;
pub mod feasibility;
pub mod metrics;
pub mod shortage;

pub use error::{EngineError, EngineResult};
pub use feasibility::{
    BuildFeasibilityEvaluator, BuildPotential, EvaluationOptions, LineCapacity,
    SubstitutionPolicy,
};
pub use metrics::{DashboardCards, RevenueAtRisk, UnitBuildCost, UtilizationBar};
pub use shortage::{is_short, ShortageDetector, StockAlert};
