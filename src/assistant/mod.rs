// ==========================================
// Voltway Industrial OS - Assistant ("Hugo")
// ==========================================

pub mod context;
pub mod gemini;
pub mod summarizer;

pub use context::{PlanningContext, ProductBuildSummary};
pub use gemini::GeminiSummarizer;
pub use summarizer::{AssistantError, StaticSummarizer, Summarizer, UnavailableSummarizer};
