// ==========================================
// Voltway Industrial OS - Application layer
// ==========================================
// Responsibility: process-level wiring and per-session view state
// ==========================================

pub mod state;
pub mod view_state;

pub use state::{get_default_db_path, AppState};
pub use view_state::{matches_search, Tab, ViewState};
