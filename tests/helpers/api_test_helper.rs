// ==========================================
// API test setup
// ==========================================

use std::sync::Arc;
use tempfile::NamedTempFile;
use voltway_ios::app::AppState;
use voltway_ios::assistant::{StaticSummarizer, Summarizer};
use voltway_ios::seed::DemoDataset;

/// Seeded temp database wired into a full AppState
pub async fn setup_seeded_state(summarizer: Arc<dyn Summarizer>) -> (NamedTempFile, AppState) {
    let temp_file = NamedTempFile::new().expect("temp file");
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let state = AppState::with_summarizer(&db_path, summarizer)
        .await
        .expect("AppState");
    DemoDataset::new()
        .seed(state.conn.clone())
        .expect("seed demo dataset");
    state.refresh().await.expect("initial refresh");
    (temp_file, state)
}

pub async fn setup_default_state() -> (NamedTempFile, AppState) {
    setup_seeded_state(Arc::new(StaticSummarizer::replying("ok"))).await
}
