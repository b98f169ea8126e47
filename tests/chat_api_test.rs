// ==========================================
// Chat API integration tests
// ==========================================

mod helpers;

use helpers::api_test_helper::setup_seeded_state;
use std::sync::Arc;
use voltway_ios::api::ReplyKind;
use voltway_ios::assistant::{StaticSummarizer, UnavailableSummarizer};
use voltway_ios::ApiError;

#[tokio::test]
async fn test_answer_passes_through() {
    let summarizer = Arc::new(StaticSummarizer::replying("**P301** limits S1_V1 to 45 units."));
    let (_temp, state) = setup_seeded_state(summarizer.clone()).await;

    let reply = state.chat_api.ask("What limits production?").await.unwrap();
    assert_eq!(reply.kind, ReplyKind::Answer);
    assert!(reply.text.contains("P301"));
    assert_eq!(summarizer.prompts(), vec!["What limits production?".to_string()]);
}

#[tokio::test]
async fn test_empty_model_reply_is_stalled() {
    let (_temp, state) = setup_seeded_state(Arc::new(StaticSummarizer::replying("  "))).await;

    let reply = state.chat_api.ask("status?").await.unwrap();
    assert_eq!(reply.kind, ReplyKind::Stalled);
    assert_eq!(reply.text, "Hugo core logic stalled.");
}

#[tokio::test]
async fn test_model_failure_is_interrupted() {
    let (_temp, state) =
        setup_seeded_state(Arc::new(StaticSummarizer::failing("connection reset"))).await;

    let reply = state.chat_api.ask("status?").await.unwrap();
    assert_eq!(reply.kind, ReplyKind::Interrupted);
    assert_eq!(
        reply.text,
        "Operational intelligence interrupted. Check system connectivity."
    );
}

#[tokio::test]
async fn test_missing_api_key_still_replies() {
    let (_temp, state) = setup_seeded_state(Arc::new(UnavailableSummarizer)).await;
    let reply = state.chat_api.ask("status?").await.unwrap();
    assert_eq!(reply.kind, ReplyKind::Interrupted);
}

#[tokio::test]
async fn test_blank_prompt_rejected() {
    let (_temp, state) = setup_seeded_state(Arc::new(StaticSummarizer::replying("x"))).await;
    assert!(matches!(
        state.chat_api.ask("   ").await,
        Err(ApiError::InvalidInput(_))
    ));
}
