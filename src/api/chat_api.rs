// ==========================================
// Voltway Industrial OS - Chat API ("Hugo")
// ==========================================
// Never fails toward the caller: model errors become a fixed reply
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::require_key;
use crate::assistant::context::PlanningContext;
use crate::assistant::summarizer::Summarizer;
use crate::config::PlanningSettings;
use crate::i18n::t;
use crate::services::SnapshotRefreshService;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Answer,
    /// Model returned no text
    Stalled,
    /// Transport or API failure
    Interrupted,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub kind: ReplyKind,
    pub text: String,
}

pub struct ChatApi {
    summarizer: Arc<dyn Summarizer>,
    refresh: Arc<SnapshotRefreshService>,
    settings: PlanningSettings,
}

impl ChatApi {
    pub fn new(
        summarizer: Arc<dyn Summarizer>,
        refresh: Arc<SnapshotRefreshService>,
        settings: PlanningSettings,
    ) -> Self {
        Self {
            summarizer,
            refresh,
            settings,
        }
    }

    /// # Returns
    /// - Err only for an empty prompt or a missing snapshot
    pub async fn ask(&self, prompt: &str) -> ApiResult<ChatReply> {
        require_key("prompt", prompt)?;
        let snapshot = self.refresh.current().await?;
        let context = PlanningContext::from_snapshot(&snapshot, &self.settings.evaluation_options());

        let reply = match self.summarizer.summarize(prompt, &context).await {
            Ok(text) if !text.trim().is_empty() => ChatReply {
                kind: ReplyKind::Answer,
                text,
            },
            Ok(_) => {
                tracing::warn!("assistant returned an empty reply");
                ChatReply {
                    kind: ReplyKind::Stalled,
                    text: t("assistant.stalled"),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "assistant call failed");
                ChatReply {
                    kind: ReplyKind::Interrupted,
                    text: t("assistant.interrupted"),
                }
            }
        };
        Ok(reply)
    }
}
