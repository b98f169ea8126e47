// ==========================================
// Voltway Industrial OS - Summarizer seam
// ==========================================
// Natural-language answers from prompt + PlanningContext
// The hosted model is one implementation; tests use a canned one
// ==========================================

use crate::assistant::context::PlanningContext;
use async_trait::async_trait;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("assistant API key not configured")]
    MissingApiKey,

    #[error("assistant transport error: {0}")]
    Transport(String),

    #[error("assistant API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("assistant response could not be decoded: {0}")]
    Decode(String),
}

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Model reply text; an empty string means the model said nothing
    async fn summarize(
        &self,
        prompt: &str,
        context: &PlanningContext,
    ) -> Result<String, AssistantError>;
}

/// Canned replies, recording the prompts it receives
pub struct StaticSummarizer {
    reply: Result<String, String>,
    prompts: Mutex<Vec<String>>,
}

impl StaticSummarizer {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .map(|p| p.clone())
            .unwrap_or_else(|p| p.into_inner().clone())
    }
}

#[async_trait]
impl Summarizer for StaticSummarizer {
    async fn summarize(
        &self,
        prompt: &str,
        _context: &PlanningContext,
    ) -> Result<String, AssistantError> {
        self.prompts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(prompt.to_string());
        self.reply.clone().map_err(AssistantError::Transport)
    }
}

/// Stand-in when no API key is configured; every call fails
pub struct UnavailableSummarizer;

#[async_trait]
impl Summarizer for UnavailableSummarizer {
    async fn summarize(
        &self,
        _prompt: &str,
        _context: &PlanningContext,
    ) -> Result<String, AssistantError> {
        Err(AssistantError::MissingApiKey)
    }
}
