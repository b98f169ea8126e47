// ==========================================
// Voltway Industrial OS - Hosted model client
// ==========================================
// POST {base}/models/{model}:generateContent
// Auth: x-goog-api-key header
// ==========================================

use crate::assistant::context::PlanningContext;
use crate::assistant::summarizer::{AssistantError, Summarizer};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_VARS: [&str; 2] = ["VOLTWAY_API_KEY", "API_KEY"];
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

// ===== Wire format =====

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    system_instruction: Content<'a>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

// ==========================================
// GeminiSummarizer
// ==========================================
pub struct GeminiSummarizer {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl GeminiSummarizer {
    pub fn new(api_key: &str, model: &str, temperature: f32) -> Result<Self, AssistantError> {
        if api_key.trim().is_empty() {
            return Err(AssistantError::MissingApiKey);
        }
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AssistantError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
        })
    }

    /// Key from VOLTWAY_API_KEY, falling back to API_KEY
    pub fn from_env(model: &str, temperature: f32) -> Result<Self, AssistantError> {
        let key = API_KEY_VARS
            .iter()
            .find_map(|var| std::env::var(var).ok().filter(|v| !v.trim().is_empty()))
            .ok_or(AssistantError::MissingApiKey)?;
        Self::new(&key, model, temperature)
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl Summarizer for GeminiSummarizer {
    async fn summarize(
        &self,
        prompt: &str,
        context: &PlanningContext,
    ) -> Result<String, AssistantError> {
        let instruction = context.system_instruction();
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: prompt }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![TextPart { text: &instruction }],
            },
            generation_config: GenerationConfig {
                temperature: self.temperature,
            },
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "calling hosted model");
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AssistantError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AssistantError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Decode(e.to_string()))?;
        Ok(parsed.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_layout() {
        let body = GenerateRequest {
            contents: vec![Content {
                role: Some("user"),
                parts: vec![TextPart { text: "status?" }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![TextPart { text: "You are Hugo" }],
            },
            generation_config: GenerationConfig { temperature: 0.3 },
        };
        let v = serde_json::to_value(&body).unwrap();
        assert_eq!(v["contents"][0]["parts"][0]["text"], "status?");
        assert_eq!(v["systemInstruction"]["parts"][0]["text"], "You are Hugo");
        assert!(v["systemInstruction"].get("role").is_none());
        assert!(v["generationConfig"]["temperature"].as_f64().is_some());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let raw = r#"{"candidates":[{"content":{"parts":[{"text":"P301 "},{"text":"is the bottleneck"}]}}]}"#;
        let parsed: GenerateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "P301 is the bottleneck");

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_blank_key_rejected() {
        assert!(matches!(
            GeminiSummarizer::new("  ", "gemini-3-pro-preview", 0.3),
            Err(AssistantError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_uses_model() {
        let s = GeminiSummarizer::new("k", "gemini-3-pro-preview", 0.3)
            .unwrap()
            .with_base_url("http://localhost:9000/v1beta/");
        assert_eq!(
            s.endpoint(),
            "http://localhost:9000/v1beta/models/gemini-3-pro-preview:generateContent"
        );
    }
}
