/// LLM Client: the single point of entry for all generative backend calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Everything goes through `GenerativeBackend`, which `GeminiClient` implements
/// and tests replace with a scripted fake.
///
/// One outbound request per call. No retries, no caching, no streaming.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::chat::ChatMessage;

pub mod prompts;

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Fast default model used for every call unless extended reasoning is requested.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Higher-capability model selected by extended reasoning.
pub const REASONING_MODEL: &str = "gemini-2.5-pro";
/// Thinking budget attached only to extended-reasoning requests.
pub const REASONING_BUDGET: u32 = 32768;

const JSON_MIME_TYPE: &str = "application/json";

/// BackendError: transport or backend-side failure. Error bodies are carried, not interpreted.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A schema-constrained, single-prompt request.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub model: &'static str,
    pub system_instruction: String,
    pub prompt: String,
    /// Already rendered in the backend's schema dialect.
    pub schema: Value,
    pub reasoning_budget: Option<u32>,
}

/// A conversational request: prior turns plus one new user message.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: &'static str,
    pub system_instruction: String,
    pub history: Vec<ChatMessage>,
    pub message: String,
}

/// The generative backend seam. Implementations return the model's raw text.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(&self, request: &StructuredRequest) -> Result<String, LlmError>;

    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'a str,
    response_schema: &'a Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

impl<'a> Content<'a> {
    fn text(role: Option<&'a str>, text: &'a str) -> Self {
        Self {
            role,
            parts: vec![Part { text }],
        }
    }
}

impl<'a> GenerateContentRequest<'a> {
    fn structured(request: &'a StructuredRequest) -> Self {
        Self {
            system_instruction: Content::text(None, &request.system_instruction),
            contents: vec![Content::text(Some("user"), &request.prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: JSON_MIME_TYPE,
                response_schema: &request.schema,
                thinking_config: request
                    .reasoning_budget
                    .map(|thinking_budget| ThinkingConfig { thinking_budget }),
            }),
        }
    }

    fn chat(request: &'a ChatRequest) -> Self {
        let mut contents: Vec<Content<'a>> = request
            .history
            .iter()
            .map(|msg| Content::text(Some(msg.role.as_str()), &msg.content))
            .collect();
        contents.push(Content::text(Some("user"), &request.message));

        Self {
            system_instruction: Content::text(None, &request.system_instruction),
            contents,
            generation_config: None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
    /// Set on reasoning summaries, which are not part of the answer.
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Concatenates the answer text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// The production backend: Gemini `generateContent` over HTTPS.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// Makes exactly one call and returns the answer text.
    async fn send(&self, model: &str, body: &GenerateContentRequest<'_>) -> Result<String, LlmError> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!("Gemini API returned {} for model {}", status, model);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
                model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed.text().ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(&self, request: &StructuredRequest) -> Result<String, LlmError> {
        let body = GenerateContentRequest::structured(request);
        self.send(request.model, &body).await
    }

    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        let body = GenerateContentRequest::chat(request);
        self.send(request.model, &body).await
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Test double
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn structured(budget: Option<u32>) -> StructuredRequest {
        StructuredRequest {
            model: DEFAULT_MODEL,
            system_instruction: "sys".to_string(),
            prompt: "describe me".to_string(),
            schema: json!({"type": "OBJECT"}),
            reasoning_budget: budget,
        }
    }

    #[test]
    fn test_structured_body_without_budget() {
        let request = structured(None);
        let body = serde_json::to_value(GenerateContentRequest::structured(&request)).unwrap();
        assert_eq!(
            body,
            json!({
                "systemInstruction": {"parts": [{"text": "sys"}]},
                "contents": [{"role": "user", "parts": [{"text": "describe me"}]}],
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "responseSchema": {"type": "OBJECT"}
                }
            })
        );
    }

    #[test]
    fn test_structured_body_with_budget() {
        let request = structured(Some(REASONING_BUDGET));
        let body = serde_json::to_value(GenerateContentRequest::structured(&request)).unwrap();
        assert_eq!(
            body["generationConfig"]["thinkingConfig"]["thinkingBudget"],
            32768
        );
    }

    #[test]
    fn test_chat_body_appends_message_after_history() {
        let request = ChatRequest {
            model: DEFAULT_MODEL,
            system_instruction: "be kind".to_string(),
            history: vec![ChatMessage::model("Hello!"), ChatMessage::user("Hi")],
            message: "What next?".to_string(),
        };
        let body = serde_json::to_value(GenerateContentRequest::chat(&request)).unwrap();
        assert_eq!(body["contents"].as_array().unwrap().len(), 3);
        assert_eq!(body["contents"][0]["role"], "model");
        assert_eq!(body["contents"][2]["role"], "user");
        assert_eq!(body["contents"][2]["parts"][0]["text"], "What next?");
        assert!(body.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_skips_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "{\"a\":"},
                    {"text": "1}"}
                ]}
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }))
        .unwrap();
        assert_eq!(response.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let response: GenerateContentResponse =
            serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
        assert!(response.text().is_none());
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = GeminiClient::new("key".to_string(), format!("{DEFAULT_API_BASE}/"));
        assert_eq!(
            client.endpoint(REASONING_MODEL),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[tokio::test]
    async fn test_scripted_backend_replays_in_order() {
        let backend = fake::ScriptedBackend::new().reply("one").fail(503);
        assert_eq!(backend.generate(&structured(None)).await.unwrap(), "one");
        assert!(matches!(
            backend.generate(&structured(None)).await,
            Err(LlmError::Api { status: 503, .. })
        ));
        assert_eq!(backend.structured_requests().len(), 2);
    }
}
