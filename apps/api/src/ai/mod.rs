//! AI assistant client — the single point of entry for all model API calls.
//!
//! The assistant is an opaque best-effort collaborator: one attempt per
//! request, no retry. A failed call surfaces as an `AiRequest` error and the
//! user resubmits manually if they want another try.

pub mod prompts;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Hardcoded to prevent accidental drift between deployments.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;

/// Improvement suggestions for an existing resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestImprovementsOutput {
    pub improved_content: String,
    pub suggestions: Vec<String>,
}

/// A generated starting draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateDraftOutput {
    pub resume_draft: String,
}

/// The assistant seam. Handlers depend on this trait so tests can swap in a
/// canned implementation.
#[async_trait]
pub trait AiAssist: Send + Sync {
    async fn suggest_improvements(
        &self,
        resume_content: &str,
        job_description: &str,
    ) -> Result<SuggestImprovementsOutput, AppError>;

    async fn generate_draft(&self, job_description: &str) -> Result<GenerateDraftOutput, AppError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

impl ApiResponse {
    fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Anthropic-backed assistant.
#[derive(Clone)]
pub struct AnthropicAssist {
    client: Client,
    api_key: String,
}

impl AnthropicAssist {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Single attempt against the messages API; any failure becomes an
    /// `AiRequest` error for the caller to surface.
    async fn call(&self, prompt: &str, system: &str) -> Result<String, AppError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| AppError::AiRequest(format!("HTTP error: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::AiRequest(format!(
                "API error (status {status}): {message}"
            )));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::AiRequest(format!("Malformed API response: {e}")))?;

        debug!("AI call succeeded");
        parsed
            .text()
            .map(|t| t.to_string())
            .ok_or_else(|| AppError::AiRequest("Model returned empty content".to_string()))
    }

    /// Calls the model and deserializes its text output as JSON. The prompt
    /// must instruct the model to return valid JSON.
    async fn call_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, AppError> {
        let text = self.call(prompt, system).await?;
        let text = strip_json_fences(&text);
        serde_json::from_str(text)
            .map_err(|e| AppError::AiRequest(format!("Model returned invalid JSON: {e}")))
    }
}

#[async_trait]
impl AiAssist for AnthropicAssist {
    async fn suggest_improvements(
        &self,
        resume_content: &str,
        job_description: &str,
    ) -> Result<SuggestImprovementsOutput, AppError> {
        let prompt = prompts::SUGGEST_PROMPT_TEMPLATE
            .replace("{resume_content}", resume_content)
            .replace("{job_description}", job_description);
        self.call_json(&prompt, prompts::SUGGEST_SYSTEM).await
    }

    async fn generate_draft(&self, job_description: &str) -> Result<GenerateDraftOutput, AppError> {
        let prompt =
            prompts::GENERATE_PROMPT_TEMPLATE.replace("{job_description}", job_description);
        self.call_json(&prompt, prompts::GENERATE_SYSTEM).await
    }
}

/// Stand-in used when no API key is configured. Every call fails the way a
/// network failure would, so the rest of the application stays usable.
pub struct DisabledAssist;

#[async_trait]
impl AiAssist for DisabledAssist {
    async fn suggest_improvements(
        &self,
        _resume_content: &str,
        _job_description: &str,
    ) -> Result<SuggestImprovementsOutput, AppError> {
        Err(AppError::AiRequest(
            "AI assistant is not configured (missing API key)".to_string(),
        ))
    }

    async fn generate_draft(&self, _job_description: &str) -> Result<GenerateDraftOutput, AppError> {
        Err(AppError::AiRequest(
            "AI assistant is not configured (missing API key)".to_string(),
        ))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
