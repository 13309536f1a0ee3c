/// LLM Client — the single point of entry for all generative-language API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through this module.
///
/// Every call gets at most `RetryPolicy::max_attempts` HTTP attempts. Callers
/// receive either text, a typed JSON reply, or an `LlmError` they are expected
/// to absorb with their own fallback.
use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, warn};

use crate::models::conversation::{CompletionRequest, ConversationTurn, ResponseMode, Role};

pub mod prompts;
pub mod retry;

pub use retry::{AttemptTimeouts, RetryPolicy};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const STRUCTURED_TEMPERATURE: f32 = 0.4;
const STRUCTURED_MAX_TOKENS: u32 = 800;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("AI service is not configured")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

impl LlmError {
    /// Timeouts and transport failures are worth another attempt.
    /// Non-success statuses are reported as `CompletionOutcome::RateLimited` instead.
    pub fn is_transient(&self) -> bool {
        matches!(self, LlmError::Http(_))
    }
}

/// Result of a single HTTP attempt, consumed immediately by the retry loop.
#[derive(Debug)]
pub enum CompletionOutcome {
    Success(String),
    RateLimited {
        status: u16,
        retry_after: Option<Duration>,
    },
    Failure(LlmError),
}

// ────────────────────────────────────────────────────────────────────────────
// Wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<&'static str>,
}

impl<'a> GenerateContentRequest<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        let system_parts: Vec<Part<'a>> = request
            .turns()
            .iter()
            .filter(|t| t.role() == Role::System)
            .map(|t| Part { text: t.text() })
            .collect();

        let contents = request
            .turns()
            .iter()
            .filter_map(|t| {
                let role = match t.role() {
                    Role::System => return None,
                    Role::User => "user",
                    Role::Assistant => "model",
                };
                Some(Content {
                    role: Some(role),
                    parts: vec![Part { text: t.text() }],
                })
            })
            .collect();

        Self {
            system_instruction: (!system_parts.is_empty()).then_some(Content {
                role: None,
                parts: system_parts,
            }),
            contents,
            generation_config: GenerationConfig {
                temperature: request.temperature(),
                max_output_tokens: request.max_output_tokens(),
                response_mime_type: match request.mode() {
                    ResponseMode::Text => None,
                    ResponseMode::Json => Some("application/json"),
                },
            },
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
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client shared by every feature of the companion.
/// Wraps `generateContent` with bounded retry and structured-output helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    retry: RetryPolicy,
    timeouts: AttemptTimeouts,
}

impl LlmClient {
    /// A blank or missing key leaves the client unconfigured; every call
    /// then fails fast with `LlmError::NotConfigured`.
    pub fn new(api_key: Option<String>, base_url: &str, model: &str) -> Result<Self, LlmError> {
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            model: model.to_string(),
            retry: RetryPolicy::default(),
            timeouts: AttemptTimeouts::default(),
        })
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeouts(mut self, timeouts: AttemptTimeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `request`, retrying transient failures within the retry budget.
    ///
    /// A success status with no usable text is `MalformedResponse` and is not
    /// retried. A spent budget is `Exhausted`.
    pub async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("LLM call skipped: no API key configured");
            return Err(LlmError::NotConfigured);
        };

        let body = GenerateContentRequest::from_request(request);
        let timeout = self.timeouts.for_mode(request.mode());

        let mut last_failure = String::from("no attempt made");

        for attempt in 1..=self.retry.max_attempts {
            let hint = match self.attempt(api_key, &body, timeout).await {
                CompletionOutcome::Success(text) => return Ok(text),
                CompletionOutcome::RateLimited {
                    status,
                    retry_after,
                } => {
                    last_failure = format!("API returned status {status}");
                    retry_after
                }
                CompletionOutcome::Failure(err) if err.is_transient() => {
                    last_failure = err.to_string();
                    None
                }
                CompletionOutcome::Failure(err) => return Err(err),
            };

            if attempt < self.retry.max_attempts {
                let delay = self.retry.backoff(hint);
                warn!(
                    "LLM attempt {}/{} failed ({}), retrying after {}ms...",
                    attempt,
                    self.retry.max_attempts,
                    last_failure,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }
        }

        error!(
            "LLM call exhausted after {} attempts: {}",
            self.retry.max_attempts, last_failure
        );
        Err(LlmError::Exhausted {
            attempts: self.retry.max_attempts,
            last: last_failure,
        })
    }

    async fn attempt(
        &self,
        api_key: &str,
        body: &GenerateContentRequest<'_>,
        timeout: Duration,
    ) -> CompletionOutcome {
        let response = match self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", api_key)
            .timeout(timeout)
            .json(body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return CompletionOutcome::Failure(LlmError::Http(e)),
        };

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let retry_after = retry::retry_hint(&body);
            warn!(
                "LLM API returned {}: {}",
                status,
                retry::error_message(&body).unwrap_or(body)
            );
            return CompletionOutcome::RateLimited {
                status: status.as_u16(),
                retry_after,
            };
        }

        let bytes = match response.bytes().await {
            Ok(b) => b,
            Err(e) => return CompletionOutcome::Failure(LlmError::Http(e)),
        };

        let parsed: GenerateContentResponse = match serde_json::from_slice(&bytes) {
            Ok(p) => p,
            Err(e) => {
                return CompletionOutcome::Failure(LlmError::MalformedResponse(format!(
                    "unreadable response body: {e}"
                )))
            }
        };

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "LLM call succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        match parsed.text() {
            Some(text) if !text.trim().is_empty() => CompletionOutcome::Success(text.to_string()),
            _ => CompletionOutcome::Failure(LlmError::MalformedResponse(
                "response carried no candidate text".to_string(),
            )),
        }
    }

    /// Asks for a JSON reply and deserializes it into `T`.
    pub async fn call_json<T: DeserializeOwned>(&self, prompt: &str) -> Result<T, LlmError> {
        let request = CompletionRequest::new(
            vec![
                ConversationTurn::system(prompts::JSON_ONLY_SYSTEM),
                ConversationTurn::user(prompt),
            ],
            STRUCTURED_TEMPERATURE,
            STRUCTURED_MAX_TOKENS,
            ResponseMode::Json,
        );

        let text = self.complete(&request).await?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(&text);

        serde_json::from_str(text).map_err(LlmError::Parse)
    }

    /// Like `call_json`, but absorbs every failure into `None`.
    /// Callers supply their own domain defaults.
    pub async fn complete_structured<T: DeserializeOwned>(&self, prompt: &str) -> Option<T> {
        match self.call_json(prompt).await {
            Ok(value) => Some(value),
            Err(LlmError::NotConfigured) => None,
            Err(e) => {
                warn!("Structured LLM query failed: {e}");
                None
            }
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let Some(stripped) = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    else {
        return text;
    };

    let stripped = stripped.trim_start();
    stripped
        .strip_suffix("```")
        .map(str::trim)
        .unwrap_or(stripped)
}
