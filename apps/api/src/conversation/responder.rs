//! Text-path pipeline: remote completion with graceful degradation.
//!
//! Every failure kind is absorbed here, so callers always get a string.

use tracing::{info, warn};

use crate::conversation::fallback;
use crate::conversation::prompts::{NOT_CONFIGURED_REPLY, NO_RESPONSE_REPLY};
use crate::llm_client::{LlmClient, LlmError};
use crate::models::conversation::CompletionRequest;

/// Runs `request` and maps the outcome to user-facing text:
/// model text, a fixed notice, or a local fallback answer for the latest user turn.
pub async fn respond(llm: &LlmClient, request: &CompletionRequest) -> String {
    match llm.complete(request).await {
        Ok(text) => text,
        Err(LlmError::NotConfigured) => NOT_CONFIGURED_REPLY.to_string(),
        Err(LlmError::MalformedResponse(reason)) => {
            warn!("LLM reply unusable: {reason}");
            NO_RESPONSE_REPLY.to_string()
        }
        Err(e) => {
            info!("Serving local fallback answer: {e}");
            fallback::respond(request.last_user_text().unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::builder::PromptBuilder;
    use crate::llm_client::RetryPolicy;
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fast_client(server: &MockServer) -> LlmClient {
        LlmClient::new(Some("key".to_string()), &server.uri(), "gemini-test")
            .unwrap()
            .with_retry_policy(RetryPolicy {
                max_attempts: 2,
                default_backoff: Duration::from_millis(5),
                max_backoff: Duration::from_millis(5),
            })
    }

    #[tokio::test]
    async fn test_not_configured_returns_fixed_notice() {
        let llm = LlmClient::new(None, "http://127.0.0.1:9", "gemini-test").unwrap();
        let request = PromptBuilder::default().build("sys", &[], "hello");
        assert_eq!(respond(&llm, &request).await, NOT_CONFIGURED_REPLY);
    }

    #[tokio::test]
    async fn test_exhausted_falls_back_to_local_answer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(2)
            .mount(&server)
            .await;

        let request = PromptBuilder::default().build("sys", &[], "what is linear regression?");
        let reply = respond(&fast_client(&server), &request).await;
        assert!(reply.starts_with("Linear regression fits"));
    }

    #[tokio::test]
    async fn test_malformed_returns_fixed_notice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .expect(1)
            .mount(&server)
            .await;

        let request = PromptBuilder::default().build("sys", &[], "hello");
        assert_eq!(
            respond(&fast_client(&server), &request).await,
            NO_RESPONSE_REPLY
        );
    }
}
