//! Retry budget and provider retry-hint extraction.
//!
//! The provider reports rate limits as a JSON error body whose `details`
//! list may carry a `google.rpc.RetryInfo` entry with a `retryDelay` such as
//! `"12s"` or `"2.7s"`. Only whole seconds are honoured.

use std::time::Duration;

use serde::Deserialize;

use crate::models::conversation::ResponseMode;

/// How many attempts a completion gets and how long to wait between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait used when the provider gives no usable hint.
    pub default_backoff: Duration,
    /// Upper bound on any single wait.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            default_backoff: Duration::from_secs(3),
            max_backoff: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// Delay before the next attempt: the hint if positive, else the default, capped.
    pub fn backoff(&self, hint: Option<Duration>) -> Duration {
        hint.filter(|d| !d.is_zero())
            .unwrap_or(self.default_backoff)
            .min(self.max_backoff)
    }
}

/// Per-attempt HTTP timeouts. A timed-out attempt counts as a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptTimeouts {
    pub text: Duration,
    pub structured: Duration,
}

impl Default for AttemptTimeouts {
    fn default() -> Self {
        Self {
            text: Duration::from_secs(30),
            structured: Duration::from_secs(40),
        }
    }
}

impl AttemptTimeouts {
    pub fn for_mode(&self, mode: ResponseMode) -> Duration {
        match mode {
            ResponseMode::Text => self.text,
            ResponseMode::Json => self.structured,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<Vec<ErrorDetail>>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "@type", default)]
    type_url: String,
    #[serde(rename = "retryDelay", default)]
    retry_delay: Option<String>,
}

fn parse_envelope(body: &str) -> Option<ErrorBody> {
    serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .map(|e| e.error)
}

/// Reads the retry-after hint out of an error body, in whole seconds.
/// Returns `None` when the body has no hint or the hint is under one second.
pub fn retry_hint(body: &str) -> Option<Duration> {
    let details = parse_envelope(body)?.details?;

    details
        .iter()
        .filter(|d| d.type_url.ends_with("RetryInfo"))
        .filter_map(|d| d.retry_delay.as_deref())
        .filter_map(parse_delay_seconds)
        .last()
        .filter(|secs| *secs > 0)
        .map(Duration::from_secs)
}

/// The provider's human-readable error message, if the body carries one.
pub fn error_message(body: &str) -> Option<String> {
    parse_envelope(body)?.message.filter(|m| !m.is_empty())
}

fn parse_delay_seconds(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    let number = raw.strip_suffix('s').unwrap_or(raw);
    let secs: f64 = number.parse().ok()?;
    if !secs.is_finite() || secs < 0.0 {
        return None;
    }
    Some(secs.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_with_delay(delay: &str) -> String {
        serde_json::json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted",
                "status": "RESOURCE_EXHAUSTED",
                "details": [
                    {"@type": "type.googleapis.com/google.rpc.QuotaFailure", "violations": []},
                    {"@type": "type.googleapis.com/google.rpc.RetryInfo", "retryDelay": delay}
                ]
            }
        })
        .to_string()
    }

    #[test]
    fn test_retry_hint_whole_seconds() {
        assert_eq!(
            retry_hint(&body_with_delay("1s")),
            Some(Duration::from_secs(1))
        );
    }

    #[test]
    fn test_retry_hint_fractional_truncates() {
        assert_eq!(
            retry_hint(&body_with_delay("2.7s")),
            Some(Duration::from_secs(2))
        );
    }

    #[test]
    fn test_retry_hint_zero_or_subsecond_is_none() {
        assert_eq!(retry_hint(&body_with_delay("0s")), None);
        assert_eq!(retry_hint(&body_with_delay("0.4s")), None);
    }

    #[test]
    fn test_retry_hint_missing_details() {
        let body = r#"{"error": {"code": 500, "message": "boom"}}"#;
        assert_eq!(retry_hint(body), None);
        assert_eq!(retry_hint("not json at all"), None);
        assert_eq!(retry_hint(r#"{"error": {"details": null}}"#), None);
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(&body_with_delay("1s")).as_deref(),
            Some("Resource has been exhausted")
        );
        assert_eq!(error_message("<html>bad gateway</html>"), None);
    }

    #[test]
    fn test_policy_backoff_defaults_and_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(None), Duration::from_secs(3));
        assert_eq!(policy.backoff(Some(Duration::ZERO)), Duration::from_secs(3));
        assert_eq!(
            policy.backoff(Some(Duration::from_secs(1))),
            Duration::from_secs(1)
        );
        assert_eq!(
            policy.backoff(Some(Duration::from_secs(30))),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_timeouts_follow_response_mode() {
        let timeouts = AttemptTimeouts::default();
        assert_eq!(timeouts.for_mode(ResponseMode::Text), Duration::from_secs(30));
        assert_eq!(timeouts.for_mode(ResponseMode::Json), Duration::from_secs(40));
    }
}
