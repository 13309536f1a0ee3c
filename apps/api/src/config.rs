use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::{AttemptTimeouts, RetryPolicy, DEFAULT_API_BASE, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
///
/// Nothing is required: without an API key the service answers from its
/// local fallbacks, and without a warehouse chat logging stays off.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_base: String,
    pub llm_max_attempts: u32,
    pub llm_text_timeout_secs: u64,
    pub llm_structured_timeout_secs: u64,
    pub database_url: Option<String>,
    pub chat_logging_enabled: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: optional_env("GEMINI_API_KEY"),
            gemini_model: optional_env("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_api_base: optional_env("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            llm_max_attempts: parse_env("LLM_MAX_ATTEMPTS", 2)?,
            llm_text_timeout_secs: parse_env("LLM_TEXT_TIMEOUT_SECS", 30)?,
            llm_structured_timeout_secs: parse_env("LLM_STRUCTURED_TIMEOUT_SECS", 40)?,
            database_url: optional_env("DATABASE_URL"),
            chat_logging_enabled: parse_flag(optional_env("ENABLE_CHAT_LOGGING").as_deref()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// Default backoff with the configured attempt count (at least one).
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.llm_max_attempts.max(1),
            ..RetryPolicy::default()
        }
    }

    pub fn attempt_timeouts(&self) -> AttemptTimeouts {
        AttemptTimeouts {
            text: Duration::from_secs(self.llm_text_timeout_secs.max(1)),
            structured: Duration::from_secs(self.llm_structured_timeout_secs.max(1)),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        None => Ok(default),
    }
}

/// Reads `key`, treating unset and blank values alike.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}
