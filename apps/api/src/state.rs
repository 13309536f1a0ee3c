use std::sync::Arc;

use crate::llm_client::LlmClient;
use crate::store::LearnerStore;
use crate::warehouse::ChatLogSink;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    /// Per-learner quiz and interview history.
    pub store: Arc<LearnerStore>,
    /// Chat-log destination. Disabled unless a warehouse is configured and logging is on.
    pub chat_log: Arc<dyn ChatLogSink>,
}

/// Learner assumed when a request does not name one.
pub fn default_user_id() -> i64 {
    1
}
