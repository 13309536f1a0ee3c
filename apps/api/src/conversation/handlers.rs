//! Axum route handler for the chat endpoint.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analytics::insights::aggregate;
use crate::conversation::builder::{personalized_system_prompt, PromptBuilder};
use crate::conversation::responder;
use crate::errors::AppError;
use crate::models::conversation::{ConversationTurn, Role};
use crate::state::{default_user_id, AppState};
use crate::warehouse::{log_in_background, ChatLogEntry};

/// One prior message as sent by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryEntry {
    pub sender: String,
    pub message: String,
}

impl From<&HistoryEntry> for ConversationTurn {
    /// Anything not sent by the user is treated as an assistant turn.
    fn from(entry: &HistoryEntry) -> Self {
        if entry.sender == "user" {
            ConversationTurn::user(entry.message.clone())
        } else {
            ConversationTurn::assistant(entry.message.clone())
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    #[serde(default)]
    pub chat_history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub timestamp: DateTime<Utc>,
}

/// POST /chat
///
/// Always answers with text: model output, a fixed notice, or a local fallback.
/// Both sides of the exchange are logged to the warehouse in the background.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Missing message parameter".to_string()));
    }

    let learner = state.store.snapshot(request.user_id).await;
    let system_prompt =
        personalized_system_prompt(&aggregate(&learner), learner.profile.as_ref());
    let history: Vec<ConversationTurn> = request.chat_history.iter().map(Into::into).collect();

    let completion = PromptBuilder::default().build(&system_prompt, &history, message);
    let response = responder::respond(&state.llm, &completion).await;

    info!(
        "Chat reply for user {} ({} history turns)",
        request.user_id,
        history.len()
    );

    log_in_background(
        state.chat_log.clone(),
        vec![
            ChatLogEntry::new(request.user_id, Role::User, message),
            ChatLogEntry::new(request.user_id, Role::Assistant, &response),
        ],
    );

    Ok(Json(ChatResponse {
        success: true,
        response,
        timestamp: Utc::now(),
    }))
}
