//! Axum route handlers for the Interview Coach API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::interview::coach::{coach_answer, interview_question, FeedbackSource, InterviewFeedback};
use crate::models::learner::InterviewRecord;
use crate::state::{default_user_id, AppState};

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub topic: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub success: bool,
    pub question: String,
}

#[derive(Debug, Deserialize)]
pub struct CoachRequest {
    #[serde(default)]
    pub answer: String,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct CoachResponse {
    pub success: bool,
    pub source: FeedbackSource,
    pub feedback: InterviewFeedback,
}

/// POST /interview/ask
pub async fn handle_ask(Json(request): Json<AskRequest>) -> Json<AskResponse> {
    Json(AskResponse {
        success: true,
        question: interview_question(request.topic.as_deref()),
    })
}

/// POST /interview/coach
///
/// Feedback on an answer. The scores are recorded for analytics whichever
/// path produced them.
pub async fn handle_coach(
    State(state): State<AppState>,
    Json(request): Json<CoachRequest>,
) -> Json<CoachResponse> {
    let (feedback, source) = coach_answer(&state.llm, &request.answer).await;

    state
        .store
        .record_interview(
            request.user_id,
            InterviewRecord {
                clarity: feedback.clarity,
                structure: feedback.structure,
                tone: feedback.tone.clone(),
                timestamp: Utc::now(),
            },
        )
        .await;

    Json(CoachResponse {
        success: true,
        source,
        feedback,
    })
}
