//! Axum route handlers for the Smart Quiz API.

use axum::{extract::State, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::learner::{QuizAttempt, QuizQuestion, QuizSource};
use crate::quiz::generator::{clamp_question_count, generate_quiz, normalize_topic};
use crate::quiz::grading::{grade, Answer};
use crate::state::{default_user_id, AppState};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateQuizRequest {
    pub topic: Option<String>,
    pub num_questions: Option<i64>,
    #[serde(default = "default_user_id")]
    pub user_id: i64,
}

#[derive(Debug, Serialize)]
pub struct GenerateQuizResponse {
    pub success: bool,
    pub quiz_id: Uuid,
    pub topic: String,
    pub source: QuizSource,
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Deserialize)]
pub struct GradeQuizRequest {
    #[serde(default = "default_user_id")]
    pub user_id: i64,
    pub quiz_id: Option<Uuid>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

#[derive(Debug, Serialize)]
pub struct GradeQuizResponse {
    pub success: bool,
    pub score: usize,
    pub total: usize,
    pub feedback: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /quiz/generate
///
/// Generates a multiple-choice quiz and stores it as the learner's latest quiz.
pub async fn handle_generate_quiz(
    State(state): State<AppState>,
    Json(request): Json<GenerateQuizRequest>,
) -> Json<GenerateQuizResponse> {
    let topic = normalize_topic(request.topic.as_deref());
    let count = clamp_question_count(request.num_questions);

    let quiz = generate_quiz(&state.llm, &topic, count).await;
    state.store.set_latest_quiz(request.user_id, quiz.clone()).await;

    Json(GenerateQuizResponse {
        success: true,
        quiz_id: quiz.quiz_id,
        topic: quiz.topic,
        source: quiz.source,
        questions: quiz.questions,
    })
}

/// POST /quiz/grade
///
/// Grades answers against the learner's latest quiz and records the attempt.
pub async fn handle_grade_quiz(
    State(state): State<AppState>,
    Json(request): Json<GradeQuizRequest>,
) -> Result<Json<GradeQuizResponse>, AppError> {
    let quiz = state
        .store
        .latest_quiz(request.user_id)
        .await
        .filter(|quiz| request.quiz_id.map_or(true, |id| id == quiz.quiz_id))
        .ok_or_else(|| {
            AppError::NotFound(format!("No active quiz for user {}", request.user_id))
        })?;

    let report = grade(&quiz.questions, &request.answers);

    state
        .store
        .record_quiz_attempt(
            request.user_id,
            QuizAttempt {
                score: report.score,
                total: report.total,
                timestamp: Utc::now(),
            },
        )
        .await;

    Ok(Json(GradeQuizResponse {
        success: true,
        score: report.score,
        total: report.total,
        feedback: report.feedback,
    }))
}
