//! Axum route handlers for learner profiles and goals.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::learner::{LearnerProfile, LearningGoal};
use crate::profile::goals::{new_goal, GoalInput};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateGoalRequest {
    pub user_id: Option<i64>,
    pub goal: Option<GoalInput>,
}

#[derive(Debug, Serialize)]
pub struct CreateGoalResponse {
    pub success: bool,
    pub message: String,
    pub goal: LearningGoal,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    pub success: bool,
    pub goals: Vec<LearningGoal>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub success: bool,
    pub profile: LearnerProfile,
}

/// POST /goals
///
/// Both `user_id` and `goal` are required.
pub async fn handle_create_goal(
    State(state): State<AppState>,
    Json(request): Json<CreateGoalRequest>,
) -> Result<Json<CreateGoalResponse>, AppError> {
    let (Some(user_id), Some(input)) = (request.user_id, request.goal) else {
        return Err(AppError::Validation("Missing required parameters".to_string()));
    };

    let goal = new_goal(input)?;
    state.store.add_goal(user_id, goal.clone()).await;
    info!("Goal '{}' created for user {}", goal.title, user_id);

    Ok(Json(CreateGoalResponse {
        success: true,
        message: "Goal created successfully".to_string(),
        goal,
        timestamp: Utc::now(),
    }))
}

/// GET /goals/:user_id
pub async fn handle_list_goals(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<GoalsResponse> {
    Json(GoalsResponse {
        success: true,
        goals: state.store.snapshot(user_id).await.goals,
    })
}

/// PUT /profile/:user_id
///
/// Sets the learning style and difficulty used to personalize chat and recommendations.
pub async fn handle_set_profile(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(profile): Json<LearnerProfile>,
) -> Json<ProfileResponse> {
    state.store.set_profile(user_id, profile.clone()).await;

    Json(ProfileResponse {
        success: true,
        profile,
    })
}
