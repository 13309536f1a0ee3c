//! Validation of learner-submitted goals.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::learner::{GoalStatus, LearningGoal};

const MAX_PROGRESS: i64 = 100;

/// A goal as submitted by the dashboard.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub progress: i64,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: GoalStatus,
}

/// Turns `input` into a stored goal. The title is required; progress is clamped to 0..=100.
pub fn new_goal(input: GoalInput) -> Result<LearningGoal, AppError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("Goal title is required".to_string()));
    }

    Ok(LearningGoal {
        goal_id: Uuid::new_v4(),
        title: title.to_string(),
        description: input.description.trim().to_string(),
        progress: input.progress.clamp(0, MAX_PROGRESS) as u8,
        target_date: input.target_date,
        status: input.status,
        created_at: Utc::now(),
    })
}
