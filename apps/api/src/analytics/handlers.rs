//! Axum route handlers for learner analytics.

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::insights::{aggregate, Insights};
use crate::analytics::recommendations::personalized_recommendations;
use crate::analytics::summary::ai_summary;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub success: bool,
    pub analytics: Insights,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub success: bool,
    pub insights: Insights,
    pub ai_summary: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub success: bool,
    pub recommendations: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// GET /analytics/:user_id
pub async fn handle_analytics(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<AnalyticsResponse> {
    let record = state.store.snapshot(user_id).await;
    let analytics = aggregate(&record);
    let recommendations = personalized_recommendations(&analytics, record.profile.as_ref());

    Json(AnalyticsResponse {
        success: true,
        analytics,
        recommendations,
        timestamp: Utc::now(),
    })
}

/// GET /analytics/insights/:user_id
///
/// Aggregated quiz and interview metrics plus an optional AI summary.
pub async fn handle_insights(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<InsightsResponse> {
    let insights = aggregate(&state.store.snapshot(user_id).await);
    let ai_summary = ai_summary(&state.llm, &insights).await;

    Json(InsightsResponse {
        success: true,
        insights,
        ai_summary,
    })
}

/// GET /recommendations/:user_id
pub async fn handle_recommendations(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<RecommendationsResponse> {
    let record = state.store.snapshot(user_id).await;
    let insights = aggregate(&record);

    Json(RecommendationsResponse {
        success: true,
        recommendations: personalized_recommendations(&insights, record.profile.as_ref()),
        timestamp: Utc::now(),
    })
}
