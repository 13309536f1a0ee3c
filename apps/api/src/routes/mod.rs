pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::career::handlers as career;
use crate::conversation::handlers as conversation;
use crate::interview::handlers as interview;
use crate::profile::handlers as profile;
use crate::quiz::handlers as quiz;
use crate::state::AppState;
use crate::warehouse::handlers as warehouse;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/test", get(health::test_handler))
        .route("/chat", post(conversation::handle_chat))
        // Smart Quiz
        .route("/quiz/generate", post(quiz::handle_generate_quiz))
        .route("/quiz/grade", post(quiz::handle_grade_quiz))
        // Interview Coach
        .route("/interview/ask", post(interview::handle_ask))
        .route("/interview/coach", post(interview::handle_coach))
        // Employability Bridge
        .route("/career/:user_id", get(career::handle_career))
        // Learner profile & goals
        .route("/profile/:user_id", put(profile::handle_set_profile))
        .route("/goals", post(profile::handle_create_goal))
        .route("/goals/:user_id", get(profile::handle_list_goals))
        // Analytics
        .route("/analytics/:user_id", get(analytics::handle_analytics))
        .route(
            "/analytics/insights/:user_id",
            get(analytics::handle_insights),
        )
        .route(
            "/recommendations/:user_id",
            get(analytics::handle_recommendations),
        )
        .route("/warehouse/health", get(warehouse::handle_warehouse_health))
        .with_state(state)
}
