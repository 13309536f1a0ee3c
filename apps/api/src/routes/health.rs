use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service status, version, and whether the AI backend is configured.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "learning-companion",
        "version": env!("CARGO_PKG_VERSION"),
        "ai_configured": state.llm.is_configured(),
        "model": state.llm.model(),
    }))
}

/// GET /test
/// Banner plus the list of public endpoints.
pub async fn test_handler() -> Json<Value> {
    Json(json!({
        "message": "AI Learning Companion service is running!",
        "timestamp": chrono::Utc::now(),
        "endpoints": [
            "GET /health - Health check",
            "POST /chat - Chat with AI",
            "POST /quiz/generate - Generate a quiz",
            "POST /quiz/grade - Grade the latest quiz",
            "POST /interview/ask - Mock interview question",
            "POST /interview/coach - Feedback on an answer",
            "GET /career/:user_id - Career recommendations",
            "PUT /profile/:user_id - Set learning style and difficulty",
            "POST /goals - Create a learning goal",
            "GET /goals/:user_id - List learning goals",
            "GET /analytics/:user_id - Get analytics",
            "GET /analytics/insights/:user_id - Insights with AI summary",
            "GET /recommendations/:user_id - Get recommendations",
            "GET /warehouse/health - Chat-log warehouse status",
            "GET /test - This test endpoint"
        ]
    }))
}
