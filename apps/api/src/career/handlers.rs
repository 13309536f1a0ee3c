use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::analytics::insights::aggregate;
use crate::career::recommender::{recommend, CareerRecommendations};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CareerResponse {
    pub success: bool,
    pub recommendations: CareerRecommendations,
}

/// GET /career/:user_id
pub async fn handle_career(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Json<CareerResponse> {
    let insights = aggregate(&state.store.snapshot(user_id).await);

    Json(CareerResponse {
        success: true,
        recommendations: recommend(&state.llm, &insights).await,
    })
}
