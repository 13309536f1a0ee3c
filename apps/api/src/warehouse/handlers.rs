use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::warehouse::WarehouseStatus;

/// GET /warehouse/health
///
/// Reports whether chat logging is active and, if so, how many rows it holds.
pub async fn handle_warehouse_health(
    State(state): State<AppState>,
) -> Result<Json<WarehouseStatus>, AppError> {
    let status = state.chat_log.status().await?;
    Ok(Json(status))
}
