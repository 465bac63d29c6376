//! 健康检查

use axum::{extract::State, response::Json};

use super::AppState;
use crate::core::error::ApiError;

pub async fn health_check(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    state.database.ping().await?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "database": "connected",
        "timestamp": chrono::Utc::now().to_rfc3339()
    })))
}
