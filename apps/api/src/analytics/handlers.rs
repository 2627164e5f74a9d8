//! Axum route handlers for the interaction statistics API.

use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::Value;

use crate::analytics::stats::{compose_stats, StatsRecord};
use crate::errors::AppError;
use crate::rows::normalize::normalize_rows;
use crate::rows::payload::extract_rows_from_content;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsRequest {
    /// The raw interaction export, in any of the supported payload shapes.
    pub content: Value,
}

/// POST /api/v1/interactions/stats
///
/// Full aggregation pipeline: extract → normalize → aggregate → charts.
/// Data-quality problems degrade silently; only chart rendering can fail.
pub async fn handle_stats(
    State(_state): State<AppState>,
    Json(request): Json<StatsRequest>,
) -> Result<Json<StatsRecord>, AppError> {
    if request.content.is_null() {
        return Err(AppError::Validation("content cannot be null".to_string()));
    }

    let mut rows = extract_rows_from_content(request.content);
    normalize_rows(&mut rows);
    let stats = compose_stats(&rows).map_err(|e| AppError::Chart(e.to_string()))?;
    Ok(Json(stats))
}
