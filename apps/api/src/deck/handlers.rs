//! Axum route handlers for deck generation.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::analytics::stats::compose_stats;
use crate::deck::builder::{build_deck_request, ThemeReport};
use crate::deck::DeckRequest;
use crate::errors::AppError;
use crate::rows::normalize::normalize_rows;
use crate::rows::payload::extract_rows_from_content;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DeckReportRequest {
    pub content: Value,
    pub themes: ThemeReport,
}

fn assemble_request(body: DeckReportRequest) -> Result<DeckRequest, AppError> {
    if body.content.is_null() {
        return Err(AppError::Validation("content cannot be null".to_string()));
    }

    let mut rows = extract_rows_from_content(body.content);
    normalize_rows(&mut rows);
    let stats = compose_stats(&rows).map_err(|e| AppError::Chart(e.to_string()))?;
    Ok(build_deck_request(&stats, &body.themes))
}

/// POST /api/v1/report/deck
///
/// Builds the full deck request and forwards it to the rendering collaborator,
/// streaming the rendered document back to the caller.
pub async fn handle_deck(
    State(state): State<AppState>,
    Json(body): Json<DeckReportRequest>,
) -> Result<Response, AppError> {
    let request = assemble_request(body)?;
    let bytes = state.deck.render(&request).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/octet-stream"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"insights-report.pptx\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// POST /api/v1/report/deck/request
///
/// Returns the deck request as JSON without calling the collaborator, so the
/// placement payload can be inspected.
pub async fn handle_deck_request(
    State(_state): State<AppState>,
    Json(body): Json<DeckReportRequest>,
) -> Result<Json<DeckRequest>, AppError> {
    let request = assemble_request(body)?;
    Ok(Json(request))
}
