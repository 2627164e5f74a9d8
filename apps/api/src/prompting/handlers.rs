//! Axum route handlers for prompt assembly.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::AppError;
use crate::prompting::{assemble_followup, initial_prompts, InsightTheme};
use crate::rows::normalize::normalize_rows;
use crate::rows::payload::extract_rows_from_content;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InitialPromptsRequest {
    pub content: Value,
}

#[derive(Debug, Serialize)]
pub struct InitialPromptsResponse {
    /// One prompt per theme, in [`InsightTheme::ALL`] order.
    pub prompts: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct FollowupRequest {
    /// Full transcript of the chain so far (prompts and model outputs).
    pub content: String,
    /// The chain step being requested (2, 3, or 4).
    pub step: u8,
    pub theme: InsightTheme,
}

#[derive(Debug, Serialize)]
pub struct FollowupResponse {
    pub prompt: String,
    pub step: u8,
}

/// POST /api/v1/prompts/initial
///
/// Splits the interaction rows by insight category and returns the three
/// theme prompts for the caller's orchestrator to run.
pub async fn handle_initial_prompts(
    State(state): State<AppState>,
    Json(request): Json<InitialPromptsRequest>,
) -> Result<Json<InitialPromptsResponse>, AppError> {
    if request.content.is_null() {
        return Err(AppError::Validation("content cannot be null".to_string()));
    }

    let mut rows = extract_rows_from_content(request.content);
    normalize_rows(&mut rows);
    let prompts = initial_prompts(&rows, &state.config.product_name);
    Ok(Json(InitialPromptsResponse { prompts }))
}

/// POST /api/v1/prompts/followup
///
/// Returns the next prompt in the gaps → behaviors → needs → actions chain,
/// with the prior transcript spliced in front.
pub async fn handle_followup_prompt(
    State(state): State<AppState>,
    Json(request): Json<FollowupRequest>,
) -> Result<Json<FollowupResponse>, AppError> {
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("content cannot be empty".to_string()));
    }

    let prompt = assemble_followup(
        &request.content,
        request.step,
        request.theme,
        &state.config.product_name,
    )
    .ok_or_else(|| {
        AppError::Validation(format!(
            "step must be 2, 3, or 4 (got {})",
            request.step
        ))
    })?;

    Ok(Json(FollowupResponse {
        prompt,
        step: request.step,
    }))
}
