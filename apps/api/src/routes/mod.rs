pub mod health;

use axum::{routing::get, routing::post, Router};

use crate::analytics::handlers as stats_handlers;
use crate::deck::handlers as deck_handlers;
use crate::prompting::handlers as prompt_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Interaction analytics
        .route(
            "/api/v1/interactions/stats",
            post(stats_handlers::handle_stats),
        )
        // Prompt assembly
        .route(
            "/api/v1/prompts/initial",
            post(prompt_handlers::handle_initial_prompts),
        )
        .route(
            "/api/v1/prompts/followup",
            post(prompt_handlers::handle_followup_prompt),
        )
        // Deck generation
        .route("/api/v1/report/deck", post(deck_handlers::handle_deck))
        .route(
            "/api/v1/report/deck/request",
            post(deck_handlers::handle_deck_request),
        )
        .with_state(state)
}
