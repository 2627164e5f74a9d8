use std::sync::Arc;

use crate::config::Config;
use crate::deck::DeckRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable deck rendering collaborator. Production: HttpDeckRenderer.
    pub deck: Arc<dyn DeckRenderer>,
}
