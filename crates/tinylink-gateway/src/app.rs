use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{create_url_handler, health_handler, redirect_handler};
use crate::state::AppState;

/// Entry point for assembling the HTTP surface of the gateway.
pub struct App {}

impl App {
    /// Builds the gateway router.
    ///
    /// Static routes take priority over `/{short_code}`, so `/api/...` never
    /// reaches the redirect handler.
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/api/health", get(health_handler))
            .route("/api/url", post(create_url_handler))
            .route("/api/url/{short_code}", get(redirect_handler))
            .route("/{short_code}", get(redirect_handler))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
