//! Tuning episode bot — HTTP surface.
//!
//! Receives LINE webhook deliveries, verifies their signature, and hands
//! each text message to the conversation engine. Replies go back through
//! the LINE reply API.

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod line;
pub mod routes;
pub mod state;

/// Builds the full application router.
pub fn build_router(state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::webhook::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
