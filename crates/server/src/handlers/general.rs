//! # General Route Handlers
//!
//! The static exploration page and the health check.

use axum::response::Html;

/// Serves the single-page exploration UI.
pub async fn root() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}
