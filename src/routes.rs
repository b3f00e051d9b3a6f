//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`                   - API greeting
//! - `GET  /health`             - Health check (database connectivity)
//! - `POST /shorten`            - Create a short link
//! - `GET  /qrcode/{short_code}` - QR code for an existing short link
//! - `GET  /edit/{edit_id}`     - Link details for the edit page
//! - `PUT  /edit/{edit_id}`     - Apply edits to a link
//! - `GET  /{short_code}`       - Short link redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Scoped to the configured edit frontend origin
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::{
    edit_link_handler, health_handler, link_details_handler, qr_code_handler, redirect_handler,
    root_handler, shorten_handler,
};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// All API routes, without middleware or state.
///
/// Kept separate from [`app_router`] so integration tests can mount the
/// routes over an in-memory repository without the HTTP middleware stack.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/shorten", post(shorten_handler))
        .route("/qrcode/{short_code}", get(qr_code_handler))
        .route(
            "/edit/{edit_id}",
            get(link_details_handler).put(edit_link_handler),
        )
        .route("/{short_code}", get(redirect_handler))
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `frontend_origin` - exact origin of the edit frontend, granted
///   credentialed CORS access
pub fn app_router(state: AppState, frontend_origin: HeaderValue) -> NormalizePath<Router> {
    let router = api_router()
        .with_state(state)
        .layer(cors::layer(frontend_origin))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
