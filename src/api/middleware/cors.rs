//! CORS middleware for the edit frontend.

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::CorsLayer;

/// Creates a CORS middleware scoped to the configured frontend origin.
///
/// Edit pages send the edit token from the browser, so the policy allows
/// credentials. Credentialed requests require an exact origin rather than
/// a wildcard.
pub fn layer(frontend_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(frontend_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}
