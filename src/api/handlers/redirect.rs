//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::Redirect,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Uses 307 Temporary Redirect so clients keep re-resolving through the
/// service; the mapping can change or expire at any time.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown code and 410 Gone for an expired
/// one. The first request that observes an expired record also deletes it,
/// so later requests see 404.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let long_url = state.link_service.resolve(&short_code).await?;

    Ok(Redirect::temporary(&long_url))
}
