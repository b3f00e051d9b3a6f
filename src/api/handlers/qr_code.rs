//! Handler for QR code retrieval.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::qr_code::QrCodeResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the stored QR artifact for a short code.
///
/// # Endpoint
///
/// `GET /qrcode/{short_code}`
///
/// Serves the artifact persisted at creation (or at the last alias change);
/// nothing is re-rendered on read. Expiry handling matches the redirect
/// path: an expired record is deleted and reported gone.
///
/// # Errors
///
/// Returns 404 Not Found for an unknown code and 410 Gone for an expired
/// one.
pub async fn qr_code_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<QrCodeResponse>, AppError> {
    let qr_code = state.link_service.qr_code(&short_code).await?;

    Ok(Json(QrCodeResponse { qr_code }))
}
