//! Handlers for token-gated link inspection and editing.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::edit::{EditRequest, EditResponse, LinkDetailsResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the details of the link owned by an edit token.
///
/// # Endpoint
///
/// `GET /edit/{edit_id}`
///
/// Used by edit forms to pre-fill the current state. This is a plain read:
/// unlike the mutating edit, it does not reap an expired record.
///
/// # Errors
///
/// Returns 404 Not Found when no record matches the token.
pub async fn link_details_handler(
    Path(edit_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkDetailsResponse>, AppError> {
    let link = state.link_service.inspect(&edit_id).await?;
    let shortened_url = state.link_service.short_url(&link.short_code);

    Ok(Json(LinkDetailsResponse {
        long_url: link.long_url,
        custom_alias: link.short_code.clone(),
        expiration_date: link.expires_at,
        short_code: link.short_code,
        shortened_url,
    }))
}

/// Applies an edit to the link owned by an edit token.
///
/// # Endpoint
///
/// `PUT /edit/{edit_id}`
///
/// # Request Body
///
/// ```json
/// {
///   "custom_alias": "new-name",                 // optional
///   "expiration_date": "2025-12-31T00:00:00Z"   // optional, or "permanent"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "original_url": "https://example.com/some/deep/path",
///   "previous_shortened_url": "https://sn.ap/Ab3xYz",
///   "shortened_url": "https://sn.ap/new-name",
///   "edit_link": "https://app.sn.ap/edit/hK8fWq2DpM",
///   "qr_code": "iVBORw0KGgo...",
///   "expiration_date": "2025-12-31T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found for an unknown token and 400 Bad Request when the
/// record already expired (it is deleted in that case), when the new alias
/// is invalid or taken, and when the expiration is unparseable or not in
/// the future.
pub async fn edit_link_handler(
    Path(edit_id): Path<String>,
    State(state): State<AppState>,
    Json(payload): Json<EditRequest>,
) -> Result<Json<EditResponse>, AppError> {
    let outcome = state
        .link_service
        .edit(
            &edit_id,
            payload.custom_alias.as_deref(),
            payload.expiration_date.as_deref(),
        )
        .await?;

    Ok(Json(EditResponse {
        original_url: outcome.link.long_url.clone(),
        previous_shortened_url: state.link_service.short_url(&outcome.previous_code),
        shortened_url: state.link_service.short_url(&outcome.link.short_code),
        edit_link: state.link_service.edit_link(&outcome.link.edit_id),
        qr_code: outcome.link.qr_code,
        expiration_date: outcome.link.expires_at,
    }))
}
