//! Handler for the link shortening endpoint.

use axum::{Json, extract::State};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "long_url": "https://example.com/some/deep/path",
///   "custom_alias": "my-link",                  // optional
///   "expiration_date": "2025-12-31T00:00:00Z"   // optional, or "permanent"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortened_url": "https://sn.ap/Ab3xYz",
///   "edit_link": "https://app.sn.ap/edit/hK8fWq2DpM",
///   "qr_code": "iVBORw0KGgo..."
/// }
/// ```
///
/// Resubmitting an already-shortened URL returns the stored mapping with
/// `already_shortened: true` and an explanatory message instead of an error.
///
/// # Errors
///
/// Returns 400 Bad Request when the URL is missing, malformed, or rejected
/// by the security filter, when the custom alias is invalid or taken, and
/// when the expiration is unparseable or not in the future.
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<Json<ShortenResponse>, AppError> {
    payload.validate()?;

    let Some(long_url) = payload.long_url else {
        return Err(AppError::validation(
            "Long URL is required",
            json!({ "field": "long_url" }),
        ));
    };

    let outcome = state
        .link_service
        .shorten(
            &long_url,
            payload.custom_alias.as_deref(),
            payload.expiration_date.as_deref(),
        )
        .await?;

    let shortened_url = state.link_service.short_url(&outcome.link.short_code);
    let edit_link = state.link_service.edit_link(&outcome.link.edit_id);

    let response = if outcome.already_shortened {
        ShortenResponse::AlreadyShortened {
            message: "This URL has already been shortened.".to_string(),
            already_shortened: true,
            shortened_url,
            edit_link,
            qr_code: outcome.link.qr_code,
        }
    } else {
        ShortenResponse::Created {
            shortened_url,
            edit_link,
            qr_code: outcome.link.qr_code,
        }
    };

    Ok(Json(response))
}
