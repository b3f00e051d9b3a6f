//! DTOs for the link shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// Destination URL (must be valid HTTP/HTTPS).
    ///
    /// Optional at the type level so a missing field produces the
    /// application's own validation error instead of a deserialization
    /// rejection.
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: Option<String>,

    /// Optional user-chosen short code.
    pub custom_alias: Option<String>,

    /// Optional expiration timestamp (ISO 8601) or `"permanent"`.
    pub expiration_date: Option<String>,
}

/// Response for a shorten request.
///
/// Uses an untagged enum: resubmitting a known URL returns the stored
/// mapping with an explanatory message instead of an error, and new
/// creations carry no flag at all.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ShortenResponse {
    AlreadyShortened {
        message: String,
        already_shortened: bool,
        shortened_url: String,
        edit_link: String,
        qr_code: String,
    },
    Created {
        shortened_url: String,
        edit_link: String,
        qr_code: String,
    },
}
