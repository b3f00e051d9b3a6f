//! DTOs for the edit endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request body for editing a link through its edit token.
///
/// Both fields are optional. The expiration is rewritten from this request
/// as a whole: omitting it (or sending `"permanent"` or an empty string)
/// clears any stored expiration.
#[derive(Debug, Deserialize)]
pub struct EditRequest {
    /// New short code for the mapping.
    pub custom_alias: Option<String>,

    /// New expiration timestamp (ISO 8601), or `"permanent"` to clear it.
    pub expiration_date: Option<String>,
}

/// Details returned when inspecting a link through its edit token.
#[derive(Debug, Serialize)]
pub struct LinkDetailsResponse {
    pub long_url: String,
    /// Current short code; pre-fills the alias field in edit forms.
    pub custom_alias: String,
    pub expiration_date: Option<DateTime<Utc>>,
    pub short_code: String,
    pub shortened_url: String,
}

/// Summary returned after a successful edit.
#[derive(Debug, Serialize)]
pub struct EditResponse {
    pub original_url: String,
    /// Short URL as it was before this edit.
    pub previous_shortened_url: String,
    pub shortened_url: String,
    pub edit_link: String,
    pub qr_code: String,
    pub expiration_date: Option<DateTime<Utc>>,
}
