//! Short link entity: a stored mapping from a short code to a long URL.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored short URL mapping.
///
/// `short_code` is the public lookup key used in redirect URLs. `edit_id` is
/// a secret capability token: anyone holding it may modify the record, so it
/// is never logged and only ever returned to the creator.
#[derive(Debug, Clone, FromRow)]
pub struct ShortLink {
    pub id: i64,
    /// Public short code, unique across live records.
    pub short_code: String,
    /// Destination URL the short code redirects to.
    pub long_url: String,
    /// Secret edit token, unique across live records.
    pub edit_id: String,
    /// Expiration timestamp in UTC; `None` means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,
    /// QR artifact for the short URL, stored as a base64-encoded PNG.
    pub qr_code: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    /// Whether the expiration timestamp has passed.
    ///
    /// The boundary is exclusive: a record expiring exactly now is still
    /// live. Expired records are removed lazily by the read paths, so this
    /// check decides between serving and reaping.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|expires_at| Utc::now() > expires_at)
    }
}

/// Insert payload for a new short link.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewShortLink {
    pub short_code: String,
    pub long_url: String,
    pub edit_id: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub qr_code: String,
}

/// Partial update applied to a short link through its edit token.
///
/// `short_code` and `qr_code` keep their stored value when `None`.
/// `expires_at` is always written: `None` clears the expiration, making the
/// link permanent. An edit request that omits the expiration therefore
/// removes any previously set one.
#[derive(Debug, Clone)]
pub struct ShortLinkPatch {
    pub short_code: Option<String>,
    pub qr_code: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
