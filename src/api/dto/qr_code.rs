//! DTO for the QR code endpoint.

use serde::Serialize;

/// Stored QR artifact for a short link.
///
/// The payload is a base64-encoded PNG, ready for embedding via a
/// `data:image/png;base64,` URI.
#[derive(Debug, Serialize)]
pub struct QrCodeResponse {
    pub qr_code: String,
}
