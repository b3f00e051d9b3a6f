//! QR artifact rendering for short URLs.

use std::io::Cursor;

use base64::Engine as _;
use image::Luma;
use qrcode::QrCode;

use crate::error::AppError;

/// Renders a URL as a QR code and returns the PNG bytes encoded as base64.
///
/// The artifact is generated once per stored short URL and persisted with
/// the record, so lookups never re-render. Clients embed it directly via a
/// `data:image/png;base64,` URI.
///
/// # Errors
///
/// Returns [`AppError::QrGeneration`] when encoding or PNG serialization
/// fails.
pub fn generate_qr_code(url: &str) -> Result<String, AppError> {
    let code = QrCode::new(url.as_bytes()).map_err(|e| AppError::qr_generation(e.to_string()))?;
    let image = code.render::<Luma<u8>>().build();

    let mut png = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .map_err(|e| AppError::qr_generation(e.to_string()))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(png))
}
