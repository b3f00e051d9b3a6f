//! Short code and edit token generation, plus custom alias validation.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Alphabet for generated identifiers: ASCII alphanumerics minus the easily
/// confused characters `0`, `O`, `1`, `l`, and `I`.
const CODE_ALPHABET: &[u8] = b"23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length of a generated public short code.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Length of a generated secret edit token.
///
/// Longer than a short code: edit tokens gate modification, so they get a
/// larger keyspace against guessing.
pub const EDIT_ID_LENGTH: usize = 10;

/// Aliases that collide with API routes and cannot be used as short codes.
const RESERVED_ALIASES: &[&str] = &["shorten", "qrcode", "edit", "health"];

/// Generates a random public short code.
///
/// # Examples
///
/// ```ignore
/// let code = generate_short_code();
/// assert_eq!(code.len(), 6);
/// ```
pub fn generate_short_code() -> String {
    random_identifier(SHORT_CODE_LENGTH)
}

/// Generates a random secret edit token.
pub fn generate_edit_id() -> String {
    random_identifier(EDIT_ID_LENGTH)
}

fn random_identifier(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 1-64 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_alias("my-link").is_ok());
/// assert!(validate_custom_alias("Promo_2025").is_ok());
///
/// assert!(validate_custom_alias("my link").is_err());  // Space
/// assert!(validate_custom_alias("health").is_err());   // Reserved
/// ```
pub fn validate_custom_alias(alias: &str) -> Result<(), AppError> {
    if alias.is_empty() || alias.len() > 64 {
        return Err(AppError::validation(
            "Custom alias must be 1-64 characters",
            json!({ "provided_length": alias.len() }),
        ));
    }

    if !alias
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AppError::validation(
            "Custom alias can only contain letters, digits, hyphens, and underscores",
            json!({ "alias": alias }),
        ));
    }

    if RESERVED_ALIASES.contains(&alias) {
        return Err(AppError::validation(
            "This alias is reserved",
            json!({ "alias": alias }),
        ));
    }

    Ok(())
}
