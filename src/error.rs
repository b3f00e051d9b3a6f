//! Application error taxonomy and HTTP response mapping.
//!
//! Every variant maps to a stable machine-readable code and HTTP status.
//! Error responses use a JSON envelope:
//!
//! ```json
//! {"error": {"code": "alias_conflict", "message": "...", "details": {...}}}
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Serialize)]
struct ErrorInfo {
    code: &'static str,
    message: String,
    details: Value,
}

/// Application-level errors surfaced to HTTP clients.
///
/// Validation and policy failures (security screening, alias conflicts,
/// expiration rules) are client errors detected before any write and are
/// never retried. [`AppError::StoreConflict`] is distinct from
/// [`AppError::AliasConflict`]: it means the store's unique index rejected a
/// write that passed the pre-check. Callers may retry it once with a freshly
/// generated code, never with a user-chosen alias.
#[derive(Debug, Error)]
pub enum AppError {
    /// Destination URL failed the security filter.
    #[error("{message}")]
    SecurityRejected { message: String, details: Value },

    /// Request payload failed validation.
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Requested short code is already held by another record.
    #[error("{message}")]
    AliasConflict { message: String, details: Value },

    /// Expiration input could not be parsed as a timestamp.
    #[error("{message}")]
    InvalidExpiration { message: String, details: Value },

    /// Expiration timestamp is not in the future.
    #[error("{message}")]
    ExpirationInPast { message: String, details: Value },

    /// Record expired before the edit; expired records cannot be edited.
    #[error("{message}")]
    AlreadyExpired { message: String, details: Value },

    /// No record matches the lookup key.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Record expired and has been removed; the link is permanently gone.
    #[error("{message}")]
    Expired { message: String, details: Value },

    /// The store's unique index rejected a write (insert or update race).
    #[error("{message}")]
    StoreConflict { message: String, details: Value },

    /// QR artifact rendering failed.
    #[error("{message}")]
    QrGeneration { message: String, details: Value },

    /// The store could not be reached or failed unexpectedly.
    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },
}

impl AppError {
    pub fn security_rejected(url: &str) -> Self {
        Self::SecurityRejected {
            message: "URL failed security checks".to_string(),
            details: json!({ "url": url }),
        }
    }

    pub fn validation(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn alias_conflict(alias: &str) -> Self {
        Self::AliasConflict {
            message: format!("Alias '{alias}' is already in use"),
            details: json!({ "alias": alias }),
        }
    }

    pub fn invalid_expiration(raw: &str) -> Self {
        Self::InvalidExpiration {
            message: "Invalid expiration date format".to_string(),
            details: json!({ "expiration_date": raw }),
        }
    }

    pub fn expiration_in_past(expires_at: DateTime<Utc>) -> Self {
        Self::ExpirationInPast {
            message: "Expiration date cannot be in the past".to_string(),
            details: json!({ "expiration_date": expires_at.to_rfc3339() }),
        }
    }

    pub fn already_expired(short_code: &str) -> Self {
        Self::AlreadyExpired {
            message: "Cannot edit an expired URL".to_string(),
            details: json!({ "short_code": short_code }),
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn expired(short_code: &str) -> Self {
        Self::Expired {
            message: "URL has expired".to_string(),
            details: json!({ "short_code": short_code }),
        }
    }

    pub fn store_conflict(constraint: Option<&str>) -> Self {
        Self::StoreConflict {
            message: "Unique constraint violation".to_string(),
            details: json!({ "constraint": constraint }),
        }
    }

    pub fn qr_generation(reason: impl Into<String>) -> Self {
        Self::QrGeneration {
            message: "Error generating QR code".to_string(),
            details: json!({ "reason": reason.into() }),
        }
    }

    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }

    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::SecurityRejected { .. }
            | Self::Validation { .. }
            | Self::AliasConflict { .. }
            | Self::InvalidExpiration { .. }
            | Self::ExpirationInPast { .. }
            | Self::AlreadyExpired { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::StoreConflict { .. } => StatusCode::CONFLICT,
            Self::Expired { .. } => StatusCode::GONE,
            Self::QrGeneration { .. } | Self::StoreUnavailable { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable machine-readable code included in the response envelope.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SecurityRejected { .. } => "security_rejected",
            Self::Validation { .. } => "validation_error",
            Self::AliasConflict { .. } => "alias_conflict",
            Self::InvalidExpiration { .. } => "invalid_expiration",
            Self::ExpirationInPast { .. } => "expiration_in_past",
            Self::AlreadyExpired { .. } => "already_expired",
            Self::NotFound { .. } => "not_found",
            Self::Expired { .. } => "expired",
            Self::StoreConflict { .. } => "store_conflict",
            Self::QrGeneration { .. } => "qr_generation_failed",
            Self::StoreUnavailable { .. } => "store_unavailable",
        }
    }

    fn into_parts(self) -> (String, Value) {
        match self {
            Self::SecurityRejected { message, details }
            | Self::Validation { message, details }
            | Self::AliasConflict { message, details }
            | Self::InvalidExpiration { message, details }
            | Self::ExpirationInPast { message, details }
            | Self::AlreadyExpired { message, details }
            | Self::NotFound { message, details }
            | Self::Expired { message, details }
            | Self::StoreConflict { message, details }
            | Self::QrGeneration { message, details }
            | Self::StoreUnavailable { message, details } => (message, details),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();
        let (message, details) = self.into_parts();

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            if db.is_unique_violation() {
                return Self::store_conflict(db.constraint());
            }
        }

        Self::store_unavailable("Database error", json!({ "reason": e.to_string() }))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or(Value::Null);
        Self::validation("Request validation failed", details)
    }
}
