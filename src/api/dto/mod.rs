//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation.

pub mod edit;
pub mod health;
pub mod qr_code;
pub mod shorten;
