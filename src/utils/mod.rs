//! Utility functions shared across the application.
//!
//! - [`code_generator`] - short code and edit token generation, alias validation
//! - [`url_security`] - blocklist and heuristic screening of destination URLs
//! - [`expiration`] - expiration timestamp parsing and policy checks
//! - [`qr_code`] - QR artifact rendering

pub mod code_generator;
pub mod expiration;
pub mod qr_code;
pub mod url_security;
