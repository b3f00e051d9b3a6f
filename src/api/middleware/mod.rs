//! HTTP middleware for request processing.
//!
//! Provides CORS and observability middleware.

pub mod cors;
pub mod tracing;
