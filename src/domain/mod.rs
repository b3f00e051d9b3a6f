//! Domain layer containing the business data model and contracts.
//!
//! Defines the persisted entities and the repository trait implemented by the
//! infrastructure layer. The domain layer has no dependencies on HTTP or
//! persistence concerns; business rules live in
//! [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions

pub mod entities;
pub mod repositories;
