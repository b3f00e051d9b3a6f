//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without business logic. The short link
//! follows the "New Type" pattern with separate structs for creation and
//! partial updates:
//!
//! - [`ShortLink`] - a stored short URL mapping
//! - [`NewShortLink`] - insert payload for a new mapping
//! - [`ShortLinkPatch`] - partial update applied through an edit token

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink, ShortLinkPatch};
