//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for data operations and are implemented by
//! concrete repositories in the infrastructure layer. A mock implementation
//! is auto-generated via `mockall` for service unit tests.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - short link storage operations

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
