//! Shared application state.

use std::sync::Arc;

use crate::application::services::LinkService;

/// State shared across all request handlers.
///
/// Cloning is cheap; the service is behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }
}
