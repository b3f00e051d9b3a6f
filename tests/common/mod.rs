#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use chrono::{DateTime, Utc};
use snaplink::application::services::{LinkService, PublicUrls};
use snaplink::domain::entities::{NewShortLink, ShortLink};
use snaplink::domain::repositories::LinkRepository;
use snaplink::infrastructure::persistence::MemoryLinkRepository;
use snaplink::routes::api_router;
use snaplink::state::AppState;

pub const BASE_URL: &str = "https://sn.ap";
pub const FRONTEND_URL: &str = "https://app.sn.ap";

/// QR placeholder for seeded rows; a regenerated artifact never equals it.
pub const SEED_QR: &str = "ZmFrZS1xcg==";

pub fn create_test_state() -> (AppState, Arc<MemoryLinkRepository>) {
    let repository = Arc::new(MemoryLinkRepository::new());
    let urls = PublicUrls::new(BASE_URL, FRONTEND_URL);
    let link_service = Arc::new(LinkService::new(repository.clone(), urls));

    (AppState::new(link_service), repository)
}

/// Test server over the full route table and an in-memory repository.
pub fn create_test_server() -> (TestServer, Arc<MemoryLinkRepository>) {
    let (state, repository) = create_test_state();
    let app = api_router().with_state(state);
    let server = TestServer::new(app).unwrap();

    (server, repository)
}

pub async fn seed_link(
    repository: &MemoryLinkRepository,
    short_code: &str,
    long_url: &str,
    edit_id: &str,
    expires_at: Option<DateTime<Utc>>,
) -> ShortLink {
    repository
        .insert(NewShortLink {
            short_code: short_code.to_string(),
            long_url: long_url.to_string(),
            edit_id: edit_id.to_string(),
            expires_at,
            qr_code: SEED_QR.to_string(),
        })
        .await
        .unwrap()
}

/// Extracts the short code from a `https://sn.ap/{code}` URL.
pub fn code_from_short_url(short_url: &str) -> String {
    short_url
        .strip_prefix(&format!("{BASE_URL}/"))
        .unwrap()
        .to_string()
}

/// Extracts the edit token from a `https://app.sn.ap/edit/{token}` link.
pub fn token_from_edit_link(edit_link: &str) -> String {
    edit_link
        .strip_prefix(&format!("{FRONTEND_URL}/edit/"))
        .unwrap()
        .to_string()
}
