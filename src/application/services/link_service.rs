//! Short link lifecycle service: creation, resolution, expiry, and edits.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewShortLink, ShortLink, ShortLinkPatch};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_edit_id, generate_short_code, validate_custom_alias};
use crate::utils::expiration::resolve_expiration;
use crate::utils::qr_code::generate_qr_code;
use crate::utils::url_security::is_allowed;

/// Attempts at generating a collision-free identifier before giving up.
const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Public URL roots used to build short links and edit links.
///
/// Constructed once from configuration at startup and injected into
/// [`LinkService`], so handlers and tests never reach for the environment.
#[derive(Debug, Clone)]
pub struct PublicUrls {
    base_url: String,
    frontend_url: String,
}

impl PublicUrls {
    /// Creates the URL set, trimming trailing slashes from both roots.
    pub fn new(base_url: &str, frontend_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Full public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    /// Frontend edit-page link for an edit token.
    pub fn edit_link(&self, edit_id: &str) -> String {
        format!("{}/edit/{}", self.frontend_url, edit_id)
    }
}

/// Result of a shorten request.
#[derive(Debug)]
pub struct ShortenOutcome {
    pub link: ShortLink,
    /// True when the URL was shortened earlier and the stored mapping is
    /// returned instead of a new one.
    pub already_shortened: bool,
}

/// Result of an edit applied through an edit token.
#[derive(Debug)]
pub struct EditOutcome {
    /// Short code the mapping held before the edit.
    pub previous_code: String,
    pub link: ShortLink,
}

/// Service owning the short link lifecycle.
///
/// Creation runs security screening, deduplication by destination URL, code
/// selection, and expiration policy before a single insert. Read paths reap
/// expired records lazily, so an expired mapping is never served as live.
/// Edits are gated by the secret edit token and land as one atomic patch.
///
/// Collision pre-checks are a fast path only; the store's unique indexes
/// remain the authority at write time.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    urls: PublicUrls,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>, urls: PublicUrls) -> Self {
        Self { repository, urls }
    }

    /// Full public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        self.urls.short_url(short_code)
    }

    /// Frontend edit-page link for an edit token.
    pub fn edit_link(&self, edit_id: &str) -> String {
        self.urls.edit_link(edit_id)
    }

    /// Creates a short link, or returns the existing one for a known URL.
    ///
    /// # Flow
    ///
    /// 1. Screen the destination URL against the security filter
    /// 2. Deduplicate: an exact `long_url` match returns the stored mapping
    /// 3. Select the short code (validated custom alias, or generated)
    /// 4. Parse the expiration and refuse timestamps not in the future
    /// 5. Generate the edit token, render the QR artifact, insert
    ///
    /// An empty custom alias is treated as absent. Deduplication wins over
    /// the alias: resubmitting a known URL returns the stored mapping even
    /// when a conflicting alias is supplied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SecurityRejected`], [`AppError::Validation`],
    /// [`AppError::AliasConflict`], [`AppError::InvalidExpiration`], or
    /// [`AppError::ExpirationInPast`] for rejected input, and
    /// [`AppError::StoreConflict`] when a custom alias loses an insert race.
    pub async fn shorten(
        &self,
        long_url: &str,
        custom_alias: Option<&str>,
        expiration_date: Option<&str>,
    ) -> Result<ShortenOutcome, AppError> {
        if !is_allowed(long_url) {
            return Err(AppError::security_rejected(long_url));
        }

        if let Some(existing) = self.repository.find_by_long_url(long_url).await? {
            tracing::debug!(
                short_code = %existing.short_code,
                "URL already shortened, returning stored mapping"
            );
            return Ok(ShortenOutcome {
                link: existing,
                already_shortened: true,
            });
        }

        let custom_alias = custom_alias.filter(|alias| !alias.is_empty());
        let short_code = match custom_alias {
            Some(alias) => {
                validate_custom_alias(alias)?;

                if self.repository.find_by_code(alias).await?.is_some() {
                    return Err(AppError::alias_conflict(alias));
                }

                alias.to_string()
            }
            None => self.generate_unique_short_code().await?,
        };

        let expires_at = resolve_expiration(expiration_date)?;
        let edit_id = self.generate_unique_edit_id().await?;
        let qr_code = generate_qr_code(&self.urls.short_url(&short_code))?;

        let new_link = NewShortLink {
            short_code,
            long_url: long_url.to_string(),
            edit_id,
            expires_at,
            qr_code,
        };

        match self.repository.insert(new_link).await {
            Ok(link) => {
                tracing::info!(short_code = %link.short_code, "short link created");
                Ok(ShortenOutcome {
                    link,
                    already_shortened: false,
                })
            }
            // The unique index caught a write race the pre-check missed.
            // Generated identifiers are retried once with fresh values; a
            // user-chosen alias is never silently replaced.
            Err(AppError::StoreConflict { .. }) if custom_alias.is_none() => {
                tracing::warn!("short code insert raced a concurrent write, retrying once");

                let short_code = self.generate_unique_short_code().await?;
                let edit_id = self.generate_unique_edit_id().await?;
                let qr_code = generate_qr_code(&self.urls.short_url(&short_code))?;

                let link = self
                    .repository
                    .insert(NewShortLink {
                        short_code,
                        long_url: long_url.to_string(),
                        edit_id,
                        expires_at,
                        qr_code,
                    })
                    .await?;

                tracing::info!(short_code = %link.short_code, "short link created");
                Ok(ShortenOutcome {
                    link,
                    already_shortened: false,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Resolves a short code to its destination URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown code and
    /// [`AppError::Expired`] when the record expired; the expired record is
    /// deleted before the error is returned.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let link = self.lookup_by_code(short_code).await?;

        if self.reap_if_expired(&link).await? {
            return Err(AppError::expired(short_code));
        }

        Ok(link.long_url)
    }

    /// Returns the stored QR artifact for a short code.
    ///
    /// Expiry handling is identical to [`Self::resolve`]: an expired record
    /// is reaped and reported gone, never served.
    pub async fn qr_code(&self, short_code: &str) -> Result<String, AppError> {
        let link = self.lookup_by_code(short_code).await?;

        if self.reap_if_expired(&link).await? {
            return Err(AppError::expired(short_code));
        }

        Ok(link.qr_code)
    }

    /// Returns the record owned by an edit token, for pre-filling edit forms.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no record matches the token.
    pub async fn inspect(&self, edit_id: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_edit_id(edit_id)
            .await?
            .ok_or_else(|| AppError::not_found("Edit link is invalid or expired", json!({})))
    }

    /// Applies an edit to the record owned by an edit token.
    ///
    /// A changed alias is validated and pre-checked like at creation, and
    /// carries a regenerated QR artifact in the same patch. The expiration
    /// is always rewritten from the request: omitted, empty, or
    /// `"permanent"` input clears it. Supplying the current code is a no-op
    /// for the alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown token and
    /// [`AppError::AlreadyExpired`] when the record expired; the expired
    /// record is deleted before the error is returned. Alias and expiration
    /// failures mirror [`Self::shorten`].
    pub async fn edit(
        &self,
        edit_id: &str,
        custom_alias: Option<&str>,
        expiration_date: Option<&str>,
    ) -> Result<EditOutcome, AppError> {
        let link = self
            .repository
            .find_by_edit_id(edit_id)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({})))?;

        if self.reap_if_expired(&link).await? {
            return Err(AppError::already_expired(&link.short_code));
        }

        let staged_code = match custom_alias.filter(|alias| !alias.is_empty()) {
            Some(alias) if alias != link.short_code => {
                validate_custom_alias(alias)?;

                if self.repository.find_by_code(alias).await?.is_some() {
                    return Err(AppError::alias_conflict(alias));
                }

                Some(alias.to_string())
            }
            _ => None,
        };

        let expires_at = resolve_expiration(expiration_date)?;

        // A code change carries its regenerated QR artifact in the same
        // patch, so the stored artifact never points at a stale short URL.
        let qr_code = match &staged_code {
            Some(code) => Some(generate_qr_code(&self.urls.short_url(code))?),
            None => None,
        };

        let patch = ShortLinkPatch {
            short_code: staged_code,
            qr_code,
            expires_at,
        };

        let updated = self.repository.update(edit_id, patch).await?;
        tracing::info!(short_code = %updated.short_code, "short link updated");

        Ok(EditOutcome {
            previous_code: link.short_code,
            link: updated,
        })
    }

    /// Verifies that the backing store is reachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn lookup_by_code(&self, short_code: &str) -> Result<ShortLink, AppError> {
        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "short_code": short_code }))
            })
    }

    /// Deletes the record when its expiration has passed.
    ///
    /// Lazy reaping: expired records are removed by the first access that
    /// observes them. Returns whether the record was reaped.
    async fn reap_if_expired(&self, link: &ShortLink) -> Result<bool, AppError> {
        if !link.is_expired() {
            return Ok(false);
        }

        self.repository.delete_by_code(&link.short_code).await?;
        tracing::info!(short_code = %link.short_code, "expired link removed");

        Ok(true)
    }

    /// Generates a short code not currently present in the store.
    async fn generate_unique_short_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code = generate_short_code();

            if self.repository.find_by_code(&code).await?.is_none() {
                return Ok(code);
            }
        }

        Err(AppError::store_unavailable(
            "Failed to generate a unique short code",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Generates an edit token not currently present in the store.
    async fn generate_unique_edit_id(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let edit_id = generate_edit_id();

            if self.repository.find_by_edit_id(&edit_id).await?.is_none() {
                return Ok(edit_id);
            }
        }

        Err(AppError::store_unavailable(
            "Failed to generate a unique edit token",
            json!({ "reason": "Too many collisions" }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use chrono::{Duration, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sample_link(id: i64, short_code: &str, long_url: &str) -> ShortLink {
        ShortLink {
            id,
            short_code: short_code.to_string(),
            long_url: long_url.to_string(),
            edit_id: format!("tok{id:07}"),
            expires_at: None,
            qr_code: "c2FtcGxlLXFy".to_string(),
            created_at: Utc::now(),
        }
    }

    fn expired_link(id: i64, short_code: &str) -> ShortLink {
        ShortLink {
            expires_at: Some(Utc::now() - Duration::hours(1)),
            ..sample_link(id, short_code, "https://example.com/old")
        }
    }

    fn inserted(id: i64, new_link: &NewShortLink) -> ShortLink {
        ShortLink {
            id,
            short_code: new_link.short_code.clone(),
            long_url: new_link.long_url.clone(),
            edit_id: new_link.edit_id.clone(),
            expires_at: new_link.expires_at,
            qr_code: new_link.qr_code.clone(),
            created_at: Utc::now(),
        }
    }

    fn make_service(repository: MockLinkRepository) -> LinkService {
        LinkService::new(
            Arc::new(repository),
            PublicUrls::new("https://sn.ap", "https://app.sn.ap"),
        )
    }

    #[test]
    fn test_public_urls_strip_trailing_slash() {
        let urls = PublicUrls::new("https://sn.ap/", "https://app.sn.ap/");
        assert_eq!(urls.short_url("abc"), "https://sn.ap/abc");
        assert_eq!(urls.edit_link("tok"), "https://app.sn.ap/edit/tok");
    }

    #[tokio::test]
    async fn test_shorten_creates_link() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code().times(1).returning(|_| Ok(None));
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_insert()
            .withf(|new_link| {
                new_link.short_code.len() == 6
                    && new_link.edit_id.len() == 10
                    && !new_link.qr_code.is_empty()
                    && new_link.expires_at.is_none()
            })
            .times(1)
            .returning(|new_link| Ok(inserted(10, &new_link)));

        let service = make_service(mock);
        let outcome = service
            .shorten("https://example.com/page", None, None)
            .await
            .unwrap();

        assert!(!outcome.already_shortened);
        assert_eq!(outcome.link.long_url, "https://example.com/page");
    }

    #[tokio::test]
    async fn test_shorten_rejects_blocked_url() {
        let mock = MockLinkRepository::new();

        let service = make_service(mock);
        let result = service
            .shorten("https://badwebsite.net/login", None, None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::SecurityRejected { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_dedup_returns_existing() {
        let mut mock = MockLinkRepository::new();

        let existing = sample_link(5, "known1", "https://example.com/page");
        mock.expect_find_by_long_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock.expect_insert().times(0);

        let service = make_service(mock);
        let outcome = service
            .shorten("https://example.com/page", None, None)
            .await
            .unwrap();

        assert!(outcome.already_shortened);
        assert_eq!(outcome.link.short_code, "known1");
    }

    #[tokio::test]
    async fn test_shorten_dedup_wins_over_custom_alias() {
        let mut mock = MockLinkRepository::new();

        let existing = sample_link(5, "known1", "https://example.com/page");
        mock.expect_find_by_long_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock.expect_find_by_code().times(0);
        mock.expect_insert().times(0);

        let service = make_service(mock);
        let outcome = service
            .shorten("https://example.com/page", Some("known1"), None)
            .await
            .unwrap();

        assert!(outcome.already_shortened);
    }

    #[tokio::test]
    async fn test_shorten_uses_custom_alias() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code()
            .withf(|code| code == "promo")
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_insert()
            .withf(|new_link| new_link.short_code == "promo")
            .times(1)
            .returning(|new_link| Ok(inserted(10, &new_link)));

        let service = make_service(mock);
        let outcome = service
            .shorten("https://example.com/page", Some("promo"), None)
            .await
            .unwrap();

        assert_eq!(outcome.link.short_code, "promo");
    }

    #[tokio::test]
    async fn test_shorten_custom_alias_conflict() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        let taken = sample_link(5, "promo", "https://other.example.com");
        mock.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(taken.clone())));
        mock.expect_insert().times(0);

        let service = make_service(mock);
        let result = service
            .shorten("https://example.com/page", Some("promo"), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::AliasConflict { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_invalid_alias_rejected() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code().times(0);

        let service = make_service(mock);
        let result = service
            .shorten("https://example.com/page", Some("bad alias!"), None)
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_empty_alias_falls_back_to_generated() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code()
            .withf(|code| code.len() == 6)
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_insert()
            .times(1)
            .returning(|new_link| Ok(inserted(10, &new_link)));

        let service = make_service(mock);
        let outcome = service
            .shorten("https://example.com/page", Some(""), None)
            .await
            .unwrap();

        assert_eq!(outcome.link.short_code.len(), 6);
    }

    #[tokio::test]
    async fn test_shorten_regenerates_code_on_collision() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));

        let colliding = sample_link(5, "taken1", "https://other.example.com");
        let calls = AtomicUsize::new(0);
        mock.expect_find_by_code()
            .times(2)
            .returning(move |_| {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Ok(Some(colliding.clone()))
                } else {
                    Ok(None)
                }
            });
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_insert()
            .times(1)
            .returning(|new_link| Ok(inserted(10, &new_link)));

        let service = make_service(mock);
        let outcome = service
            .shorten("https://example.com/page", None, None)
            .await
            .unwrap();

        assert!(!outcome.already_shortened);
    }

    #[tokio::test]
    async fn test_shorten_invalid_expiration_rejected() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code().times(1).returning(|_| Ok(None));
        mock.expect_find_by_edit_id().times(0);
        mock.expect_insert().times(0);

        let service = make_service(mock);
        let result = service
            .shorten("https://example.com/page", None, Some("tomorrow-ish"))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::InvalidExpiration { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_past_expiration_rejected() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code().times(1).returning(|_| Ok(None));
        mock.expect_insert().times(0);

        let service = make_service(mock);
        let past = (Utc::now() - Duration::days(1)).to_rfc3339();
        let result = service
            .shorten("https://example.com/page", None, Some(&past))
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ExpirationInPast { .. }
        ));
    }

    #[tokio::test]
    async fn test_shorten_stores_parsed_expiration() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code().times(1).returning(|_| Ok(None));
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_insert()
            .withf(|new_link| new_link.expires_at.is_some())
            .times(1)
            .returning(|new_link| Ok(inserted(10, &new_link)));

        let service = make_service(mock);
        let future = (Utc::now() + Duration::days(30)).to_rfc3339();
        let outcome = service
            .shorten("https://example.com/page", None, Some(&future))
            .await
            .unwrap();

        assert!(outcome.link.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_shorten_retries_generated_code_on_store_conflict() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code().times(2).returning(|_| Ok(None));
        mock.expect_find_by_edit_id()
            .times(2)
            .returning(|_| Ok(None));

        let attempts = AtomicUsize::new(0);
        mock.expect_insert().times(2).returning(move |new_link| {
            if attempts.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::store_conflict(Some("short_links_short_code_key")))
            } else {
                Ok(inserted(11, &new_link))
            }
        });

        let service = make_service(mock);
        let outcome = service
            .shorten("https://example.com/page", None, None)
            .await
            .unwrap();

        assert!(!outcome.already_shortened);
        assert_eq!(outcome.link.id, 11);
    }

    #[tokio::test]
    async fn test_shorten_custom_alias_store_conflict_not_retried() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_long_url()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_find_by_code().times(1).returning(|_| Ok(None));
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_insert()
            .times(1)
            .returning(|_| Err(AppError::store_conflict(Some("short_links_short_code_key"))));

        let service = make_service(mock);
        let result = service
            .shorten("https://example.com/page", Some("promo"), None)
            .await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::StoreConflict { .. }
        ));
    }

    #[tokio::test]
    async fn test_resolve_returns_long_url() {
        let mut mock = MockLinkRepository::new();

        let link = sample_link(1, "abc123", "https://example.com/target");
        mock.expect_find_by_code()
            .withf(|code| code == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock.expect_delete_by_code().times(0);

        let service = make_service(mock);
        let long_url = service.resolve("abc123").await.unwrap();

        assert_eq!(long_url, "https://example.com/target");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_code().times(1).returning(|_| Ok(None));

        let service = make_service(mock);
        let result = service.resolve("nosuch").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_expired_reaps_and_returns_gone() {
        let mut mock = MockLinkRepository::new();

        let link = expired_link(1, "old123");
        mock.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock.expect_delete_by_code()
            .withf(|code| code == "old123")
            .times(1)
            .returning(|_| Ok(true));

        let service = make_service(mock);
        let result = service.resolve("old123").await;

        assert!(matches!(result.unwrap_err(), AppError::Expired { .. }));
    }

    #[tokio::test]
    async fn test_qr_code_returns_stored_artifact() {
        let mut mock = MockLinkRepository::new();

        let link = sample_link(1, "abc123", "https://example.com/target");
        mock.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = make_service(mock);
        let qr_code = service.qr_code("abc123").await.unwrap();

        assert_eq!(qr_code, "c2FtcGxlLXFy");
    }

    #[tokio::test]
    async fn test_qr_code_expired_reaps_and_returns_gone() {
        let mut mock = MockLinkRepository::new();

        let link = expired_link(1, "old123");
        mock.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock.expect_delete_by_code()
            .times(1)
            .returning(|_| Ok(true));

        let service = make_service(mock);
        let result = service.qr_code("old123").await;

        assert!(matches!(result.unwrap_err(), AppError::Expired { .. }));
    }

    #[tokio::test]
    async fn test_inspect_returns_record() {
        let mut mock = MockLinkRepository::new();

        let link = sample_link(1, "abc123", "https://example.com/target");
        let edit_id = link.edit_id.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let service = make_service(mock);
        let found = service.inspect(&edit_id).await.unwrap();

        assert_eq!(found.short_code, "abc123");
    }

    #[tokio::test]
    async fn test_inspect_unknown_token() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = make_service(mock);
        let result = service.inspect("tok0000000").await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_edit_changes_alias_and_regenerates_qr() {
        let mut mock = MockLinkRepository::new();

        let current = sample_link(1, "oldcode", "https://example.com/target");
        let edit_id = current.edit_id.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        mock.expect_find_by_code()
            .withf(|code| code == "newcode")
            .times(1)
            .returning(|_| Ok(None));

        let updated = sample_link(1, "newcode", "https://example.com/target");
        mock.expect_update()
            .withf(|_, patch| {
                patch.short_code.as_deref() == Some("newcode")
                    && patch.qr_code.is_some()
                    && patch.expires_at.is_none()
            })
            .times(1)
            .returning(move |_, _| Ok(updated.clone()));

        let service = make_service(mock);
        let outcome = service
            .edit(&edit_id, Some("newcode"), None)
            .await
            .unwrap();

        assert_eq!(outcome.previous_code, "oldcode");
        assert_eq!(outcome.link.short_code, "newcode");
    }

    #[tokio::test]
    async fn test_edit_same_alias_is_noop_for_code() {
        let mut mock = MockLinkRepository::new();

        let current = sample_link(1, "oldcode", "https://example.com/target");
        let edit_id = current.edit_id.clone();
        let unchanged = current.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        mock.expect_find_by_code().times(0);
        mock.expect_update()
            .withf(|_, patch| patch.short_code.is_none() && patch.qr_code.is_none())
            .times(1)
            .returning(move |_, _| Ok(unchanged.clone()));

        let service = make_service(mock);
        let outcome = service.edit(&edit_id, Some("oldcode"), None).await.unwrap();

        assert_eq!(outcome.previous_code, "oldcode");
        assert_eq!(outcome.link.short_code, "oldcode");
    }

    #[tokio::test]
    async fn test_edit_alias_conflict() {
        let mut mock = MockLinkRepository::new();

        let current = sample_link(1, "oldcode", "https://example.com/target");
        let edit_id = current.edit_id.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));

        let taken = sample_link(2, "newcode", "https://other.example.com");
        mock.expect_find_by_code()
            .times(1)
            .returning(move |_| Ok(Some(taken.clone())));
        mock.expect_update().times(0);

        let service = make_service(mock);
        let result = service.edit(&edit_id, Some("newcode"), None).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::AliasConflict { .. }
        ));
    }

    #[tokio::test]
    async fn test_edit_invalid_alias_rejected() {
        let mut mock = MockLinkRepository::new();

        let current = sample_link(1, "oldcode", "https://example.com/target");
        let edit_id = current.edit_id.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        mock.expect_find_by_code().times(0);
        mock.expect_update().times(0);

        let service = make_service(mock);
        let result = service.edit(&edit_id, Some("bad alias!"), None).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_edit_sets_expiration() {
        let mut mock = MockLinkRepository::new();

        let current = sample_link(1, "abc123", "https://example.com/target");
        let edit_id = current.edit_id.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));

        let mut updated = sample_link(1, "abc123", "https://example.com/target");
        updated.expires_at = Some(Utc::now() + Duration::days(7));
        mock.expect_update()
            .withf(|_, patch| patch.expires_at.is_some() && patch.short_code.is_none())
            .times(1)
            .returning(move |_, _| Ok(updated.clone()));

        let service = make_service(mock);
        let future = (Utc::now() + Duration::days(7)).to_rfc3339();
        let outcome = service.edit(&edit_id, None, Some(&future)).await.unwrap();

        assert!(outcome.link.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_edit_omitted_expiration_clears_it() {
        let mut mock = MockLinkRepository::new();

        let mut current = sample_link(1, "abc123", "https://example.com/target");
        current.expires_at = Some(Utc::now() + Duration::days(7));
        let edit_id = current.edit_id.clone();
        let cleared = sample_link(1, "abc123", "https://example.com/target");
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        mock.expect_update()
            .withf(|_, patch| patch.expires_at.is_none())
            .times(1)
            .returning(move |_, _| Ok(cleared.clone()));

        let service = make_service(mock);
        let outcome = service.edit(&edit_id, None, None).await.unwrap();

        assert!(outcome.link.expires_at.is_none());
    }

    #[tokio::test]
    async fn test_edit_past_expiration_rejected() {
        let mut mock = MockLinkRepository::new();

        let current = sample_link(1, "abc123", "https://example.com/target");
        let edit_id = current.edit_id.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(current.clone())));
        mock.expect_update().times(0);

        let service = make_service(mock);
        let past = (Utc::now() - Duration::days(1)).to_rfc3339();
        let result = service.edit(&edit_id, None, Some(&past)).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ExpirationInPast { .. }
        ));
    }

    #[tokio::test]
    async fn test_edit_expired_record_is_reaped_and_rejected() {
        let mut mock = MockLinkRepository::new();

        let link = expired_link(1, "old123");
        let edit_id = link.edit_id.clone();
        mock.expect_find_by_edit_id()
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));
        mock.expect_delete_by_code()
            .withf(|code| code == "old123")
            .times(1)
            .returning(|_| Ok(true));
        mock.expect_update().times(0);

        let service = make_service(mock);
        let result = service.edit(&edit_id, Some("newcode"), None).await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::AlreadyExpired { .. }
        ));
    }

    #[tokio::test]
    async fn test_edit_unknown_token() {
        let mut mock = MockLinkRepository::new();

        mock.expect_find_by_edit_id()
            .times(1)
            .returning(|_| Ok(None));
        mock.expect_update().times(0);

        let service = make_service(mock);
        let result = service.edit("tok0000000", None, None).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
