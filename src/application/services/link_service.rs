//! Link allocation and resolution service.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{Allocation, Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::CodeGenerator;
use crate::utils::url_validator::validate_target_url;

/// Number of candidate codes tried before an allocation gives up.
pub const MAX_ALLOCATION_ATTEMPTS: usize = 3;

/// Service for allocating short codes and resolving them back.
///
/// Holds no locks of its own: concurrent allocations race only inside
/// [`LinkRepository::insert_if_absent`], where exactly one writer wins a code.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    generator: Arc<dyn CodeGenerator>,
    click_sender: mpsc::Sender<ClickEvent>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix of short URLs; a trailing slash is ignored.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        generator: Arc<dyn CodeGenerator>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            generator,
            click_sender,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Allocates a fresh short code for `target_url`.
    ///
    /// # Algorithm
    ///
    /// 1. Validate the target; invalid input never reaches the generator or store
    /// 2. Generate a new candidate code on every attempt
    /// 3. Insert it only if absent; the first successful insert wins
    /// 4. After [`MAX_ALLOCATION_ATTEMPTS`] collisions, give up
    ///
    /// The same target URL may be allocated any number of times; each call
    /// yields its own code.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the target URL is missing, not `https`, or malformed
    /// - [`AppError::Exhausted`] if every attempt collided (nothing was written)
    /// - [`AppError::Unavailable`] if the store failed
    pub async fn allocate(&self, target_url: Option<&str>) -> Result<Allocation, AppError> {
        if let Err(invalid) = validate_target_url(target_url) {
            return Err(AppError::bad_request(
                invalid.to_string(),
                json!({ "reason": invalid.reason() }),
            ));
        }
        let target_url = target_url.unwrap_or_default().to_string();

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = self.generator.generate();

            let inserted = self
                .repository
                .insert_if_absent(NewLink {
                    code: code.clone(),
                    target_url: target_url.clone(),
                })
                .await?;

            if inserted {
                metrics::counter!("links_created_total").increment(1);
                info!(code = %code, attempt, "Short link created");

                return Ok(Allocation {
                    short_code: code,
                    target_url,
                });
            }

            metrics::counter!("short_code_collisions_total").increment(1);
            warn!(code = %code, attempt, "Short code collision, retrying");
        }

        metrics::counter!("allocation_exhausted_total").increment(1);

        Err(AppError::exhausted(
            "Failed to allocate a short code, please try again",
            json!({ "attempts": MAX_ALLOCATION_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to the URL a redirect should point at.
    ///
    /// The stored target is returned re-serialized by [`Url`], so it is
    /// percent-encoded ASCII and safe to place in a `Location` header. The
    /// stored value itself is never rewritten. No click is recorded here;
    /// callers do that with [`LinkService::record_click`] once the redirect
    /// is built.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store failed.
    /// Returns [`AppError::Internal`] if the stored target no longer parses.
    pub async fn resolve(&self, code: &str) -> Result<Option<Url>, AppError> {
        let Some(target) = self.repository.find_target_url(code).await? else {
            debug!(code = %code, "Short code not found");
            return Ok(None);
        };

        let location = Url::parse(&target).map_err(|e| {
            AppError::internal(
                "Stored target URL is not a valid URL",
                json!({ "code": code, "reason": e.to_string() }),
            )
        })?;

        Ok(Some(location))
    }

    /// Queues a click for the background worker.
    ///
    /// Counting is best-effort: a full or closed queue drops the click and
    /// the redirect still proceeds.
    pub fn record_click(&self, code: &str) {
        metrics::counter!("redirects_total").increment(1);

        match self.click_sender.try_send(ClickEvent::new(code)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!(code = %code, "Click queue full, dropping click");
            }
            Err(TrySendError::Closed(_)) => {
                metrics::counter!("clicks_dropped_total").increment(1);
                warn!(code = %code, "Click queue closed, dropping click");
            }
        }
    }

    /// Loads the full record of a short link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Unavailable`] if the store failed.
    pub async fn get_details(&self, code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unavailable`] if the store failed.
    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;
    use crate::utils::code_generator::{MockCodeGenerator, RandomCodeGenerator};
    use chrono::Utc;
    use mockall::Sequence;

    fn build_service(
        repository: MockLinkRepository,
        generator: impl CodeGenerator + 'static,
    ) -> (LinkService, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let service = LinkService::new(
            Arc::new(repository),
            Arc::new(generator),
            tx,
            "https://sq.example.com/",
        );
        (service, rx)
    }

    fn generator_returning(codes: &[&'static str]) -> MockCodeGenerator {
        let mut generator = MockCodeGenerator::new();
        let mut seq = Sequence::new();
        for &code in codes {
            generator
                .expect_generate()
                .times(1)
                .in_sequence(&mut seq)
                .returning(move || code.to_string());
        }
        generator
    }

    #[tokio::test]
    async fn test_allocate_success() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert_if_absent()
            .withf(|new_link| {
                new_link.code == "a1B2c3D" && new_link.target_url == "https://example.com"
            })
            .times(1)
            .returning(|_| Ok(true));

        let (service, _rx) = build_service(repo, generator_returning(&["a1B2c3D"]));

        let allocation = service
            .allocate(Some("https://example.com"))
            .await
            .unwrap();

        assert_eq!(allocation.short_code, "a1B2c3D");
        assert_eq!(allocation.target_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_allocate_retries_with_fresh_code_after_collision() {
        let mut repo = MockLinkRepository::new();
        let mut seq = Sequence::new();
        repo.expect_insert_if_absent()
            .withf(|new_link| new_link.code == "AAAA111")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));
        repo.expect_insert_if_absent()
            .withf(|new_link| new_link.code == "BBBB222")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));

        let (service, _rx) = build_service(repo, generator_returning(&["AAAA111", "BBBB222"]));

        let allocation = service
            .allocate(Some("https://example.com"))
            .await
            .unwrap();

        assert_eq!(allocation.short_code, "BBBB222");
    }

    #[tokio::test]
    async fn test_allocate_exhausted_after_max_attempts() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert_if_absent()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|_| Ok(false));

        let mut generator = MockCodeGenerator::new();
        generator
            .expect_generate()
            .times(MAX_ALLOCATION_ATTEMPTS)
            .returning(|| "AAAA111".to_string());

        let (service, _rx) = build_service(repo, generator);

        let result = service.allocate(Some("https://example.com")).await;

        assert!(matches!(result, Err(AppError::Exhausted { .. })));
    }

    #[tokio::test]
    async fn test_allocate_invalid_input_never_touches_store() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert_if_absent().times(0);
        let mut generator = MockCodeGenerator::new();
        generator.expect_generate().times(0);

        let (service, _rx) = build_service(repo, generator);

        for (input, reason) in [
            (None, "missing"),
            (Some(""), "missing"),
            (Some("http://example.com"), "not-https"),
            (Some("ftp://example.com"), "not-https"),
            (Some("https://"), "malformed"),
        ] {
            match service.allocate(input).await {
                Err(AppError::Validation { details, .. }) => {
                    assert_eq!(details["reason"], reason, "input {input:?}");
                }
                other => panic!("expected validation error for {input:?}, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_allocate_propagates_store_failure() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert_if_absent()
            .times(1)
            .returning(|_| Err(AppError::unavailable("Storage is unavailable", json!({}))));

        let (service, _rx) = build_service(repo, RandomCodeGenerator::default());

        let result = service.allocate(Some("https://example.com")).await;

        assert!(matches!(result, Err(AppError::Unavailable { .. })));
    }

    #[tokio::test]
    async fn test_resolve_hit_returns_location_without_queuing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_target_url()
            .withf(|code| code == "abc1234")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/path?q=1".to_string())));

        let (service, mut rx) = build_service(repo, MockCodeGenerator::new());

        let location = service.resolve("abc1234").await.unwrap().unwrap();

        assert_eq!(location.as_str(), "https://example.com/path?q=1");
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_percent_encodes_location() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_target_url()
            .returning(|_| Ok(Some("https://example.com/caf\u{e9}/a\u{1}b".to_string())));

        let (service, _rx) = build_service(repo, MockCodeGenerator::new());

        let location = service.resolve("abc1234").await.unwrap().unwrap();

        assert_eq!(location.as_str(), "https://example.com/caf%C3%A9/a%01b");
    }

    #[tokio::test]
    async fn test_resolve_unparseable_target_is_internal_error() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_target_url()
            .returning(|_| Ok(Some("not a url".to_string())));

        let (service, mut rx) = build_service(repo, MockCodeGenerator::new());

        let result = service.resolve("abc1234").await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_miss_queues_nothing() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_target_url().times(1).returning(|_| Ok(None));

        let (service, mut rx) = build_service(repo, MockCodeGenerator::new());

        let target = service.resolve("ZZZZ999").await.unwrap();

        assert!(target.is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_record_click_queues_event() {
        let (service, mut rx) = build_service(MockLinkRepository::new(), MockCodeGenerator::new());

        service.record_click("abc1234");

        assert_eq!(rx.try_recv().unwrap(), ClickEvent::new("abc1234"));
    }

    #[tokio::test]
    async fn test_record_click_with_closed_queue_is_dropped() {
        let (service, rx) = build_service(MockLinkRepository::new(), MockCodeGenerator::new());
        drop(rx);

        service.record_click("abc1234");
    }

    #[tokio::test]
    async fn test_resolve_propagates_store_failure() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_target_url()
            .returning(|_| Err(AppError::unavailable("Storage is unavailable", json!({}))));

        let (service, mut rx) = build_service(repo, MockCodeGenerator::new());

        let result = service.resolve("abc1234").await;

        assert!(matches!(result, Err(AppError::Unavailable { .. })));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_get_details_not_found() {
        let mut repo = MockLinkRepository::new();
        repo.expect_find_by_code().returning(|_| Ok(None));

        let (service, _rx) = build_service(repo, MockCodeGenerator::new());

        let result = service.get_details("ZZZZ999").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_get_details_found() {
        let mut repo = MockLinkRepository::new();
        let link = Link::new(
            "abc1234".to_string(),
            "https://example.com".to_string(),
            7,
            Utc::now(),
        );
        let expected = link.clone();
        repo.expect_find_by_code()
            .returning(move |_| Ok(Some(link.clone())));

        let (service, _rx) = build_service(repo, MockCodeGenerator::new());

        assert_eq!(service.get_details("abc1234").await.unwrap(), expected);
    }

    #[test]
    fn test_short_url_trims_trailing_slash() {
        let (service, _rx) = build_service(MockLinkRepository::new(), MockCodeGenerator::new());
        assert_eq!(
            service.short_url("abc1234"),
            "https://sq.example.com/abc1234"
        );
    }
}
