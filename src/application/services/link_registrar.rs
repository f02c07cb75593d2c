//! Short link registration service.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::entities::{CheckErrorPolicy, ShortLink, ThreatVerdict};
use crate::domain::repositories::LinkStore;
use crate::domain::threat_checker::ThreatChecker;
use crate::error::AppError;
use crate::utils::key_generator::{generate_key, is_reserved_key};
use crate::utils::url_validator::validate_target_url;

/// Source of candidate keys.
pub type KeyGenerator = Box<dyn Fn() -> Result<String, AppError> + Send + Sync>;

/// Service that turns a submitted URL into a persisted short link.
///
/// Pipeline: validate the URL shape, screen it with the [`ThreatChecker`],
/// claim a free key, write the mapping. The registrar is the only writer of
/// short link entries.
pub struct LinkRegistrar<S: LinkStore + ?Sized, T: ThreatChecker + ?Sized> {
    store: Arc<S>,
    checker: Arc<T>,
    policy: CheckErrorPolicy,
    key_generator: KeyGenerator,
}

impl<S: LinkStore + ?Sized, T: ThreatChecker + ?Sized> LinkRegistrar<S, T> {
    /// Creates a new registrar drawing keys from [`generate_key`].
    pub fn new(store: Arc<S>, checker: Arc<T>, policy: CheckErrorPolicy) -> Self {
        Self {
            store,
            checker,
            policy,
            key_generator: Box::new(|| generate_key().map_err(AppError::from)),
        }
    }

    /// Replaces the key source.
    pub fn with_key_generator<F>(mut self, generator: F) -> Self
    where
        F: Fn() -> Result<String, AppError> + Send + Sync + 'static,
    {
        self.key_generator = Box::new(generator);
        self
    }

    pub fn policy(&self) -> CheckErrorPolicy {
        self.policy
    }

    pub fn checker(&self) -> &T {
        &self.checker
    }

    /// Registers `candidate_url` under a freshly generated key.
    ///
    /// # Key Allocation
    ///
    /// Candidates are drawn until one is free. Reserved keys are skipped, a
    /// key already present in the store is skipped, and the write itself is
    /// a put-if-absent so a key taken by a concurrent registration between
    /// the lookup and the write is also skipped. Retries are unbounded; an
    /// existing mapping is never overwritten.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL does not start with `http://` or `https://`
    /// - [`AppError::UnsafeUrl`] if the checker flags the URL
    /// - [`AppError::ThreatCheckUnavailable`] if the check fails under [`CheckErrorPolicy::FailClosed`]
    /// - [`AppError::StoreUnavailable`] if a store call fails
    ///
    /// No mapping is written in any error case.
    pub async fn register(&self, candidate_url: &str) -> Result<ShortLink, AppError> {
        if let Err(e) = validate_target_url(candidate_url) {
            metrics::counter!("links_rejected_total", "reason" => "invalid_url").increment(1);
            return Err(e);
        }

        self.screen(candidate_url).await?;

        let key = self.claim_key(candidate_url).await?;

        metrics::counter!("links_registered_total").increment(1);
        info!(key = %key, "Registered short link");

        Ok(ShortLink::new(key, candidate_url.to_string()))
    }

    /// Applies the threat check and the configured failure policy.
    async fn screen(&self, url: &str) -> Result<(), AppError> {
        match self.checker.check(url).await {
            Ok(ThreatVerdict::Safe) => Ok(()),
            Ok(ThreatVerdict::Unsafe) => {
                metrics::counter!("links_rejected_total", "reason" => "unsafe").increment(1);
                warn!(url = %url, checker = self.checker.name(), "Rejected unsafe URL");
                Err(AppError::UnsafeUrl)
            }
            Err(e) => {
                metrics::counter!("threat_check_failures_total", "policy" => self.policy.as_str())
                    .increment(1);

                match self.policy {
                    CheckErrorPolicy::FailOpen => {
                        warn!(
                            error = %e,
                            checker = self.checker.name(),
                            "Threat check failed, treating URL as safe"
                        );
                        Ok(())
                    }
                    CheckErrorPolicy::FailClosed => {
                        error!(
                            error = %e,
                            checker = self.checker.name(),
                            "Threat check failed, refusing registration"
                        );
                        Err(AppError::ThreatCheckUnavailable)
                    }
                }
            }
        }
    }

    /// Draws keys until one is written.
    async fn claim_key(&self, url: &str) -> Result<String, AppError> {
        let mut attempt: u64 = 0;

        loop {
            attempt += 1;
            let key = (self.key_generator)()?;

            if is_reserved_key(&key) {
                debug!(key = %key, "Skipping reserved key");
                continue;
            }

            if self.store.get(&key).await?.is_some() {
                metrics::counter!("key_collisions_total").increment(1);
                debug!(key = %key, attempt, "Key already in use, regenerating");
                continue;
            }

            if self.store.put_if_absent(&key, url).await? {
                return Ok(key);
            }

            metrics::counter!("key_collisions_total").increment(1);
            warn!(
                key = %key,
                attempt,
                "Key claimed by a concurrent registration, regenerating"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkStore, StoreError};
    use crate::domain::threat_checker::{CheckError, MockThreatChecker};
    use std::sync::Mutex;

    fn safe_checker() -> MockThreatChecker {
        let mut checker = MockThreatChecker::new();
        checker
            .expect_check()
            .returning(|_| Ok(ThreatVerdict::Safe));
        checker.expect_name().return_const("mock");
        checker
    }

    fn scripted_keys(
        keys: &'static [&'static str],
    ) -> impl Fn() -> Result<String, AppError> + Send + Sync + 'static {
        let queue = Mutex::new(
            keys.iter()
                .map(|k| k.to_string())
                .collect::<std::collections::VecDeque<_>>(),
        );
        move || {
            queue
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| AppError::internal("key script exhausted"))
        }
    }

    #[tokio::test]
    async fn test_register_success() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .withf(|_, url| url == "https://example.com")
            .times(1)
            .returning(|_, _| Ok(true));

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(safe_checker()),
            CheckErrorPolicy::FailOpen,
        );

        let link = registrar.register("https://example.com").await.unwrap();

        assert_eq!(link.key.len(), 6);
        assert!(link.key.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(link.target_url, "https://example.com");
        assert_eq!(link.path(), format!("/{}", link.key));
    }

    #[tokio::test]
    async fn test_register_invalid_url_skips_check_and_store() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(0);
        store.expect_put_if_absent().times(0);

        let mut checker = MockThreatChecker::new();
        checker.expect_check().times(0);

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(checker),
            CheckErrorPolicy::FailOpen,
        );

        let result = registrar.register("not-a-url").await;

        assert!(matches!(result.unwrap_err(), AppError::InvalidUrl));
    }

    #[tokio::test]
    async fn test_register_unsafe_url_not_written() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(0);
        store.expect_put_if_absent().times(0);

        let mut checker = MockThreatChecker::new();
        checker
            .expect_check()
            .withf(|url| url == "http://malware.test/")
            .times(1)
            .returning(|_| Ok(ThreatVerdict::Unsafe));
        checker.expect_name().return_const("mock");

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(checker),
            CheckErrorPolicy::FailOpen,
        );

        let result = registrar.register("http://malware.test/").await;

        assert!(matches!(result.unwrap_err(), AppError::UnsafeUrl));
    }

    #[tokio::test]
    async fn test_register_fail_open_on_check_error() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(1).returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .times(1)
            .returning(|_, _| Ok(true));

        let mut checker = MockThreatChecker::new();
        checker
            .expect_check()
            .times(1)
            .returning(|_| Err(CheckError::Transport("connection reset".to_string())));
        checker.expect_name().return_const("mock");

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(checker),
            CheckErrorPolicy::FailOpen,
        );

        let result = registrar.register("https://example.com").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_fail_closed_on_check_error() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(0);
        store.expect_put_if_absent().times(0);

        let mut checker = MockThreatChecker::new();
        checker
            .expect_check()
            .times(1)
            .returning(|_| Err(CheckError::Status(503)));
        checker.expect_name().return_const("mock");

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(checker),
            CheckErrorPolicy::FailClosed,
        );

        let result = registrar.register("https://example.com").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::ThreatCheckUnavailable
        ));
    }

    #[tokio::test]
    async fn test_register_retries_on_existing_keys() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|key| key == "AAAAAA" || key == "BBBBBB")
            .times(2)
            .returning(|_| Ok(Some("https://taken.example".to_string())));
        store
            .expect_get()
            .withf(|key| key == "CCCCCC")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .withf(|key, _| key == "CCCCCC")
            .times(1)
            .returning(|_, _| Ok(true));

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(safe_checker()),
            CheckErrorPolicy::FailOpen,
        )
        .with_key_generator(scripted_keys(&["AAAAAA", "BBBBBB", "CCCCCC"]));

        let link = registrar.register("https://example.com").await.unwrap();

        assert_eq!(link.key, "CCCCCC");
    }

    #[tokio::test]
    async fn test_register_retries_when_race_lost() {
        let mut store = MockLinkStore::new();
        store.expect_get().times(2).returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .withf(|key, _| key == "RACED1")
            .times(1)
            .returning(|_, _| Ok(false));
        store
            .expect_put_if_absent()
            .withf(|key, _| key == "FRESH2")
            .times(1)
            .returning(|_, _| Ok(true));

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(safe_checker()),
            CheckErrorPolicy::FailOpen,
        )
        .with_key_generator(scripted_keys(&["RACED1", "FRESH2"]));

        let link = registrar.register("https://example.com").await.unwrap();

        assert_eq!(link.key, "FRESH2");
    }

    #[tokio::test]
    async fn test_register_skips_reserved_keys() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .withf(|key| key == "Zz9Zz9")
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_put_if_absent()
            .withf(|key, _| key == "Zz9Zz9")
            .times(1)
            .returning(|_, _| Ok(true));

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(safe_checker()),
            CheckErrorPolicy::FailOpen,
        )
        .with_key_generator(scripted_keys(&["health", "Zz9Zz9"]));

        let link = registrar.register("https://example.com").await.unwrap();

        assert_eq!(link.key, "Zz9Zz9");
    }

    #[tokio::test]
    async fn test_register_store_error_is_fatal() {
        let mut store = MockLinkStore::new();
        store
            .expect_get()
            .times(1)
            .returning(|_| Err(StoreError::Connection("refused".to_string())));
        store.expect_put_if_absent().times(0);

        let registrar = LinkRegistrar::new(
            Arc::new(store),
            Arc::new(safe_checker()),
            CheckErrorPolicy::FailOpen,
        );

        let result = registrar.register("https://example.com").await;

        assert!(matches!(
            result.unwrap_err(),
            AppError::StoreUnavailable(StoreError::Connection(_))
        ));
    }

    #[tokio::test]
    async fn test_policy_accessor() {
        let registrar = LinkRegistrar::new(
            Arc::new(MockLinkStore::new()),
            Arc::new(MockThreatChecker::new()),
            CheckErrorPolicy::FailClosed,
        );

        assert_eq!(registrar.policy(), CheckErrorPolicy::FailClosed);
    }
}
