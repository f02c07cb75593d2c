#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use link_warden::application::services::LinkRegistrar;
use link_warden::domain::entities::{CheckErrorPolicy, ThreatVerdict};
use link_warden::domain::repositories::{LinkStore, StoreError};
use link_warden::domain::threat_checker::{CheckError, ThreatChecker};
use link_warden::infrastructure::store::MemoryStore;
use link_warden::routes::app_router;
use link_warden::state::AppState;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Threat checker returning a fixed answer and counting calls.
pub struct StubChecker {
    outcome: Result<ThreatVerdict, CheckError>,
    calls: AtomicUsize,
}

impl StubChecker {
    pub fn safe() -> Self {
        Self::with(Ok(ThreatVerdict::Safe))
    }

    pub fn unsafe_verdict() -> Self {
        Self::with(Ok(ThreatVerdict::Unsafe))
    }

    pub fn failing() -> Self {
        Self::with(Err(CheckError::Transport("connection refused".to_string())))
    }

    fn with(outcome: Result<ThreatVerdict, CheckError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ThreatChecker for StubChecker {
    async fn check(&self, _url: &str) -> Result<ThreatVerdict, CheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn is_enabled(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// Store whose every call fails, for 503 paths.
pub struct DownStore;

#[async_trait]
impl LinkStore for DownStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn put_if_absent(&self, _key: &str, _target_url: &str) -> Result<bool, StoreError> {
        Err(StoreError::Connection("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "down"
    }
}

pub fn create_test_state(
    store: Arc<MemoryStore>,
    checker: Arc<StubChecker>,
    policy: CheckErrorPolicy,
) -> AppState {
    AppState::new(store, checker, policy)
}

/// Full router over a fresh memory store and a safe checker.
pub fn test_server() -> (TestServer, Arc<MemoryStore>, Arc<StubChecker>) {
    test_server_with(StubChecker::safe(), CheckErrorPolicy::FailOpen)
}

pub fn test_server_with(
    checker: StubChecker,
    policy: CheckErrorPolicy,
) -> (TestServer, Arc<MemoryStore>, Arc<StubChecker>) {
    let store = Arc::new(MemoryStore::new());
    let checker = Arc::new(checker);

    let state = create_test_state(store.clone(), checker.clone(), policy);
    let server = TestServer::new(app_router(state)).unwrap();

    (server, store, checker)
}

/// Full router whose registrar draws keys from `keys` in order.
pub fn test_server_with_keys(
    store: Arc<MemoryStore>,
    keys: &'static [&'static str],
) -> TestServer {
    let queue = std::sync::Mutex::new(keys.iter().map(|k| k.to_string()).collect::<Vec<_>>());

    let registrar = LinkRegistrar::new(
        store.clone() as Arc<dyn LinkStore>,
        Arc::new(StubChecker::safe()) as Arc<dyn ThreatChecker>,
        CheckErrorPolicy::FailOpen,
    )
    .with_key_generator(move || {
        let mut queue = queue.lock().unwrap();
        if queue.is_empty() {
            return Err(link_warden::AppError::internal("key script exhausted"));
        }
        Ok(queue.remove(0))
    });

    let state = AppState::from_registrar(registrar, store);
    TestServer::new(app_router(state)).unwrap()
}
