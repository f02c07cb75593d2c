//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::LinkRegistrar;
use crate::domain::entities::CheckErrorPolicy;
use crate::domain::repositories::LinkStore;
use crate::domain::threat_checker::ThreatChecker;

/// Registrar type used by the HTTP layer, erased over store and checker.
pub type DynLinkRegistrar = LinkRegistrar<dyn LinkStore, dyn ThreatChecker>;

/// State shared by every request.
///
/// Cloning is cheap: both fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    /// Write path: validation, threat check, key claiming.
    pub registrar: Arc<DynLinkRegistrar>,
    /// Read path: redirects look keys up directly.
    pub store: Arc<dyn LinkStore>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn LinkStore>,
        checker: Arc<dyn ThreatChecker>,
        policy: CheckErrorPolicy,
    ) -> Self {
        let registrar = LinkRegistrar::new(store.clone(), checker, policy);

        Self {
            registrar: Arc::new(registrar),
            store,
        }
    }

    /// Builds state around an already configured registrar.
    pub fn from_registrar(registrar: DynLinkRegistrar, store: Arc<dyn LinkStore>) -> Self {
        Self {
            registrar: Arc::new(registrar),
            store,
        }
    }
}
