//! URL reputation lookup contract.

use async_trait::async_trait;

use crate::domain::entities::ThreatVerdict;

/// Failure to obtain a verdict from the reputation service.
///
/// The checker only reports these; whether a failure blocks a registration is
/// decided by [`crate::domain::entities::CheckErrorPolicy`] in the registrar.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CheckError {
    #[error("Threat service request failed: {0}")]
    Transport(String),

    #[error("Threat service returned HTTP {0}")]
    Status(u16),

    #[error("Threat service response malformed: {0}")]
    Malformed(String),

    #[error("Threat check task failed: {0}")]
    Task(String),
}

/// Screens candidate URLs against an external reputation service.
///
/// Implementations are stateless between calls and must not cache verdicts.
///
/// # Implementations
///
/// - [`crate::infrastructure::safe_browsing::SafeBrowsingChecker`] - Google Safe Browsing v4
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ThreatChecker: Send + Sync {
    /// Returns the verdict for `url`.
    ///
    /// # Errors
    ///
    /// Returns [`CheckError`] on transport failure, non-success status, or a
    /// response that cannot be interpreted.
    async fn check(&self, url: &str) -> Result<ThreatVerdict, CheckError>;

    /// Whether the checker actually consults a remote service.
    fn is_enabled(&self) -> bool;

    /// Checker name for logs and health reports.
    fn name(&self) -> &'static str;
}
