//! Threat verdict and the policy applied when no verdict can be obtained.

use std::fmt;
use std::str::FromStr;

/// Result of screening a URL against the reputation service.
///
/// Computed per submission; never persisted or cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreatVerdict {
    Safe,
    Unsafe,
}

impl ThreatVerdict {
    pub fn is_safe(self) -> bool {
        matches!(self, ThreatVerdict::Safe)
    }
}

/// How the registrar treats a failed threat check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckErrorPolicy {
    /// Proceed as if the URL were safe.
    #[default]
    FailOpen,
    /// Refuse the registration.
    FailClosed,
}

impl CheckErrorPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            CheckErrorPolicy::FailOpen => "fail-open",
            CheckErrorPolicy::FailClosed => "fail-closed",
        }
    }
}

impl fmt::Display for CheckErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fail-open" | "open" => Ok(CheckErrorPolicy::FailOpen),
            "fail-closed" | "closed" => Ok(CheckErrorPolicy::FailClosed),
            other => Err(format!(
                "expected 'fail-open' or 'fail-closed', got '{}'",
                other
            )),
        }
    }
}
