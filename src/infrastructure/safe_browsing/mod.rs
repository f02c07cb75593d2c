//! Google Safe Browsing integration.
//!
//! - [`SafeBrowsingChecker`] - [`crate::domain::threat_checker::ThreatChecker`] over the v4 Lookup API
//! - [`query`] - Request and response wire types

mod checker;
pub mod query;

pub use checker::{DEFAULT_ENDPOINT, SafeBrowsingChecker};
