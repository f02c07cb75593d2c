//! Domain entities.
//!
//! - [`ShortLink`] - Immutable key to target URL mapping
//! - [`ThreatVerdict`] - Per-submission reputation result
//! - [`CheckErrorPolicy`] - What to do when the reputation lookup fails

pub mod short_link;
pub mod threat_verdict;

pub use short_link::ShortLink;
pub use threat_verdict::{CheckErrorPolicy, ThreatVerdict};
