//! Domain layer containing business entities and the contracts of external
//! collaborators.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures ([`entities::ShortLink`], [`entities::ThreatVerdict`])
//! - [`repositories`] - Key-value store contract ([`repositories::LinkStore`])
//! - [`threat_checker`] - URL reputation contract ([`threat_checker::ThreatChecker`])
//!
//! # Design Principles
//!
//! - Domain layer does not depend on the infrastructure or API modules
//! - Traits define contracts implemented by the infrastructure layer
//! - Business logic lives in [`crate::application::services`]

pub mod entities;
pub mod repositories;
pub mod threat_checker;
