//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence and threat intelligence.
//!
//! # Modules
//!
//! - [`store`] - Key-value store backends (memory, Redis, PostgreSQL)
//! - [`safe_browsing`] - Google Safe Browsing threat checker

pub mod safe_browsing;
pub mod store;
