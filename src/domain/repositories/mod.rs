//! Store trait definitions for the domain layer.
//!
//! The [`LinkStore`] trait abstracts the external key-value store that owns
//! short link mappings. Implementations live in
//! `crate::infrastructure::store`; a mock is generated via `mockall` for
//! unit tests.
//!
//! # Testing
//!
//! See integration tests in `tests/store_*.rs` for backend behavior.

pub mod link_store;

pub use link_store::{LinkStore, StoreError};

#[cfg(test)]
pub use link_store::MockLinkStore;
