//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating the store,
//! the threat checker, and validation rules. Services consume domain traits
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_registrar::LinkRegistrar`] - Short link registration

pub mod services;
