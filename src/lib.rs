//! # Link Warden
//!
//! A URL shortener that screens every submission against Google Safe Browsing
//! before handing out a short key. Built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the store and threat checker traits
//! - **Application Layer** ([`application`]) - The link registrar
//! - **Infrastructure Layer** ([`infrastructure`]) - Store backends and the Safe Browsing client
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random 6-character keys from `[A-Za-z0-9]`, drawn from the OS entropy source
//! - Collision-free registration: keys are claimed with an atomic put-if-absent
//! - Safe Browsing screening with a configurable fail-open / fail-closed policy
//! - In-memory, Redis, or PostgreSQL storage
//!
//! ## Quick Start
//!
//! ```bash
//! export GOOGLE_API_KEY="..."           # Optional, disables screening when unset
//! export STORE_BACKEND="redis"          # Optional, defaults to memory
//! export REDIS_URL="redis://localhost:6379"
//!
//! cargo run
//!
//! curl -d '{"url":"https://example.com"}' http://localhost:3000/
//! # {"status":200,"key":"/aB3xY9"}
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::LinkRegistrar;
    pub use crate::domain::entities::{CheckErrorPolicy, ShortLink, ThreatVerdict};
    pub use crate::domain::repositories::{LinkStore, StoreError};
    pub use crate::domain::threat_checker::{CheckError, ThreatChecker};
    pub use crate::error::AppError;
    pub use crate::infrastructure::store::MemoryStore;
    pub use crate::routes::app_router;
    pub use crate::state::AppState;
}
