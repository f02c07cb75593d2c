//! HTTP layer for request/response handling.
//!
//! This layer translates HTTP requests into registrar and store calls and
//! formats responses according to the API contract.
//!
//! # Modules
//!
//! - [`dto`] - Response payloads
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - CORS and tracing middleware
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
