//! Data Transfer Objects for API responses.
//!
//! Request bodies are parsed by hand in the handlers, so only outgoing
//! payloads live here.

pub mod health;
pub mod shorten;
