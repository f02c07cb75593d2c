//! Utility functions for key generation and URL validation.
//!
//! - [`key_generator`] - Short key generation and shape checks
//! - [`url_validator`] - Target URL validation

pub mod key_generator;
pub mod url_validator;
