//! Business logic services for the application layer.

pub mod link_registrar;

pub use link_registrar::{KeyGenerator, LinkRegistrar};
