//! Cross-cutting foundation: error taxonomy and selector configuration.

pub mod config;
pub mod errors;
