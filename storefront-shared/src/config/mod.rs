//! # Configuration
//!
//! Settings for reaching the hosted backend.

pub mod backend;

pub use backend::{BACKEND_ANON_KEY_VAR, BACKEND_URL_VAR, BackendConfig, ConfigError};
