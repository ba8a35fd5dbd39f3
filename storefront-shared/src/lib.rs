#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::multiple_crate_versions)]

//! Platform-neutral core of the storefront: models, backend clients, the
//! session observer and the view router.

pub mod auth;
pub mod client;
pub mod config;
pub mod data;
pub mod models;
pub mod router;
pub mod session;

pub use auth::{AuthProvider, HostedAuthClient};
pub use client::{BackendError, BackendResult};
pub use config::BackendConfig;
pub use data::DataClient;
pub use router::{Page, RouterAction, Screen, ScreenDecision, ViewRouter};
pub use session::{Session, SessionObserver};
