//! # Auth Provider
//!
//! The storefront's only dependency on the hosted auth service goes through
//! [`AuthProvider`], so the session observer and the router can be driven by
//! a fake in tests.

pub mod hosted;
pub mod listeners;
#[cfg(test)]
pub mod test_implementations;

use std::rc::Rc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, IntoStaticStr};

use crate::client::BackendResult;
use crate::models::UserRecord;

pub use hosted::HostedAuthClient;
pub use listeners::{AuthSubscription, ListenerRegistry};

/// Seconds before expiry at which a stored session is treated as stale.
pub const EXPIRY_MARGIN_SECS: i64 = 10;

/// Auth state transitions announced to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
    UserUpdated,
}

/// A signed-in session as issued by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    /// Unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: UserRecord,
}

impl AuthSession {
    /// Whether the access token is expired (or about to be) at `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at - EXPIRY_MARGIN_SECS <= now)
    }
}

/// Listener invoked on every auth transition with the new session, if any.
pub type AuthCallback = Rc<dyn Fn(AuthEvent, Option<&AuthSession>)>;

/// Contract with the hosted auth service.
///
/// Futures are not `Send`: everything runs on the browser's UI thread.
#[async_trait(?Send)]
pub trait AuthProvider {
    /// Register `callback` for auth transitions. The listener stays
    /// registered until the returned subscription is released.
    fn subscribe_auth_changes(&self, callback: AuthCallback) -> AuthSubscription;

    /// The current session, if one exists.
    ///
    /// # Errors
    /// Returns an error when the backend cannot be reached or rejects the
    /// stored credentials.
    async fn get_current_session(&self) -> BackendResult<Option<AuthSession>>;

    /// End the current session.
    ///
    /// # Errors
    /// Returns an error when the backend call fails; local state is kept.
    async fn sign_out(&self) -> BackendResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(expires_at: Option<i64>) -> AuthSession {
        AuthSession {
            access_token: "token".to_string(),
            refresh_token: None,
            expires_at,
            user: UserRecord::with_id("u1"),
        }
    }

    #[test]
    fn test_session_expiry_uses_margin() {
        assert!(!session(Some(1_000)).is_expired(900));
        assert!(session(Some(1_000)).is_expired(995));
        assert!(session(Some(1_000)).is_expired(2_000));
        assert!(!session(None).is_expired(i64::MAX));
    }

    #[test]
    fn test_event_names() {
        assert_eq!(AuthEvent::SignedIn.to_string(), "SIGNED_IN");
        let name: &'static str = AuthEvent::TokenRefreshed.into();
        assert_eq!(name, "TOKEN_REFRESHED");
    }
}
