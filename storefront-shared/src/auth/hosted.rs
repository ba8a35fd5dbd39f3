//! [`AuthProvider`] backed by the hosted auth REST API.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};

use super::{AuthCallback, AuthEvent, AuthProvider, AuthSession, AuthSubscription, ListenerRegistry};
use crate::client::{BackendError, BackendHttp, BackendResult};
use crate::config::BackendConfig;
use crate::models::UserRecord;

const TOKEN_PATH: &str = "auth/v1/token";
const SIGNUP_PATH: &str = "auth/v1/signup";
const LOGOUT_PATH: &str = "auth/v1/logout";
const USER_PATH: &str = "auth/v1/user";

/// Body returned by the token and signup endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    expires_at: Option<i64>,
    user: UserRecord,
}

impl TokenResponse {
    fn into_session(self, now: i64) -> AuthSession {
        AuthSession {
            access_token: self.access_token,
            refresh_token: self.refresh_token,
            expires_at: self
                .expires_at
                .or_else(|| self.expires_in.map(|secs| now + secs)),
            user: self.user,
        }
    }
}

#[derive(Debug, Serialize)]
struct PasswordCredentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Client for the hosted auth service.
///
/// Holds the current session in memory (and in `localStorage` in the
/// browser) and broadcasts transitions to subscribers.
#[derive(Debug)]
pub struct HostedAuthClient {
    http: BackendHttp,
    session: RefCell<Option<AuthSession>>,
    listeners: Rc<ListenerRegistry>,
}

impl HostedAuthClient {
    /// Always succeeds; with missing configuration every call fails with
    /// [`BackendError::NotConfigured`].
    pub fn new(config: BackendConfig) -> Self {
        if !config.is_configured() {
            warn!("auth client created without backend configuration");
        }
        Self {
            http: BackendHttp::new(config),
            session: RefCell::new(storage::load()),
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn http(&self) -> &BackendHttp {
        &self.http
    }

    /// Access token of the stored session, if any.
    pub fn access_token(&self) -> Option<String> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.access_token.clone())
    }

    /// Stored user without touching the network.
    pub fn cached_user(&self) -> Option<UserRecord> {
        self.session
            .borrow()
            .as_ref()
            .map(|session| session.user.clone())
    }

    /// Sign in with email and password.
    ///
    /// # Errors
    /// Fails on transport errors or rejected credentials.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> BackendResult<AuthSession> {
        let request = self
            .http
            .request(Method::POST, TOKEN_PATH, None)?
            .query(&[("grant_type", "password")])
            .json(&PasswordCredentials { email, password });
        let token: TokenResponse = self.http.send_json(request).await?;
        let session = token.into_session(Utc::now().timestamp());
        info!(user_id = %session.user.id, "signed in");
        self.store(Some(session.clone()), AuthEvent::SignedIn);
        Ok(session)
    }

    /// Create an account. Returns the new session, or `None` when the
    /// backend requires email confirmation first.
    ///
    /// # Errors
    /// Fails on transport errors or when the backend refuses the sign-up.
    pub async fn sign_up(&self, email: &str, password: &str) -> BackendResult<Option<AuthSession>> {
        let request = self
            .http
            .request(Method::POST, SIGNUP_PATH, None)?
            .json(&PasswordCredentials { email, password });
        let body: serde_json::Value = self.http.send_json(request).await?;
        if body.get("access_token").is_none() {
            info!("sign-up pending email confirmation");
            return Ok(None);
        }
        let token: TokenResponse = serde_json::from_value(body)
            .map_err(|err| BackendError::unexpected(format!("sign-up response: {err}")))?;
        let session = token.into_session(Utc::now().timestamp());
        self.store(Some(session.clone()), AuthEvent::SignedIn);
        Ok(Some(session))
    }

    /// Fetch the user behind the stored session.
    ///
    /// # Errors
    /// Returns [`BackendError::NotAuthenticated`] without a session.
    pub async fn get_user(&self) -> BackendResult<UserRecord> {
        let token = self.access_token().ok_or(BackendError::NotAuthenticated)?;
        let request = self.http.request(Method::GET, USER_PATH, Some(&token))?;
        self.http.send_json(request).await
    }

    async fn refresh(&self, refresh_token: &str) -> BackendResult<AuthSession> {
        let request = self
            .http
            .request(Method::POST, TOKEN_PATH, None)?
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        let token: TokenResponse = self.http.send_json(request).await?;
        let session = token.into_session(Utc::now().timestamp());
        debug!(user_id = %session.user.id, "session refreshed");
        self.store(Some(session.clone()), AuthEvent::TokenRefreshed);
        Ok(session)
    }

    /// Forget the stored session when the backend refused its refresh token.
    /// Transport and server failures keep it for the next attempt.
    fn settle_refresh(&self, refreshed: BackendResult<AuthSession>) -> BackendResult<AuthSession> {
        if let Err(err) = &refreshed
            && is_rejected_refresh(err)
        {
            warn!(error = %err, "refresh token rejected, dropping stored session");
            self.store(None, AuthEvent::SignedOut);
        }
        refreshed
    }

    /// Replace the stored session, persist it and notify subscribers.
    fn store(&self, session: Option<AuthSession>, event: AuthEvent) {
        storage::save(session.as_ref());
        self.session.replace(session.clone());
        self.listeners.emit(event, session.as_ref());
    }
}

const fn is_rejected_refresh(err: &BackendError) -> bool {
    matches!(err, BackendError::Http { status: 400 | 401 | 403, .. })
}

#[async_trait(?Send)]
impl AuthProvider for HostedAuthClient {
    fn subscribe_auth_changes(&self, callback: AuthCallback) -> AuthSubscription {
        self.listeners.subscribe(callback)
    }

    async fn get_current_session(&self) -> BackendResult<Option<AuthSession>> {
        let stored = self.session.borrow().clone();
        let Some(session) = stored else {
            return Ok(None);
        };
        if !session.is_expired(Utc::now().timestamp()) {
            return Ok(Some(session));
        }
        match session.refresh_token.as_deref() {
            Some(refresh_token) => {
                let refreshed = self.refresh(refresh_token).await;
                self.settle_refresh(refreshed).map(Some)
            }
            None => {
                debug!("stored session expired without refresh token");
                self.store(None, AuthEvent::SignedOut);
                Ok(None)
            }
        }
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let token = self.access_token();
        let request = self
            .http
            .request(Method::POST, LOGOUT_PATH, token.as_deref())?;
        if token.is_some() {
            match self.http.send_empty(request).await {
                Ok(()) => {}
                // The token is already dead server-side; finish locally.
                Err(BackendError::Http { status: 401 | 403 | 404, .. }) => {
                    debug!("session already invalid on the backend");
                }
                Err(err) => return Err(err),
            }
        }
        info!("signed out");
        self.store(None, AuthEvent::SignedOut);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod storage {
    use gloo_storage::{LocalStorage, Storage};
    use tracing::warn;

    use crate::auth::AuthSession;

    const SESSION_KEY: &str = "storefront.auth.session";

    pub(super) fn load() -> Option<AuthSession> {
        LocalStorage::get(SESSION_KEY).ok()
    }

    pub(super) fn save(session: Option<&AuthSession>) {
        match session {
            Some(session) => {
                if let Err(err) = LocalStorage::set(SESSION_KEY, session) {
                    warn!(error = %err, "could not persist session");
                }
            }
            None => LocalStorage::delete(SESSION_KEY),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod storage {
    use crate::auth::AuthSession;

    pub(super) const fn load() -> Option<AuthSession> {
        None
    }

    pub(super) const fn save(_session: Option<&AuthSession>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_token_response_prefers_expires_at() {
        let token: TokenResponse = serde_json::from_str(
            r#"{
                "access_token": "a",
                "token_type": "bearer",
                "expires_in": 3600,
                "expires_at": 5000,
                "refresh_token": "r",
                "user": {"id": "u1", "email": "a@b.com"}
            }"#,
        )
        .unwrap();
        let session = token.into_session(100);
        assert_eq!(session.expires_at, Some(5000));
        assert_eq!(session.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn test_token_response_derives_expiry() {
        let token: TokenResponse = serde_json::from_str(
            r#"{"access_token": "a", "expires_in": 60, "user": {"id": "u1"}}"#,
        )
        .unwrap();
        assert_eq!(token.into_session(1_000).expires_at, Some(1_060));
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_at_boundary() {
        let client = HostedAuthClient::new(BackendConfig::default());
        assert!(matches!(
            client.sign_out().await,
            Err(BackendError::NotConfigured(_))
        ));
        assert!(matches!(
            client.sign_in_with_password("a@b.com", "pw").await,
            Err(BackendError::NotConfigured(_))
        ));
        assert!(matches!(
            client.get_user().await,
            Err(BackendError::NotAuthenticated)
        ));
    }

    #[tokio::test]
    async fn test_no_stored_session_resolves_none() {
        let client = HostedAuthClient::new(BackendConfig::default());
        assert_eq!(client.get_current_session().await.unwrap(), None);
        assert_eq!(client.access_token(), None);
    }

    #[tokio::test]
    async fn test_expired_session_without_refresh_signs_out() {
        let client = HostedAuthClient::new(BackendConfig::default());
        let events = Rc::new(Cell::new(0));
        let seen = Rc::clone(&events);
        let _subscription = client.subscribe_auth_changes(Rc::new(move |event, session| {
            assert_eq!(event, AuthEvent::SignedOut);
            assert!(session.is_none());
            seen.set(seen.get() + 1);
        }));
        client.session.replace(Some(AuthSession {
            access_token: "stale".to_string(),
            refresh_token: None,
            expires_at: Some(0),
            user: UserRecord::with_id("u1"),
        }));

        assert_eq!(client.get_current_session().await.unwrap(), None);
        assert_eq!(events.get(), 1);
        assert_eq!(client.cached_user(), None);
    }

    fn expired_session(refresh_token: &str) -> AuthSession {
        AuthSession {
            access_token: "stale".to_string(),
            refresh_token: Some(refresh_token.to_string()),
            expires_at: Some(0),
            user: UserRecord::with_id("u1"),
        }
    }

    #[test]
    fn test_rejected_refresh_drops_session() {
        let client = HostedAuthClient::new(BackendConfig::default());
        let events = Rc::new(Cell::new(0));
        let seen = Rc::clone(&events);
        let _subscription = client.subscribe_auth_changes(Rc::new(move |event, session| {
            assert_eq!(event, AuthEvent::SignedOut);
            assert!(session.is_none());
            seen.set(seen.get() + 1);
        }));
        client.session.replace(Some(expired_session("r")));

        let rejected = BackendError::http(400, r#"{"error_description":"Invalid Refresh Token"}"#);
        let result = client.settle_refresh(Err(rejected));

        assert!(matches!(result, Err(BackendError::Http { status: 400, .. })));
        assert_eq!(client.access_token(), None);
        assert_eq!(client.cached_user(), None);
        assert_eq!(events.get(), 1);
    }

    #[test]
    fn test_server_error_on_refresh_keeps_session() {
        let client = HostedAuthClient::new(BackendConfig::default());
        client.session.replace(Some(expired_session("r")));

        let result = client.settle_refresh(Err(BackendError::http(503, "unavailable")));

        assert!(result.is_err());
        assert_eq!(client.access_token().as_deref(), Some("stale"));
    }

    #[tokio::test]
    async fn test_unreachable_refresh_keeps_session() {
        let client = HostedAuthClient::new(BackendConfig::default());
        client.session.replace(Some(expired_session("r")));

        assert!(matches!(
            client.get_current_session().await,
            Err(BackendError::NotConfigured(_))
        ));
        assert_eq!(client.access_token().as_deref(), Some("stale"));
    }
}
