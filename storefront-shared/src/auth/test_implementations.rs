//! In-memory [`AuthProvider`] for exercising the session observer and the
//! router without a backend.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;

use super::{AuthCallback, AuthEvent, AuthProvider, AuthSession, AuthSubscription, ListenerRegistry};
use crate::client::{BackendError, BackendResult};
use crate::models::UserRecord;

/// What the next `get_current_session` call resolves to.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Session(Option<AuthSession>),
    Fail,
}

/// Scriptable auth provider.
#[derive(Debug)]
pub struct FakeAuthProvider {
    listeners: Rc<ListenerRegistry>,
    fetch: RefCell<FetchOutcome>,
    sign_out_fails: Cell<bool>,
    sign_out_calls: Cell<usize>,
}

impl FakeAuthProvider {
    pub fn new(fetch: FetchOutcome) -> Rc<Self> {
        Rc::new(Self {
            listeners: ListenerRegistry::new(),
            fetch: RefCell::new(fetch),
            sign_out_fails: Cell::new(false),
            sign_out_calls: Cell::new(0),
        })
    }

    pub fn signed_out() -> Rc<Self> {
        Self::new(FetchOutcome::Session(None))
    }

    pub fn signed_in(user: UserRecord) -> Rc<Self> {
        Self::new(FetchOutcome::Session(Some(session_for(user))))
    }

    pub fn failing_fetch() -> Rc<Self> {
        Self::new(FetchOutcome::Fail)
    }

    pub fn fail_sign_out(&self) {
        self.sign_out_fails.set(true);
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_calls.get()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Push an auth transition to every subscriber.
    pub fn emit(&self, event: AuthEvent, session: Option<&AuthSession>) {
        self.listeners.emit(event, session);
    }
}

pub fn session_for(user: UserRecord) -> AuthSession {
    AuthSession {
        access_token: format!("token-{}", user.id),
        refresh_token: None,
        expires_at: None,
        user,
    }
}

#[async_trait(?Send)]
impl AuthProvider for FakeAuthProvider {
    fn subscribe_auth_changes(&self, callback: AuthCallback) -> AuthSubscription {
        self.listeners.subscribe(callback)
    }

    async fn get_current_session(&self) -> BackendResult<Option<AuthSession>> {
        match self.fetch.borrow().clone() {
            FetchOutcome::Session(session) => Ok(session),
            FetchOutcome::Fail => Err(BackendError::http(503, "service unavailable")),
        }
    }

    async fn sign_out(&self) -> BackendResult<()> {
        self.sign_out_calls.set(self.sign_out_calls.get() + 1);
        if self.sign_out_fails.get() {
            return Err(BackendError::http(500, r#"{"message":"logout failed"}"#));
        }
        self.listeners.emit(AuthEvent::SignedOut, None);
        Ok(())
    }
}
