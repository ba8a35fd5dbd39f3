//! # Session Observer
//!
//! Mirrors the auth provider's state into a `{user, ready}` signal.
//!
//! Two paths feed the same holder: the change listener registered on
//! activation, and a one-shot fetch of the current session that covers a
//! session existing before the listener attached. Readiness is
//! first-writer-wins and never reverts; the user is last-writer-wins. Once
//! released, the holder ignores every write.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::auth::{AuthCallback, AuthProvider, AuthSubscription};
use crate::models::UserRecord;

/// Normalized auth state consumed by the view router.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub user: Option<UserRecord>,
    /// False until the first listener event or fetch result arrives.
    pub ready: bool,
}

impl Session {
    pub const fn pending() -> Self {
        Self {
            user: None,
            ready: false,
        }
    }

    pub const fn signed_out() -> Self {
        Self {
            user: None,
            ready: true,
        }
    }

    pub const fn signed_in(user: UserRecord) -> Self {
        Self {
            user: Some(user),
            ready: true,
        }
    }

    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

type SessionSink = Box<dyn Fn(&Session)>;

struct SessionCell {
    active: Cell<bool>,
    session: RefCell<Session>,
    sink: SessionSink,
}

impl SessionCell {
    /// Record a user from either path. Returns false after release.
    fn write_user(&self, user: Option<UserRecord>, source: &'static str) -> bool {
        if !self.active.get() {
            debug!(source, "ignoring session write after release");
            return false;
        }
        let snapshot = {
            let mut session = self.session.borrow_mut();
            session.user = user;
            session.ready = true;
            session.clone()
        };
        (self.sink)(&snapshot);
        true
    }

    /// A failed fetch only settles readiness.
    fn mark_ready(&self) -> bool {
        if !self.active.get() {
            debug!("ignoring failed fetch after release");
            return false;
        }
        let snapshot = {
            let mut session = self.session.borrow_mut();
            session.ready = true;
            session.clone()
        };
        (self.sink)(&snapshot);
        true
    }
}

/// Owns the listener registration and the state holder it writes to.
pub struct SessionObserver {
    cell: Rc<SessionCell>,
    provider: Rc<dyn AuthProvider>,
    subscription: Option<AuthSubscription>,
}

impl fmt::Debug for SessionObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionObserver")
            .field("session", &*self.cell.session.borrow())
            .field("active", &self.cell.active.get())
            .finish_non_exhaustive()
    }
}

impl SessionObserver {
    /// Register exactly one listener with `provider`. `sink` receives the
    /// session after every accepted write.
    pub fn activate<F>(provider: Rc<dyn AuthProvider>, sink: F) -> Self
    where
        F: Fn(&Session) + 'static,
    {
        let cell = Rc::new(SessionCell {
            active: Cell::new(true),
            session: RefCell::new(Session::pending()),
            sink: Box::new(sink),
        });

        let listener_cell = Rc::downgrade(&cell);
        let callback: AuthCallback = Rc::new(move |event, session| {
            if let Some(cell) = listener_cell.upgrade() {
                debug!(%event, signed_in = session.is_some(), "auth state changed");
                cell.write_user(session.map(|session| session.user.clone()), "listener");
            }
        });
        let subscription = provider.subscribe_auth_changes(callback);

        Self {
            cell,
            provider,
            subscription: Some(subscription),
        }
    }

    /// The one-shot query for the current session. Spawn it right after
    /// [`SessionObserver::activate`]; it is not cancelled by release, but its
    /// result is dropped if it resolves afterwards.
    pub fn initial_fetch(&self) -> Pin<Box<dyn Future<Output = ()>>> {
        let provider = Rc::clone(&self.provider);
        let cell = Rc::clone(&self.cell);
        Box::pin(async move {
            match provider.get_current_session().await {
                Ok(session) => {
                    cell.write_user(session.map(|session| session.user), "initial fetch");
                }
                Err(err) => {
                    warn!(error = %err, "session fetch failed; continuing signed out");
                    cell.mark_ready();
                }
            }
        })
    }

    /// Current snapshot of the signal.
    pub fn session(&self) -> Session {
        self.cell.session.borrow().clone()
    }

    pub fn is_active(&self) -> bool {
        self.cell.active.get()
    }

    /// Release the listener. Later calls are no-ops.
    pub fn release(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            self.cell.active.set(false);
            subscription.unsubscribe();
            debug!("session observer released");
        }
    }
}

impl Drop for SessionObserver {
    fn drop(&mut self) {
        self.release();
    }
}
