use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

use super::{AuthCallback, AuthEvent, AuthSession};

/// Set of auth listeners owned by a provider.
#[derive(Default)]
pub struct ListenerRegistry {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, AuthCallback)>>,
}

impl fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.len())
            .finish_non_exhaustive()
    }
}

impl ListenerRegistry {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Register a listener and hand back the handle that releases it.
    pub fn subscribe(self: &Rc<Self>, callback: AuthCallback) -> AuthSubscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, callback));
        trace!(id, "auth listener registered");
        AuthSubscription {
            id,
            registry: Rc::downgrade(self),
            released: false,
        }
    }

    /// Notify every registered listener.
    ///
    /// Listeners may unsubscribe (themselves or others) while being
    /// notified; a listener removed mid-emit is not called.
    pub fn emit(&self, event: AuthEvent, session: Option<&AuthSession>) {
        let snapshot: Vec<(u64, AuthCallback)> = self.listeners.borrow().clone();
        for (id, callback) in snapshot {
            if self.contains(id) {
                callback(event, session);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(other, _)| *other == id)
    }

    fn remove(&self, id: u64) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(other, _)| *other != id);
        listeners.len() != before
    }
}

/// Disposable handle for one registered listener.
///
/// Released by [`AuthSubscription::unsubscribe`] or on drop, whichever comes
/// first; the listener is removed exactly once.
#[must_use = "dropping the subscription unregisters the listener"]
#[derive(Debug)]
pub struct AuthSubscription {
    id: u64,
    registry: Weak<ListenerRegistry>,
    released: bool,
}

impl AuthSubscription {
    pub fn unsubscribe(mut self) {
        self.release();
    }

    pub const fn is_released(&self) -> bool {
        self.released
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        if let Some(registry) = self.registry.upgrade() {
            let removed = registry.remove(self.id);
            trace!(id = self.id, removed, "auth listener released");
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRecord;

    fn counting_listener(counter: &Rc<Cell<usize>>) -> AuthCallback {
        let counter = Rc::clone(counter);
        Rc::new(move |_, _| counter.set(counter.get() + 1))
    }

    #[test]
    fn test_emit_reaches_every_listener() {
        let registry = ListenerRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let _a = registry.subscribe(counting_listener(&hits));
        let _b = registry.subscribe(counting_listener(&hits));

        registry.emit(AuthEvent::SignedOut, None);
        assert_eq!(hits.get(), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unsubscribe_removes_listener() {
        let registry = ListenerRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let subscription = registry.subscribe(counting_listener(&hits));
        subscription.unsubscribe();

        registry.emit(AuthEvent::SignedOut, None);
        assert_eq!(hits.get(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_drop_releases_listener() {
        let registry = ListenerRegistry::new();
        let hits = Rc::new(Cell::new(0));
        {
            let _subscription = registry.subscribe(counting_listener(&hits));
            assert_eq!(registry.len(), 1);
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_subscription_outlives_registry() {
        let registry = ListenerRegistry::new();
        let subscription = registry.subscribe(Rc::new(|_, _| {}));
        drop(registry);
        subscription.unsubscribe();
    }

    /// A listener released by an earlier listener during the same emit is
    /// skipped.
    #[test]
    fn test_listener_removed_mid_emit_is_skipped() {
        let registry = ListenerRegistry::new();
        let hits = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<AuthSubscription>>> = Rc::new(RefCell::new(None));

        let victim_handle = Rc::clone(&victim);
        let _killer = registry.subscribe(Rc::new(move |_, _| {
            if let Some(subscription) = victim_handle.borrow_mut().take() {
                subscription.unsubscribe();
            }
        }));
        *victim.borrow_mut() = Some(registry.subscribe(counting_listener(&hits)));

        let session = AuthSession {
            access_token: "t".to_string(),
            refresh_token: None,
            expires_at: None,
            user: UserRecord::with_id("u1"),
        };
        registry.emit(AuthEvent::SignedIn, Some(&session));
        assert_eq!(hits.get(), 0);
        assert_eq!(registry.len(), 1);
    }
}
