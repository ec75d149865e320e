//! Event emitter owned by a `UserManager` implementation.
//!
//! Implementations call [`UserManagerEvents::load`], [`UserManagerEvents::unload`]
//! and [`UserManagerEvents::raise_silent_renew_error`]; the session layer
//! subscribes with the `add_*` methods and releases with `remove_*`.
//!
//! Handlers are invoked outside the registry lock, so a handler may remove
//! itself (or others) while being notified.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::OidcError;

use super::types::User;

/// Handle returned by `add_*`, consumed by the matching `remove_*`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct HandlerList<T> {
    handlers: Mutex<Vec<(SubscriptionId, Handler<T>)>>,
}

impl<T> Default for HandlerList<T> {
    fn default() -> Self {
        Self { handlers: Mutex::new(Vec::new()) }
    }
}

impl<T> HandlerList<T> {
    fn add(&self, id: SubscriptionId, handler: Handler<T>) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, handler));
    }

    fn remove(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.lock().unwrap_or_else(PoisonError::into_inner);
        let before = handlers.len();
        handlers.retain(|(existing, _)| *existing != id);
        handlers.len() != before
    }

    fn len(&self) -> usize {
        self.handlers.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    fn raise(&self, value: &T) {
        let snapshot: Vec<Handler<T>> = self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in snapshot {
            handler(value);
        }
    }
}

/// Subscription registry for the three events the session layer consumes.
#[derive(Default)]
pub struct UserManagerEvents {
    next_id: AtomicU64,
    user_loaded: HandlerList<User>,
    user_unloaded: HandlerList<()>,
    silent_renew_error: HandlerList<OidcError>,
}

impl UserManagerEvents {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// Subscribe to "user loaded" (initial load, sign-in, silent renew success).
    pub fn add_user_loaded(&self, handler: impl Fn(&User) + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_id();
        self.user_loaded.add(id, Arc::new(handler));
        id
    }

    pub fn remove_user_loaded(&self, id: SubscriptionId) -> bool {
        self.user_loaded.remove(id)
    }

    /// Subscribe to "user unloaded" (e.g. after `remove_user`).
    pub fn add_user_unloaded(&self, handler: impl Fn() + Send + Sync + 'static) -> SubscriptionId {
        let id = self.next_id();
        self.user_unloaded.add(id, Arc::new(move |_: &()| handler()));
        id
    }

    pub fn remove_user_unloaded(&self, id: SubscriptionId) -> bool {
        self.user_unloaded.remove(id)
    }

    pub fn add_silent_renew_error(
        &self,
        handler: impl Fn(&OidcError) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_id();
        self.silent_renew_error.add(id, Arc::new(handler));
        id
    }

    pub fn remove_silent_renew_error(&self, id: SubscriptionId) -> bool {
        self.silent_renew_error.remove(id)
    }

    /// Notify "user loaded" subscribers.
    pub fn load(&self, user: &User) {
        self.user_loaded.raise(user);
    }

    /// Notify "user unloaded" subscribers.
    pub fn unload(&self) {
        self.user_unloaded.raise(&());
    }

    pub fn raise_silent_renew_error(&self, error: &OidcError) {
        self.silent_renew_error.raise(error);
    }

    /// Total live subscriptions across all events.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.user_loaded.len() + self.user_unloaded.len() + self.silent_renew_error.len()
    }
}

impl std::fmt::Debug for UserManagerEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserManagerEvents")
            .field("user_loaded", &self.user_loaded.len())
            .field("user_unloaded", &self.user_unloaded.len())
            .field("silent_renew_error", &self.silent_renew_error.len())
            .finish()
    }
}
