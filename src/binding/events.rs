//! Bridge from client events to session actions.
//!
//! SYSTEM CONTEXT
//! ==============
//! The client raises events on its own schedule (renew timers, other tabs,
//! `remove_user`). [`EventSubscription::attach`] turns them into reducer
//! dispatches; dropping the subscription removes every handler it added.

#[cfg(test)]
#[path = "events_test.rs"]
mod events_test;

use std::sync::Arc;

use crate::manager::{SubscriptionId, UserManager};
use crate::state::session::{Action, SessionStore};

/// Live handler registrations on one client. Released on drop.
pub struct EventSubscription {
    client: Arc<dyn UserManager>,
    user_loaded: SubscriptionId,
    user_unloaded: SubscriptionId,
    silent_renew_error: SubscriptionId,
}

impl EventSubscription {
    /// Register the user-loaded, user-unloaded and silent-renew-error handlers.
    pub fn attach(client: Arc<dyn UserManager>, store: SessionStore) -> Self {
        let events = client.events();
        let user_loaded = events.add_user_loaded(move |user| {
            store.dispatch(Action::UserLoaded(Some(user.clone())));
        });
        let user_unloaded = events.add_user_unloaded(move || {
            store.dispatch(Action::UserUnloaded);
        });
        let silent_renew_error = events.add_silent_renew_error(move |error| {
            leptos::logging::warn!("silent renew failed: {error}");
            store.dispatch(Action::Error(error.clone()));
        });
        Self {
            client,
            user_loaded,
            user_unloaded,
            silent_renew_error,
        }
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        let events = self.client.events();
        events.remove_user_loaded(self.user_loaded);
        events.remove_user_unloaded(self.user_unloaded);
        events.remove_silent_renew_error(self.silent_renew_error);
    }
}

impl std::fmt::Debug for EventSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSubscription")
            .field("user_loaded", &self.user_loaded)
            .field("user_unloaded", &self.user_unloaded)
            .field("silent_renew_error", &self.silent_renew_error)
            .finish_non_exhaustive()
    }
}
