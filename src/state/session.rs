//! Session state, its actions, and the reducer that applies them.
//!
//! DESIGN
//! ======
//! `reduce` is pure and total over the closed [`Action`] enum. The store wraps
//! one `RwSignal<SessionState>` per provider activation; only crate code can
//! dispatch, and consumers get one read-only `Signal` per field.
//!
//! `NavigatorClose` does not keep a count of open navigators: when two
//! navigator operations overlap, whichever finishes first clears
//! `is_loading`/`active_navigator` for both.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use crate::error::OidcError;
use crate::manager::{NavigatorMethod, User};

/// The session principal slot.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum UserSlot {
    /// Explicitly unloaded by the client (`UserUnloaded`).
    Unloaded,
    /// Nothing loaded yet, or the last load found no session.
    #[default]
    Empty,
    Loaded(User),
}

impl UserSlot {
    #[must_use]
    pub fn as_user(&self) -> Option<&User> {
        match self {
            Self::Loaded(user) => Some(user),
            Self::Unloaded | Self::Empty => None,
        }
    }

    #[must_use]
    pub fn into_user(self) -> Option<User> {
        match self {
            Self::Loaded(user) => Some(user),
            Self::Unloaded | Self::Empty => None,
        }
    }
}

impl From<Option<User>> for UserSlot {
    fn from(user: Option<User>) -> Self {
        user.map_or(Self::Empty, Self::Loaded)
    }
}

/// Authentication status for one provider activation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionState {
    pub user: UserSlot,
    /// True while bootstrapping or while a navigator operation is in flight.
    pub is_loading: bool,
    /// True while `user` holds a non-expired principal.
    pub is_authenticated: bool,
    /// Most recently started navigator operation still in flight.
    pub active_navigator: Option<NavigatorMethod>,
    /// Last bootstrap or silent-renew failure.
    pub error: Option<OidcError>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: UserSlot::Empty,
            is_loading: true,
            is_authenticated: false,
            active_navigator: None,
            error: None,
        }
    }
}

/// The only way session state changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Bootstrap finished loading whatever session exists.
    Initialised(Option<User>),
    /// The client loaded a user (sign-in, renew).
    UserLoaded(Option<User>),
    UserUnloaded,
    NavigatorInit(NavigatorMethod),
    NavigatorClose,
    Error(OidcError),
}

/// Apply `action` to `state`.
#[must_use]
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    match action {
        Action::Initialised(user) | Action::UserLoaded(user) => {
            let is_authenticated = user.as_ref().is_some_and(|u| !u.expired());
            SessionState {
                user: user.into(),
                is_loading: false,
                is_authenticated,
                error: None,
                ..state.clone()
            }
        }
        Action::UserUnloaded => SessionState {
            user: UserSlot::Unloaded,
            is_authenticated: false,
            ..state.clone()
        },
        Action::NavigatorInit(method) => SessionState {
            is_loading: true,
            active_navigator: Some(method),
            ..state.clone()
        },
        Action::NavigatorClose => SessionState {
            is_loading: false,
            active_navigator: None,
            ..state.clone()
        },
        Action::Error(error) => SessionState {
            is_loading: false,
            error: Some(error),
            ..state.clone()
        },
    }
}

/// Read-only per-field views of the session state.
#[derive(Clone, Copy, Debug)]
pub struct SessionStateViews {
    pub user: Signal<UserSlot>,
    pub is_loading: Signal<bool>,
    pub is_authenticated: Signal<bool>,
    pub active_navigator: Signal<Option<NavigatorMethod>>,
    pub error: Signal<Option<OidcError>>,
}

/// Owner of one session's state signal.
#[derive(Clone, Copy, Debug)]
pub struct SessionStore {
    state: RwSignal<SessionState>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(SessionState::default()),
        }
    }

    /// Run `action` through the reducer. Dispatches into a disposed store are dropped.
    pub(crate) fn dispatch(&self, action: Action) {
        let applied = self.state.try_update(|state| *state = reduce(state, action));
        if applied.is_none() {
            leptos::logging::warn!("session store disposed; dropping action");
        }
    }

    /// Current state without subscribing.
    #[must_use]
    pub fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    #[must_use]
    pub fn views(&self) -> SessionStateViews {
        let state = self.state;
        SessionStateViews {
            user: Signal::derive(move || state.with(|s| s.user.clone())),
            is_loading: Signal::derive(move || state.with(|s| s.is_loading)),
            is_authenticated: Signal::derive(move || state.with(|s| s.is_authenticated)),
            active_navigator: Signal::derive(move || state.with(|s| s.active_navigator)),
            error: Signal::derive(move || state.with(|s| s.error.clone())),
        }
    }
}
