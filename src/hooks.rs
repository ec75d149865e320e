//! Consumer accessor for the session provided by `<AuthProvider>`.

#[cfg(test)]
#[path = "hooks_test.rs"]
mod hooks_test;

use std::ops::Deref;

use leptos::prelude::*;

use crate::context::AuthContext;
use crate::error::OidcError;
use crate::manager::NavigatorMethod;
use crate::state::session::{SessionStateViews, UserSlot};

/// Session state views plus the bound client operations.
///
/// Operations are reachable through `Deref<Target = AuthContext>`.
#[derive(Clone, Debug)]
pub struct Auth {
    pub user: Signal<UserSlot>,
    pub is_loading: Signal<bool>,
    pub is_authenticated: Signal<bool>,
    pub active_navigator: Signal<Option<NavigatorMethod>>,
    pub error: Signal<Option<OidcError>>,
    context: AuthContext,
}

impl Auth {
    pub(crate) fn new(state: SessionStateViews, context: AuthContext) -> Self {
        Self {
            user: state.user,
            is_loading: state.is_loading,
            is_authenticated: state.is_authenticated,
            active_navigator: state.active_navigator,
            error: state.error,
            context,
        }
    }

    #[must_use]
    pub fn context(&self) -> &AuthContext {
        &self.context
    }
}

impl Deref for Auth {
    type Target = AuthContext;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

/// Read the session provided by the nearest enclosing `<AuthProvider>`.
///
/// # Errors
///
/// Returns [`OidcError::MissingProvider`] when called outside an `<AuthProvider>`.
pub fn use_auth() -> Result<Auth, OidcError> {
    let context = use_context::<AuthContext>();
    let state = use_context::<SessionStateViews>();
    match (context, state) {
        (Some(context), Some(state)) => Ok(Auth::new(state, context)),
        _ => Err(OidcError::MissingProvider),
    }
}
