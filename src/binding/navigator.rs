//! Navigator operations bound to session state.
//!
//! Each sign-in/sign-out entry point dispatches `NavigatorInit` before the
//! client call and `NavigatorClose` after it, on success, failure, panic or
//! drop alike. Unsupported operations fail before touching state.

#[cfg(test)]
#[path = "navigator_test.rs"]
mod navigator_test;

use std::future::Future;
use std::sync::Arc;

use crate::error::OidcError;
use crate::manager::{
    Bound, NavigatorMethod, SigninPopupArgs, SigninRedirectArgs, SigninSilentArgs, SignoutPopupArgs,
    SignoutRedirectArgs, User, UserManager,
};
use crate::state::session::{Action, SessionStore};

/// Dispatches `NavigatorClose` when dropped.
struct NavigatorGuard {
    store: SessionStore,
}

impl NavigatorGuard {
    fn open(store: SessionStore, method: NavigatorMethod) -> Self {
        store.dispatch(Action::NavigatorInit(method));
        Self { store }
    }
}

impl Drop for NavigatorGuard {
    fn drop(&mut self) {
        self.store.dispatch(Action::NavigatorClose);
    }
}

/// The five navigator operations, each resolved against the client once.
#[derive(Clone, Debug)]
pub struct NavigatorBinding {
    store: SessionStore,
    signin_redirect: Bound,
    signin_popup: Bound,
    signin_silent: Bound,
    signout_redirect: Bound,
    signout_popup: Bound,
}

impl NavigatorBinding {
    pub(crate) fn new(client: Option<&Arc<dyn UserManager>>, store: SessionStore) -> Self {
        Self {
            store,
            signin_redirect: Bound::resolve(client, NavigatorMethod::SigninRedirect.into()),
            signin_popup: Bound::resolve(client, NavigatorMethod::SigninPopup.into()),
            signin_silent: Bound::resolve(client, NavigatorMethod::SigninSilent.into()),
            signout_redirect: Bound::resolve(client, NavigatorMethod::SignoutRedirect.into()),
            signout_popup: Bound::resolve(client, NavigatorMethod::SignoutPopup.into()),
        }
    }

    fn bound(&self, method: NavigatorMethod) -> &Bound {
        match method {
            NavigatorMethod::SigninRedirect => &self.signin_redirect,
            NavigatorMethod::SigninPopup => &self.signin_popup,
            NavigatorMethod::SigninSilent => &self.signin_silent,
            NavigatorMethod::SignoutRedirect => &self.signout_redirect,
            NavigatorMethod::SignoutPopup => &self.signout_popup,
        }
    }

    /// Whether `method` resolved to a supported client call.
    #[must_use]
    pub fn supports(&self, method: NavigatorMethod) -> bool {
        self.bound(method).is_supported()
    }

    async fn run<T, F, Fut>(&self, method: NavigatorMethod, call: F) -> Result<T, OidcError>
    where
        F: FnOnce(Arc<dyn UserManager>) -> Fut,
        Fut: Future<Output = Result<T, OidcError>>,
    {
        let client = Arc::clone(self.bound(method).client()?);
        let guard = NavigatorGuard::open(self.store, method);
        let result = call(client).await;
        drop(guard);
        result
    }

    /// Start a redirect sign-in. Usually navigates away before resolving.
    ///
    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signin_redirect(&self, args: SigninRedirectArgs) -> Result<(), OidcError> {
        self.run(NavigatorMethod::SigninRedirect, |client| async move {
            client.signin_redirect(args).await
        })
        .await
    }

    /// Sign in through a popup window.
    ///
    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signin_popup(&self, args: SigninPopupArgs) -> Result<User, OidcError> {
        self.run(NavigatorMethod::SigninPopup, |client| async move {
            client.signin_popup(args).await
        })
        .await
    }

    /// Sign in through a hidden iframe or refresh token.
    ///
    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signin_silent(&self, args: SigninSilentArgs) -> Result<Option<User>, OidcError> {
        self.run(NavigatorMethod::SigninSilent, |client| async move {
            client.signin_silent(args).await
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signout_redirect(&self, args: SignoutRedirectArgs) -> Result<(), OidcError> {
        self.run(NavigatorMethod::SignoutRedirect, |client| async move {
            client.signout_redirect(args).await
        })
        .await
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signout_popup(&self, args: SignoutPopupArgs) -> Result<(), OidcError> {
        self.run(NavigatorMethod::SignoutPopup, |client| async move {
            client.signout_popup(args).await
        })
        .await
    }
}
