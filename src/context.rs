//! Method surface provided to descendants of `<AuthProvider>`.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthContext` is the callable half of what `use_auth()` returns: settings,
//! the event emitter, the bound navigator operations, and pass-through
//! session calls. Each pass-through is resolved against the client when the
//! context is built, so an unavailable method fails the same way every time.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::sync::Arc;

use crate::binding::navigator::NavigatorBinding;
use crate::config::RemoveUserHook;
use crate::error::OidcError;
use crate::manager::{
    Bound, NavigatorMethod, Operation, QuerySessionStatusArgs, RevokeTokenType, SessionStatus,
    SigninPopupArgs, SigninRedirectArgs, SigninSilentArgs, SignoutPopupArgs, SignoutRedirectArgs, User,
    UserManager, UserManagerEvents, UserManagerSettings,
};
use crate::state::session::SessionStore;

#[derive(Clone)]
pub struct AuthContext {
    settings: UserManagerSettings,
    client: Option<Arc<dyn UserManager>>,
    navigators: NavigatorBinding,
    clear_stale_state: Bound,
    query_session_status: Bound,
    revoke_tokens: Bound,
    start_silent_renew: Bound,
    stop_silent_renew: Bound,
    remove_user: Bound,
    on_remove_user: Option<RemoveUserHook>,
}

impl AuthContext {
    pub(crate) fn new(
        settings: UserManagerSettings,
        client: Option<Arc<dyn UserManager>>,
        store: SessionStore,
        on_remove_user: Option<RemoveUserHook>,
    ) -> Self {
        let settings = client.as_ref().map_or(settings, |c| c.settings().clone());
        let bind = |operation| Bound::resolve(client.as_ref(), operation);
        Self {
            navigators: NavigatorBinding::new(client.as_ref(), store),
            clear_stale_state: bind(Operation::ClearStaleState),
            query_session_status: bind(Operation::QuerySessionStatus),
            revoke_tokens: bind(Operation::RevokeTokens),
            start_silent_renew: bind(Operation::StartSilentRenew),
            stop_silent_renew: bind(Operation::StopSilentRenew),
            remove_user: bind(Operation::RemoveUser),
            settings,
            client,
            on_remove_user,
        }
    }

    #[must_use]
    pub fn settings(&self) -> &UserManagerSettings {
        &self.settings
    }

    /// The client's event emitter; `None` when no client is configured.
    #[must_use]
    pub fn events(&self) -> Option<&UserManagerEvents> {
        self.client.as_deref().map(|client| client.events())
    }

    /// Whether a navigator operation is callable in this environment.
    #[must_use]
    pub fn supports(&self, method: NavigatorMethod) -> bool {
        self.navigators.supports(method)
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signin_redirect(&self, args: SigninRedirectArgs) -> Result<(), OidcError> {
        self.navigators.signin_redirect(args).await
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signin_popup(&self, args: SigninPopupArgs) -> Result<User, OidcError> {
        self.navigators.signin_popup(args).await
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signin_silent(&self, args: SigninSilentArgs) -> Result<Option<User>, OidcError> {
        self.navigators.signin_silent(args).await
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signout_redirect(&self, args: SignoutRedirectArgs) -> Result<(), OidcError> {
        self.navigators.signout_redirect(args).await
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn signout_popup(&self, args: SignoutPopupArgs) -> Result<(), OidcError> {
        self.navigators.signout_popup(args).await
    }

    /// Remove leftover sign-in request state from client storage.
    ///
    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn clear_stale_state(&self) -> Result<(), OidcError> {
        self.clear_stale_state.client()?.clear_stale_state().await
    }

    /// Ask the provider (`prompt=none`) whether the session is still alive.
    ///
    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn query_session_status(
        &self,
        args: QuerySessionStatusArgs,
    ) -> Result<Option<SessionStatus>, OidcError> {
        self.query_session_status.client()?.query_session_status(args).await
    }

    /// # Errors
    ///
    /// Returns the client's error, or `UnsupportedEnvironment`.
    pub async fn revoke_tokens(&self, types: Option<Vec<RevokeTokenType>>) -> Result<(), OidcError> {
        self.revoke_tokens.client()?.revoke_tokens(types).await
    }

    /// # Errors
    ///
    /// Returns `UnsupportedEnvironment` when the client cannot renew.
    pub fn start_silent_renew(&self) -> Result<(), OidcError> {
        self.start_silent_renew.client()?.start_silent_renew();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `UnsupportedEnvironment` when the client cannot renew.
    pub fn stop_silent_renew(&self) -> Result<(), OidcError> {
        self.stop_silent_renew.client()?.stop_silent_renew();
        Ok(())
    }

    /// Drop the persisted user, then run the `on_remove_user` hook.
    ///
    /// # Errors
    ///
    /// Returns the client's error (the hook is skipped), or `UnsupportedEnvironment`.
    pub async fn remove_user(&self) -> Result<(), OidcError> {
        self.remove_user.client()?.remove_user().await?;
        if let Some(hook) = &self.on_remove_user {
            hook();
        }
        Ok(())
    }
}

impl std::fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthContext")
            .field("settings", &self.settings)
            .field("navigators", &self.navigators)
            .field("remove_user", &self.remove_user)
            .finish_non_exhaustive()
    }
}
