//! Contract for the external OIDC client ("user manager").
//!
//! SYSTEM CONTEXT
//! ==============
//! The session layer never talks to an identity provider itself. Everything
//! protocol-related (redirects, popups, token storage, renew timers) lives
//! behind [`UserManager`], and this crate only binds its methods and events
//! to reactive state.
//!
//! DESIGN
//! ======
//! Method availability is declared up front through [`UserManager::supports`]
//! and resolved once when the provider is built, so callers of an unavailable
//! method get `OidcError::UnsupportedEnvironment` without any state change.

pub mod events;
pub mod types;


use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::OidcError;

pub use events::{SubscriptionId, UserManagerEvents};
pub use types::{
    QuerySessionStatusArgs, RevokeTokenType, SessionStatus, SigninPopupArgs, SigninRedirectArgs,
    SigninSilentArgs, SignoutPopupArgs, SignoutRedirectArgs, User, UserManagerSettings, UserProfile,
};

/// Every client entry point the session layer can bind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    SigninRedirect,
    SigninPopup,
    SigninSilent,
    SignoutRedirect,
    SignoutPopup,
    GetUser,
    RemoveUser,
    SigninCallback,
    ClearStaleState,
    QuerySessionStatus,
    RevokeTokens,
    StartSilentRenew,
    StopSilentRenew,
}

impl Operation {
    /// Client method name, as used in diagnostics.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SigninRedirect => "signinRedirect",
            Self::SigninPopup => "signinPopup",
            Self::SigninSilent => "signinSilent",
            Self::SignoutRedirect => "signoutRedirect",
            Self::SignoutPopup => "signoutPopup",
            Self::GetUser => "getUser",
            Self::RemoveUser => "removeUser",
            Self::SigninCallback => "signinCallback",
            Self::ClearStaleState => "clearStaleState",
            Self::QuerySessionStatus => "querySessionStatus",
            Self::RevokeTokens => "revokeTokens",
            Self::StartSilentRenew => "startSilentRenew",
            Self::StopSilentRenew => "stopSilentRenew",
        }
    }
}

/// Navigation operations tracked in `SessionState::active_navigator`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigatorMethod {
    SigninRedirect,
    SigninPopup,
    SigninSilent,
    SignoutRedirect,
    SignoutPopup,
}

impl NavigatorMethod {
    pub const ALL: [Self; 5] = [
        Self::SigninRedirect,
        Self::SigninPopup,
        Self::SigninSilent,
        Self::SignoutRedirect,
        Self::SignoutPopup,
    ];
}

impl From<NavigatorMethod> for Operation {
    fn from(method: NavigatorMethod) -> Self {
        match method {
            NavigatorMethod::SigninRedirect => Self::SigninRedirect,
            NavigatorMethod::SigninPopup => Self::SigninPopup,
            NavigatorMethod::SigninSilent => Self::SigninSilent,
            NavigatorMethod::SignoutRedirect => Self::SignoutRedirect,
            NavigatorMethod::SignoutPopup => Self::SignoutPopup,
        }
    }
}

/// The external OIDC/OAuth2 client.
///
/// Futures are not required to be `Send`: the browser runs everything on one
/// thread and implementations typically hold JS handles.
#[async_trait(?Send)]
pub trait UserManager: Send + Sync {
    /// Settings the client was built with.
    fn settings(&self) -> &UserManagerSettings;

    /// Event emitter the client raises user-loaded/unloaded and renew errors on.
    fn events(&self) -> &UserManagerEvents;

    /// Whether `operation` works in the current build/environment.
    fn supports(&self, operation: Operation) -> bool {
        let _ = operation;
        true
    }

    async fn signin_redirect(&self, args: SigninRedirectArgs) -> Result<(), OidcError>;

    async fn signin_popup(&self, args: SigninPopupArgs) -> Result<User, OidcError>;

    async fn signin_silent(&self, args: SigninSilentArgs) -> Result<Option<User>, OidcError>;

    async fn signout_redirect(&self, args: SignoutRedirectArgs) -> Result<(), OidcError>;

    async fn signout_popup(&self, args: SignoutPopupArgs) -> Result<(), OidcError>;

    /// Load the persisted session, if any.
    async fn get_user(&self) -> Result<Option<User>, OidcError>;

    /// Drop the persisted session. Implementations raise `unload` on success.
    async fn remove_user(&self) -> Result<(), OidcError>;

    /// Complete a redirect sign-in from the callback URL.
    async fn signin_callback(&self, url: &str) -> Result<Option<User>, OidcError>;

    async fn clear_stale_state(&self) -> Result<(), OidcError>;

    async fn query_session_status(
        &self,
        args: QuerySessionStatusArgs,
    ) -> Result<Option<SessionStatus>, OidcError>;

    async fn revoke_tokens(&self, types: Option<Vec<RevokeTokenType>>) -> Result<(), OidcError>;

    fn start_silent_renew(&self);

    fn stop_silent_renew(&self);
}

/// Builds a client from settings; the `implementation` provider option.
pub type UserManagerFactory = Arc<dyn Fn(UserManagerSettings) -> Arc<dyn UserManager> + Send + Sync>;

/// A per-operation binding resolved once at construction.
#[derive(Clone)]
pub(crate) enum Bound {
    Supported(Arc<dyn UserManager>),
    Unsupported(Operation),
}

impl Bound {
    pub(crate) fn resolve(client: Option<&Arc<dyn UserManager>>, operation: Operation) -> Self {
        match client {
            Some(client) if client.supports(operation) => Self::Supported(Arc::clone(client)),
            _ => Self::Unsupported(operation),
        }
    }

    pub(crate) fn client(&self) -> Result<&Arc<dyn UserManager>, OidcError> {
        match self {
            Self::Supported(client) => Ok(client),
            Self::Unsupported(operation) => {
                leptos::logging::warn!("{} is unavailable in this environment", operation.name());
                Err(OidcError::unsupported(*operation))
            }
        }
    }

    pub(crate) fn is_supported(&self) -> bool {
        matches!(self, Self::Supported(_))
    }
}

impl std::fmt::Debug for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Supported(_) => f.write_str("Supported"),
            Self::Unsupported(operation) => write!(f, "Unsupported({})", operation.name()),
        }
    }
}
