//! One-shot session bootstrap.
//!
//! SYSTEM CONTEXT
//! ==============
//! Runs once per provider activation: complete a redirect sign-in if the page
//! is an OIDC callback, then load whatever session the client has persisted,
//! and report the outcome as `Initialised` or `Error`.
//!
//! ERROR HANDLING
//! ==============
//! Failures never reach the caller; they land in `SessionState::error`
//! wrapped as `OidcError::Login`. A client that cannot run `get_user` (or
//! `signin_callback` on a callback page), including no client at all, ends
//! in `Login(UnsupportedEnvironment)` rather than leaving the session
//! loading.
//!
//! The `on_signin_callback` hook is invoked synchronously and anything it
//! starts on its own is not awaited, so its failures are not observed here.

#[cfg(test)]
#[path = "bootstrap_test.rs"]
mod bootstrap_test;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::OidcError;
use crate::manager::{Bound, Operation, User, UserManager};
use crate::state::session::{Action, SessionStore};
use crate::util::location::PageLocation;

/// Post-callback hook, e.g. to strip `code`/`state` from the address bar.
pub type SigninCallbackHook = Arc<dyn Fn(Option<&User>) + Send + Sync>;

/// How the sequence treats callback parameters.
#[derive(Clone, Default)]
pub struct BootstrapOptions {
    /// Leave callback parameters alone (they belong to some other OAuth flow).
    pub skip_signin_callback: bool,
    pub on_signin_callback: Option<SigninCallbackHook>,
}

impl std::fmt::Debug for BootstrapOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapOptions")
            .field("skip_signin_callback", &self.skip_signin_callback)
            .field("on_signin_callback", &self.on_signin_callback.is_some())
            .finish()
    }
}

/// One-shot sequence with its two client calls resolved up front.
#[derive(Clone, Debug)]
pub struct Bootstrap {
    started: Arc<AtomicBool>,
    signin_callback: Bound,
    get_user: Bound,
}

impl Bootstrap {
    /// Resolve `signin_callback`/`get_user` against `client`. Without a
    /// client both are unsupported and the sequence settles into an error.
    #[must_use]
    pub fn new(client: Option<&Arc<dyn UserManager>>) -> Self {
        Self {
            started: Arc::new(AtomicBool::new(false)),
            signin_callback: Bound::resolve(client, Operation::SigninCallback),
            get_user: Bound::resolve(client, Operation::GetUser),
        }
    }

    #[must_use]
    pub fn has_started(&self) -> bool {
        self.started.load(Ordering::Acquire)
    }

    /// Run the sequence unless it already ran. Returns whether this call ran it.
    pub async fn run(
        &self,
        store: SessionStore,
        options: &BootstrapOptions,
        location: Option<&PageLocation>,
    ) -> bool {
        if self.started.swap(true, Ordering::AcqRel) {
            return false;
        }
        match self.load_session(options, location).await {
            Ok(user) => store.dispatch(Action::Initialised(user)),
            Err(e) => {
                let error = OidcError::login(e);
                leptos::logging::warn!("oidc bootstrap failed: {error}");
                store.dispatch(Action::Error(error));
            }
        }
        true
    }

    async fn load_session(
        &self,
        options: &BootstrapOptions,
        location: Option<&PageLocation>,
    ) -> Result<Option<User>, OidcError> {
        if let Some(location) = location.filter(|l| l.has_auth_params()) {
            if !options.skip_signin_callback {
                let user = self.signin_callback.client()?.signin_callback(&location.href).await?;
                leptos::logging::log!("oidc sign-in callback completed");
                if let Some(hook) = &options.on_signin_callback {
                    hook(user.as_ref());
                }
            }
        }
        self.get_user.client()?.get_user().await
    }
}
