//! Provider configuration.
//!
//! `AuthProviderOptions` carries the client settings plus the provider-only
//! options: callback/remove hooks, callback skipping, and the client factory.
//! Without a factory every client operation reports
//! `OidcError::UnsupportedEnvironment`, which is what server rendering wants.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::sync::Arc;

use crate::binding::bootstrap::{BootstrapOptions, SigninCallbackHook};
use crate::manager::{User, UserManager, UserManagerFactory, UserManagerSettings};

/// Hook run after `remove_user` succeeds, e.g. to navigate home.
pub type RemoveUserHook = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct AuthProviderOptions {
    pub settings: UserManagerSettings,
    /// Ignore callback parameters on the current page (another OAuth flow owns them).
    pub skip_signin_callback: bool,
    pub on_signin_callback: Option<SigninCallbackHook>,
    pub on_remove_user: Option<RemoveUserHook>,
    /// Builds the client. `None` leaves the provider without one.
    pub implementation: Option<UserManagerFactory>,
}

impl AuthProviderOptions {
    #[must_use]
    pub fn new(settings: UserManagerSettings) -> Self {
        Self {
            settings,
            skip_signin_callback: false,
            on_signin_callback: None,
            on_remove_user: None,
            implementation: None,
        }
    }

    /// Parse settings from JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed or incomplete settings.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(raw)?))
    }

    #[must_use]
    pub fn with_implementation(
        mut self,
        factory: impl Fn(UserManagerSettings) -> Arc<dyn UserManager> + Send + Sync + 'static,
    ) -> Self {
        self.implementation = Some(Arc::new(factory));
        self
    }

    #[must_use]
    pub fn skip_signin_callback(mut self, skip: bool) -> Self {
        self.skip_signin_callback = skip;
        self
    }

    #[must_use]
    pub fn on_signin_callback(mut self, hook: impl Fn(Option<&User>) + Send + Sync + 'static) -> Self {
        self.on_signin_callback = Some(Arc::new(hook));
        self
    }

    #[must_use]
    pub fn on_remove_user(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_remove_user = Some(Arc::new(hook));
        self
    }

    /// Build the client, if a factory is configured.
    pub(crate) fn build_client(&self) -> Option<Arc<dyn UserManager>> {
        self.implementation
            .as_ref()
            .map(|factory| factory(self.settings.clone()))
    }

    pub(crate) fn bootstrap_options(&self) -> BootstrapOptions {
        BootstrapOptions {
            skip_signin_callback: self.skip_signin_callback,
            on_signin_callback: self.on_signin_callback.clone(),
        }
    }
}

impl std::fmt::Debug for AuthProviderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthProviderOptions")
            .field("settings", &self.settings)
            .field("skip_signin_callback", &self.skip_signin_callback)
            .field("on_signin_callback", &self.on_signin_callback.is_some())
            .field("on_remove_user", &self.on_remove_user.is_some())
            .field("implementation", &self.implementation.is_some())
            .finish()
    }
}
