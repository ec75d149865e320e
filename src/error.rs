//! Error type shared by the session store, bindings, and accessor.
//!
//! ERROR HANDLING
//! ==============
//! Configuration errors (`MissingProvider`, `UnsupportedEnvironment`) are
//! returned straight to the caller. Bootstrap and silent-renew failures are
//! folded into session state instead, so the enum is `Clone + PartialEq` and
//! can live inside a signal.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use std::sync::Arc;

use crate::manager::Operation;

/// Errors surfaced by the OIDC session layer.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OidcError {
    /// `use_auth()` was called where no `<AuthProvider>` registered its context.
    #[error(
        "AuthProvider context is undefined, please verify you are calling use_auth() as child of a <AuthProvider> component."
    )]
    MissingProvider,
    /// The operation is not available for the configured client or environment.
    #[error(
        "UserManager#{} was called from an unsupported context. If this is a server-rendered page, defer this call with an Effect or pass a custom UserManager implementation.",
        .operation.name()
    )]
    UnsupportedEnvironment {
        /// The operation that was invoked.
        operation: Operation,
    },
    /// Completing the redirect callback or loading the session failed during bootstrap.
    #[error("login failed: {0}")]
    Login(#[source] Arc<OidcError>),
    /// Failure reported by the external client.
    #[error("{0}")]
    Client(String),
    /// Background silent renew failed.
    #[error("silent renew failed: {0}")]
    SilentRenew(String),
    /// A persisted user record could not be parsed.
    #[error("invalid stored user: {0}")]
    Storage(String),
}

impl OidcError {
    /// Build an [`OidcError::UnsupportedEnvironment`] for `operation`.
    #[must_use]
    pub fn unsupported(operation: Operation) -> Self {
        Self::UnsupportedEnvironment { operation }
    }

    /// Wrap a bootstrap failure, leaving already-wrapped errors alone.
    #[must_use]
    pub fn login(source: OidcError) -> Self {
        match source {
            Self::Login(_) => source,
            other => Self::Login(Arc::new(other)),
        }
    }
}

impl From<serde_json::Error> for OidcError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
