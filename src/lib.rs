//! # leptos-oidc-auth
//!
//! OpenID Connect session state for Leptos component trees.
//!
//! `<AuthProvider>` wraps an external OIDC client (anything implementing
//! [`UserManager`]) and exposes its session to descendants through
//! [`use_auth`]: reactive state (`user`, `is_loading`, `is_authenticated`,
//! `active_navigator`, `error`) plus sign-in/sign-out and session methods.
//!
//! The crate does not speak OIDC itself. Token handling, redirects and
//! renew timers belong to the client; this crate keeps reactive state in
//! step with it.
//!
//! ```rust,ignore
//! use leptos::prelude::*;
//! use leptos_oidc_auth::*;
//!
//! #[component]
//! fn App() -> impl IntoView {
//!     let options = AuthProviderOptions::new(UserManagerSettings::new(
//!         "https://id.example.com",
//!         "web-app",
//!         "https://app.example.com/callback",
//!     ))
//!     .with_implementation(|settings| browser_client(settings));
//!
//!     view! { <AuthProvider options><Profile/></AuthProvider> }
//! }
//! ```

pub mod binding;
pub mod components;
pub mod config;
pub mod context;
pub mod error;
pub mod hooks;
pub mod manager;
pub mod state;
pub mod util;

#[cfg(test)]
pub(crate) mod testing;

pub use components::auth_provider::{AuthProvider, OidcSession};
pub use config::AuthProviderOptions;
pub use context::AuthContext;
pub use error::OidcError;
pub use hooks::{Auth, use_auth};
pub use manager::{
    NavigatorMethod, Operation, QuerySessionStatusArgs, RevokeTokenType, SessionStatus, SigninPopupArgs,
    SigninRedirectArgs, SigninSilentArgs, SignoutPopupArgs, SignoutRedirectArgs, SubscriptionId, User,
    UserManager, UserManagerEvents, UserManagerFactory, UserManagerSettings, UserProfile,
};
pub use state::session::{SessionState, SessionStateViews, UserSlot};
pub use util::location::PageLocation;
pub use util::user_getter::{StorageKind, user_getter};
