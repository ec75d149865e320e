//! `<AuthProvider>` and the session it owns.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each provider activation builds one [`OidcSession`]: a fresh client from
//! the configured factory, a fresh store, the bound context, and a one-shot
//! bootstrap. The provider subscribes the event bridge (released through
//! `on_cleanup`), schedules the bootstrap from an effect so it only runs in
//! the browser, and provides the state views and context to its children.

#[cfg(test)]
#[path = "auth_provider_test.rs"]
mod auth_provider_test;

use std::sync::Arc;

use leptos::prelude::*;

use crate::binding::bootstrap::{Bootstrap, BootstrapOptions};
use crate::binding::events::EventSubscription;
use crate::config::AuthProviderOptions;
use crate::context::AuthContext;
use crate::manager::UserManager;
use crate::state::session::{SessionStateViews, SessionStore};
use crate::util::location::PageLocation;

/// Everything one provider activation owns.
#[derive(Clone)]
pub struct OidcSession {
    client: Option<Arc<dyn UserManager>>,
    store: SessionStore,
    context: AuthContext,
    bootstrap: Bootstrap,
    bootstrap_options: BootstrapOptions,
}

impl OidcSession {
    #[must_use]
    pub fn new(options: AuthProviderOptions) -> Self {
        let client = options.build_client();
        let store = SessionStore::new();
        let bootstrap_options = options.bootstrap_options();
        let bootstrap = Bootstrap::new(client.as_ref());
        let context = AuthContext::new(
            options.settings,
            client.clone(),
            store,
            options.on_remove_user,
        );
        Self {
            client,
            store,
            context,
            bootstrap,
            bootstrap_options,
        }
    }

    #[must_use]
    pub fn client(&self) -> Option<&Arc<dyn UserManager>> {
        self.client.as_ref()
    }

    #[must_use]
    pub fn store(&self) -> SessionStore {
        self.store
    }

    #[must_use]
    pub fn state(&self) -> SessionStateViews {
        self.store.views()
    }

    #[must_use]
    pub fn context(&self) -> AuthContext {
        self.context.clone()
    }

    /// Subscribe the event bridge. `None` without a client.
    #[must_use]
    pub fn attach_events(&self) -> Option<EventSubscription> {
        self.client
            .as_ref()
            .map(|client| EventSubscription::attach(Arc::clone(client), self.store))
    }

    /// Run the bootstrap sequence once. Returns `false` when it had already run.
    ///
    /// Without a client the sequence settles into a login error instead of
    /// leaving the session loading.
    pub async fn bootstrap(&self, location: Option<&PageLocation>) -> bool {
        self.bootstrap
            .run(self.store, &self.bootstrap_options, location)
            .await
    }

    /// Provide the state views and context to the current reactive owner.
    pub fn provide(&self) {
        provide_context(self.state());
        provide_context(self.context());
    }
}

impl std::fmt::Debug for OidcSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OidcSession")
            .field("has_client", &self.client.is_some())
            .field("store", &self.store)
            .field("bootstrap", &self.bootstrap)
            .finish_non_exhaustive()
    }
}

/// Provides the OIDC session to its children; read it with `use_auth()`.
#[component]
pub fn AuthProvider(options: AuthProviderOptions, children: Children) -> impl IntoView {
    let session = OidcSession::new(options);

    if let Some(subscription) = session.attach_events() {
        on_cleanup(move || drop(subscription));
    }

    session.provide();

    let starter = session.clone();
    Effect::new(move || {
        let session = starter.clone();
        leptos::task::spawn_local(async move {
            session.bootstrap(PageLocation::current().as_ref()).await;
        });
    });

    children()
}
