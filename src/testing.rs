//! Scriptable `UserManager` double shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures::channel::oneshot;

use crate::components::auth_provider::OidcSession;
use crate::config::AuthProviderOptions;
use crate::error::OidcError;
use crate::manager::{
    Operation, QuerySessionStatusArgs, RevokeTokenType, SessionStatus, SigninPopupArgs, SigninRedirectArgs,
    SigninSilentArgs, SignoutPopupArgs, SignoutRedirectArgs, User, UserManager, UserManagerEvents,
    UserManagerSettings, UserProfile,
};
use crate::util::clock;

pub(crate) fn settings() -> UserManagerSettings {
    UserManagerSettings::new("https://id.example.com", "web-app", "https://app.example.com/callback")
}

pub(crate) fn user(sub: &str) -> User {
    User {
        id_token: Some(format!("id-{sub}")),
        session_state: None,
        access_token: format!("at-{sub}"),
        refresh_token: None,
        token_type: "Bearer".to_owned(),
        scope: Some("openid profile".to_owned()),
        profile: UserProfile {
            sub: sub.to_owned(),
            claims: serde_json::Map::new(),
        },
        expires_at: Some(clock::now_secs() + 3600),
    }
}

pub(crate) fn expired_user(sub: &str) -> User {
    User {
        expires_at: Some(clock::now_secs() - 60),
        ..user(sub)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) struct FakeUserManager {
    settings: UserManagerSettings,
    events: UserManagerEvents,
    unsupported: HashSet<Operation>,
    stored_user: Mutex<Option<User>>,
    callback_user: Mutex<Option<User>>,
    failures: Mutex<HashMap<Operation, OidcError>>,
    gates: Mutex<HashMap<Operation, oneshot::Receiver<()>>>,
    calls: Mutex<Vec<Operation>>,
}

impl FakeUserManager {
    pub(crate) fn new() -> Self {
        Self {
            settings: settings(),
            events: UserManagerEvents::new(),
            unsupported: HashSet::new(),
            stored_user: Mutex::new(None),
            callback_user: Mutex::new(None),
            failures: Mutex::new(HashMap::new()),
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_stored_user(self, user: User) -> Self {
        *lock(&self.stored_user) = Some(user);
        self
    }

    pub(crate) fn with_callback_user(self, user: User) -> Self {
        *lock(&self.callback_user) = Some(user);
        self
    }

    pub(crate) fn without(mut self, operation: Operation) -> Self {
        self.unsupported.insert(operation);
        self
    }

    pub(crate) fn failing(self, operation: Operation, error: OidcError) -> Self {
        lock(&self.failures).insert(operation, error);
        self
    }

    /// Make the next call to `operation` wait until the returned sender fires.
    pub(crate) fn gate(&self, operation: Operation) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        lock(&self.gates).insert(operation, rx);
        tx
    }

    pub(crate) fn calls(&self) -> Vec<Operation> {
        lock(&self.calls).clone()
    }

    pub(crate) fn called(&self, operation: Operation) -> bool {
        self.calls().contains(&operation)
    }

    pub(crate) fn events_handle(&self) -> &UserManagerEvents {
        &self.events
    }

    fn record(&self, operation: Operation) {
        lock(&self.calls).push(operation);
    }

    async fn step(&self, operation: Operation) -> Result<(), OidcError> {
        self.record(operation);
        let gate = lock(&self.gates).remove(&operation);
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        match lock(&self.failures).get(&operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    fn stored(&self) -> Option<User> {
        lock(&self.stored_user).clone()
    }
}

#[async_trait(?Send)]
impl UserManager for FakeUserManager {
    fn settings(&self) -> &UserManagerSettings {
        &self.settings
    }

    fn events(&self) -> &UserManagerEvents {
        &self.events
    }

    fn supports(&self, operation: Operation) -> bool {
        !self.unsupported.contains(&operation)
    }

    async fn signin_redirect(&self, _args: SigninRedirectArgs) -> Result<(), OidcError> {
        self.step(Operation::SigninRedirect).await
    }

    async fn signin_popup(&self, _args: SigninPopupArgs) -> Result<User, OidcError> {
        self.step(Operation::SigninPopup).await?;
        let signed_in = self.stored().unwrap_or_else(|| user("popup"));
        self.events.load(&signed_in);
        Ok(signed_in)
    }

    async fn signin_silent(&self, _args: SigninSilentArgs) -> Result<Option<User>, OidcError> {
        self.step(Operation::SigninSilent).await?;
        Ok(self.stored())
    }

    async fn signout_redirect(&self, _args: SignoutRedirectArgs) -> Result<(), OidcError> {
        self.step(Operation::SignoutRedirect).await
    }

    async fn signout_popup(&self, _args: SignoutPopupArgs) -> Result<(), OidcError> {
        self.step(Operation::SignoutPopup).await
    }

    async fn get_user(&self) -> Result<Option<User>, OidcError> {
        self.step(Operation::GetUser).await?;
        Ok(self.stored())
    }

    async fn remove_user(&self) -> Result<(), OidcError> {
        self.step(Operation::RemoveUser).await?;
        *lock(&self.stored_user) = None;
        self.events.unload();
        Ok(())
    }

    async fn signin_callback(&self, _url: &str) -> Result<Option<User>, OidcError> {
        self.step(Operation::SigninCallback).await?;
        let signed_in = lock(&self.callback_user).clone();
        *lock(&self.stored_user) = signed_in.clone();
        Ok(signed_in)
    }

    async fn clear_stale_state(&self) -> Result<(), OidcError> {
        self.step(Operation::ClearStaleState).await
    }

    async fn query_session_status(
        &self,
        _args: QuerySessionStatusArgs,
    ) -> Result<Option<SessionStatus>, OidcError> {
        self.step(Operation::QuerySessionStatus).await?;
        Ok(self.stored().map(|u| SessionStatus {
            session_state: "active".to_owned(),
            sub: Some(u.profile.sub),
        }))
    }

    async fn revoke_tokens(&self, _types: Option<Vec<RevokeTokenType>>) -> Result<(), OidcError> {
        self.step(Operation::RevokeTokens).await
    }

    fn start_silent_renew(&self) {
        self.record(Operation::StartSilentRenew);
    }

    fn stop_silent_renew(&self) {
        self.record(Operation::StopSilentRenew);
    }
}

/// Options whose factory hands out `fake`.
pub(crate) fn options_with(fake: &Arc<FakeUserManager>) -> AuthProviderOptions {
    let fake = Arc::clone(fake);
    AuthProviderOptions::new(settings()).with_implementation(move |_| -> Arc<dyn UserManager> { fake.clone() })
}

pub(crate) fn session_with(fake: &Arc<FakeUserManager>) -> OidcSession {
    OidcSession::new(options_with(fake))
}
