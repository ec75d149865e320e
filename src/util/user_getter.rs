//! Persisted-user lookup for code running outside an `<AuthProvider>`.
//!
//! The browser client stores the signed-in user under
//! `oidc.user:{authority}:{client_id}`, in session storage unless configured
//! otherwise. Reading it directly lets e.g. an HTTP interceptor attach the
//! access token without access to the component tree.
//!
//! TRADE-OFFS
//! ==========
//! The storage choice must match the client's own configuration; a mismatch
//! simply reads nothing. Off the browser the getter always returns `None`.

#[cfg(test)]
#[path = "user_getter_test.rs"]
mod user_getter_test;

use crate::manager::User;

/// Which `window` storage area the client persists users in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageKind {
    #[default]
    Session,
    Local,
}

/// Storage key the browser client uses for a given authority/client pair.
#[must_use]
pub fn user_storage_key(authority: &str, client_id: &str) -> String {
    format!("oidc.user:{authority}:{client_id}")
}

/// Parse a raw storage value, treating absent or malformed entries as no user.
pub(crate) fn parse_stored_user(raw: Option<&str>) -> Option<User> {
    let raw = raw?;
    match User::from_storage_string(raw) {
        Ok(user) => Some(user),
        Err(e) => {
            leptos::logging::warn!("ignoring stored user: {e}");
            None
        }
    }
}

/// Build a getter that reads the persisted user on every call.
pub fn user_getter(
    authority: &str,
    client_id: &str,
    storage: StorageKind,
) -> impl Fn() -> Option<User> + Send + Sync + 'static {
    let key = user_storage_key(authority, client_id);
    move || parse_stored_user(read_storage_item(storage, &key).as_deref())
}

fn read_storage_item(storage: StorageKind, key: &str) -> Option<String> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window()?;
        let area = match storage {
            StorageKind::Session => window.session_storage(),
            StorageKind::Local => window.local_storage(),
        };
        area.ok().flatten()?.get_item(key).ok().flatten()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (storage, key);
        None
    }
}
