//! Data exchanged with the external OIDC client.
//!
//! DESIGN
//! ======
//! `User` mirrors the record the browser client persists (snake_case JSON),
//! so the stored-user getter can read it without going through the client.
//! Argument structs carry the commonly used request knobs and leave anything
//! exotic to `extra_query_params`.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::OidcError;
use crate::util::clock;

/// Claims of the signed-in principal. `sub` is always present; everything
/// else the provider returned is kept verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub sub: String,
    #[serde(flatten)]
    pub claims: serde_json::Map<String, serde_json::Value>,
}

impl UserProfile {
    /// String claim lookup, e.g. `"email"` or `"name"`.
    #[must_use]
    pub fn claim_str(&self, key: &str) -> Option<&str> {
        self.claims.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Session principal returned by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(default)]
    pub session_state: Option<String>,
    pub access_token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    pub token_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    pub profile: UserProfile,
    /// Access-token expiry in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

impl User {
    /// Seconds until expiry relative to `now`; `None` without `expires_at`.
    #[must_use]
    pub fn expires_in_at(&self, now: i64) -> Option<i64> {
        self.expires_at.map(|at| at.saturating_sub(now))
    }

    /// Seconds until the access token expires.
    #[must_use]
    pub fn expires_in(&self) -> Option<i64> {
        self.expires_in_at(clock::now_secs())
    }

    /// Expiry check against an explicit clock. A user without `expires_at`
    /// never expires.
    #[must_use]
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.expires_in_at(now).is_some_and(|left| left <= 0)
    }

    #[must_use]
    pub fn expired(&self) -> bool {
        self.is_expired_at(clock::now_secs())
    }

    /// Granted scopes, split on whitespace.
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.as_deref().unwrap_or_default().split_whitespace()
    }

    /// Parse the client's persisted representation.
    ///
    /// # Errors
    ///
    /// Returns [`OidcError::Storage`] when the string is not a valid user record.
    pub fn from_storage_string(raw: &str) -> Result<Self, OidcError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize into the client's persisted representation.
    ///
    /// # Errors
    ///
    /// Returns [`OidcError::Storage`] if serialization fails.
    pub fn to_storage_string(&self) -> Result<String, OidcError> {
        Ok(serde_json::to_string(self)?)
    }
}

fn default_response_type() -> String {
    "code".to_owned()
}

fn default_scope() -> String {
    "openid".to_owned()
}

fn default_true() -> bool {
    true
}

/// Settings used to build the client. Loadable from JSON configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserManagerSettings {
    /// URL of the OIDC/OAuth2 provider.
    pub authority: String,
    /// Client identifier registered with the provider.
    pub client_id: String,
    pub redirect_uri: String,
    #[serde(default)]
    pub post_logout_redirect_uri: Option<String>,
    #[serde(default)]
    pub silent_redirect_uri: Option<String>,
    #[serde(default = "default_response_type")]
    pub response_type: String,
    #[serde(default = "default_scope")]
    pub scope: String,
    #[serde(default = "default_true")]
    pub automatic_silent_renew: bool,
    #[serde(default)]
    pub extra_query_params: BTreeMap<String, String>,
}

impl UserManagerSettings {
    #[must_use]
    pub fn new(
        authority: impl Into<String>,
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            authority: authority.into(),
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            post_logout_redirect_uri: None,
            silent_redirect_uri: None,
            response_type: default_response_type(),
            scope: default_scope(),
            automatic_silent_renew: true,
            extra_query_params: BTreeMap::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninRedirectArgs {
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    pub prompt: Option<String>,
    pub login_hint: Option<String>,
    pub state: Option<serde_json::Value>,
    #[serde(default)]
    pub extra_query_params: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninPopupArgs {
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    pub prompt: Option<String>,
    pub login_hint: Option<String>,
    /// `window.open` feature string for the popup.
    pub popup_window_features: Option<String>,
    pub popup_window_target: Option<String>,
    #[serde(default)]
    pub extra_query_params: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SigninSilentArgs {
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    pub silent_request_timeout_in_seconds: Option<u32>,
    #[serde(default)]
    pub extra_query_params: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignoutRedirectArgs {
    pub id_token_hint: Option<String>,
    pub post_logout_redirect_uri: Option<String>,
    pub state: Option<serde_json::Value>,
    #[serde(default)]
    pub extra_query_params: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignoutPopupArgs {
    pub id_token_hint: Option<String>,
    pub post_logout_redirect_uri: Option<String>,
    pub popup_window_features: Option<String>,
    pub popup_window_target: Option<String>,
    #[serde(default)]
    pub extra_query_params: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySessionStatusArgs {
    pub redirect_uri: Option<String>,
    pub scope: Option<String>,
    #[serde(default)]
    pub extra_query_params: BTreeMap<String, String>,
}

/// Result of a `prompt=none` session check.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub session_state: String,
    pub sub: Option<String>,
}

/// Token kinds accepted by `revoke_tokens`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevokeTokenType {
    AccessToken,
    RefreshToken,
}
