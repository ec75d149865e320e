//! Page location snapshot and OIDC callback detection.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bootstrap sequence only completes a sign-in callback when the page
//! was loaded with `code`/`error` + `state` parameters, in either the query
//! string (`response_mode=query`) or the fragment (`response_mode=fragment`).

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

/// The parts of `window.location` the bootstrap needs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageLocation {
    /// Full URL, handed to the client's callback completion.
    pub href: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
}

impl PageLocation {
    /// Split a full URL into `href`/`search`/`hash`.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(idx) => (&href[..idx], &href[idx..]),
            None => (href, ""),
        };
        let search = rest.find('?').map_or("", |idx| &rest[idx..]);
        Self {
            href: href.to_owned(),
            search: search.to_owned(),
            hash: hash.to_owned(),
        }
    }

    /// Read the current browser location. `None` off the browser.
    pub fn current() -> Option<Self> {
        #[cfg(feature = "hydrate")]
        {
            let location = web_sys::window()?.location();
            Some(Self {
                href: location.href().ok()?,
                search: location.search().unwrap_or_default(),
                hash: location.hash().unwrap_or_default(),
            })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            None
        }
    }

    /// True when the query string or fragment carries OIDC callback parameters.
    #[must_use]
    pub fn has_auth_params(&self) -> bool {
        params_indicate_callback(self.search.trim_start_matches('?'))
            || params_indicate_callback(self.hash.trim_start_matches('#'))
    }
}

fn params_indicate_callback(params: &str) -> bool {
    if params.is_empty() {
        return false;
    }
    let mut code = false;
    let mut error = false;
    let mut state = false;
    for (key, value) in url::form_urlencoded::parse(params.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "code" => code = true,
            "error" => error = true,
            "state" => state = true,
            _ => {}
        }
    }
    (code || error) && state
}
