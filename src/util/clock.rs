//! Wall-clock access for token expiry checks.
//!
//! `std::time::SystemTime::now` panics on `wasm32-unknown-unknown`, so the
//! browser build reads `Date.now()` instead.

/// Current time in whole seconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation)]
pub fn now_secs() -> i64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0).floor() as i64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
    }
}
