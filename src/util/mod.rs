//! Browser-environment helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate `window` access (location, storage, clock) from
//! the session bindings so the bindings stay testable off the browser.

pub mod clock;
pub mod location;
pub mod user_getter;
