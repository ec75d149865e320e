//! Reactive session state.
//!
//! DESIGN
//! ======
//! One `SessionStore` per provider activation, never a process-wide global,
//! so independent providers (and tests) do not share state.

pub mod session;
