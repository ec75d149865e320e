//! Glue between the external client and session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! `navigator` wraps sign-in/sign-out calls with in-flight tracking,
//! `events` forwards client notifications, and `bootstrap` resolves the
//! initial session once per provider activation. All three write to the
//! store only through its reducer.

pub mod bootstrap;
pub mod events;
pub mod navigator;
