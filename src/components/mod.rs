//! Leptos components exported by the crate.

pub mod auth_provider;
