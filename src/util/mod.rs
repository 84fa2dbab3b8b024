//! Leptos integration helpers.

pub mod auth;
pub mod context;
