//! # tictactoe-session
//!
//! Reactive mirror of the authenticated user for the tic-tac-toe frontend.
//!
//! The auth client owns the session; this crate only reflects it. A
//! [`state::session::SessionMirror`] seeds an observable store from the
//! client's current model and overwrites it on every change notification.
//! UI code reads that store directly or through the Leptos signal provided
//! by [`util::context`].

pub mod auth;
pub mod config;
pub mod net;
pub mod state;
pub mod store;
pub mod util;
