//! Client-side session state.
//!
//! DESIGN
//! ======
//! State is owned by explicit objects handed to the UI through context,
//! never by module-level singletons, so tests can build as many
//! independent sessions as they need.

pub mod session;
