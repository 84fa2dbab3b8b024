//! Wire-level types shared with the auth backend.

pub mod types;
