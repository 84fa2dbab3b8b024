//! The auth collaborator seam.
//!
//! The session mirror never talks to a backend. It depends only on
//! [`AuthCollaborator`]: something that can report the current user model and
//! announce when it changes. [`AuthStore`] is the implementation shipped with
//! the crate.

mod storage;
mod store;

pub use store::{AuthSnapshot, AuthStore, AuthStoreError};

use crate::net::types::User;

/// Identifies a listener registered with [`AuthCollaborator::on_change`].
pub type ListenerId = u64;

/// Owner of authentication state.
///
/// Implementors must call every registered callback after each state
/// transition, once the new model is visible through [`model`](Self::model).
/// Extra calls are tolerated by consumers.
pub trait AuthCollaborator {
    /// Snapshot of the current user model, `None` when signed out.
    fn model(&self) -> Option<User>;

    /// Register a callback invoked on every auth state transition.
    fn on_change(&self, callback: Box<dyn Fn()>) -> ListenerId;

    /// Remove a callback. Returns `false` if `id` was not registered.
    fn remove_listener(&self, id: ListenerId) -> bool;
}
