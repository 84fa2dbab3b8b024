//! Leptos context for the mirrored session.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the current user from a signal provided once at the app
//! root, instead of reaching for a global. The signal is fed by a store
//! subscription on the [`SessionMirror`], so it follows the auth
//! collaborator exactly as the mirror does.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use leptos::prelude::*;

use crate::net::types::User;
use crate::state::session::{SessionMirror, SessionStatus};
use crate::store::Subscription;

/// Context handle carrying the current-user signal.
#[derive(Clone, Copy, Debug)]
pub struct SessionContext {
    pub user: RwSignal<Option<User>>,
}

impl SessionContext {
    /// Build a signal that tracks `mirror` until the current owner is
    /// cleaned up, at which point the store subscription is removed.
    pub fn from_mirror(mirror: &SessionMirror) -> Self {
        let user = RwSignal::new(mirror.current_user().get());
        let subscription = mirror.current_user().subscribe(move |current: &Option<User>| {
            let _ = user.try_set(current.clone());
        });

        // `Subscription` is !Send; park it in the owner's local arena.
        let subscription = StoredValue::new_local(subscription);
        on_cleanup(move || {
            let _ = subscription.try_with_value(Subscription::unsubscribe);
        });

        Self { user }
    }

    pub fn status(&self) -> SessionStatus {
        self.user.get_untracked().into()
    }
}

/// Provide the session to every descendant component.
pub fn provide_session_context(mirror: &SessionMirror) -> SessionContext {
    let ctx = SessionContext::from_mirror(mirror);
    provide_context(ctx);
    ctx
}

/// Fetch the session provided by [`provide_session_context`].
///
/// # Panics
///
/// Panics when called outside a tree that provided the session.
pub fn use_session() -> SessionContext {
    expect_context::<SessionContext>()
}

/// The current user signal, when a session has been provided.
pub fn use_current_user() -> Option<RwSignal<Option<User>>> {
    use_context::<SessionContext>().map(|ctx| ctx.user)
}
