//! Mirror of the auth collaborator's current user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The collaborator owns authentication; the mirror never originates a
//! change. On construction it seeds a store from `model()`, then on every
//! `on_change` callback it re-reads `model()` and overwrites the store.
//! Duplicate callbacks simply rewrite the same value.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::rc::{Rc, Weak};

use crate::auth::{AuthCollaborator, ListenerId};
use crate::config::SessionConfig;
use crate::net::types::User;
use crate::store::{Readable, Writable};

/// The two states a mirrored session can be in.
#[derive(Clone, Debug, PartialEq)]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated(User),
}

impl From<Option<User>> for SessionStatus {
    fn from(user: Option<User>) -> Self {
        user.map_or(Self::Unauthenticated, Self::Authenticated)
    }
}

/// Observable copy of the current user.
pub struct SessionMirror {
    current_user: Writable<Option<User>>,
    listener: ListenerId,
}

impl SessionMirror {
    /// Seed from `collaborator` and follow its change notifications.
    pub fn new<C>(collaborator: &Rc<C>) -> Self
    where
        C: AuthCollaborator + 'static,
    {
        Self::with_config(collaborator, &SessionConfig::default())
    }

    pub fn with_config<C>(collaborator: &Rc<C>, config: &SessionConfig) -> Self
    where
        C: AuthCollaborator + 'static,
    {
        let current_user = Writable::new(collaborator.model());

        // Weak so the collaborator's listener list does not keep itself alive.
        let source: Weak<C> = Rc::downgrade(collaborator);
        let sink = current_user.clone();
        let log_transitions = config.log_transitions;
        let listener = collaborator.on_change(Box::new(move || {
            let Some(source) = source.upgrade() else {
                return;
            };
            let model = source.model();
            if log_transitions {
                match &model {
                    Some(user) => leptos::logging::log!("session: authenticated as {}", user.id),
                    None => leptos::logging::log!("session: unauthenticated"),
                }
            }
            sink.set(model);
        }));

        Self { current_user, listener }
    }

    /// The mirrored value. Consumers can read and subscribe but not write.
    pub fn current_user(&self) -> Readable<Option<User>> {
        self.current_user.readable()
    }

    pub fn status(&self) -> SessionStatus {
        self.current_user.get().into()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.with(Option::is_some)
    }

    /// Listener id registered with the collaborator.
    pub fn listener_id(&self) -> ListenerId {
        self.listener
    }
}
