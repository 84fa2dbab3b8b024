//! In-memory auth store.
//!
//! Holds the session token and user model, and fires change listeners on
//! every `save`, `clear`, or snapshot load. A store built with
//! [`AuthStore::local`] also mirrors itself into browser `localStorage`.
//!
//! The store does not validate credentials or inspect the token; a session
//! counts as authenticated whenever a non-empty token and a model are both
//! present.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use super::{AuthCollaborator, ListenerId, storage};
use crate::config::SessionConfig;
use crate::net::types::User;

#[derive(Debug, thiserror::Error)]
pub enum AuthStoreError {
    #[error("malformed auth snapshot: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode auth snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("browser storage unavailable: {0}")]
    Storage(String),
}

/// Serialized form of the store's state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSnapshot {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub model: Option<User>,
}

type Listener = Rc<dyn Fn()>;

pub struct AuthStore {
    config: SessionConfig,
    persistent: bool,
    token: RefCell<String>,
    model: RefCell<Option<User>>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<ListenerId>,
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::with_config(SessionConfig::default())
    }
}

impl AuthStore {
    /// Empty, signed-out, memory-only store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty memory-only store using `config`.
    pub fn with_config(config: SessionConfig) -> Self {
        Self {
            config,
            persistent: false,
            token: RefCell::new(String::new()),
            model: RefCell::new(None),
            listeners: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Store backed by `localStorage` under `config.storage_key`.
    ///
    /// Any snapshot already stored there is loaded. An unreadable or
    /// malformed snapshot is logged and the store starts signed out.
    pub fn local(config: SessionConfig) -> Rc<Self> {
        let mut store = Self::with_config(config);
        store.persistent = true;
        if let Err(e) = store.restore() {
            leptos::logging::warn!("auth store restore failed: {e}");
        }
        Rc::new(store)
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn token(&self) -> String {
        self.token.borrow().clone()
    }

    pub fn model(&self) -> Option<User> {
        self.model.borrow().clone()
    }

    /// Whether a non-empty token and a model are both present.
    pub fn is_authenticated(&self) -> bool {
        !self.token.borrow().is_empty() && self.model.borrow().is_some()
    }

    /// Replace the session with `token` and `model`, then notify listeners.
    pub fn save(&self, token: impl Into<String>, model: Option<User>) {
        self.replace(token.into(), model, true);
    }

    /// Sign out: drop token and model, then notify listeners.
    pub fn clear(&self) {
        self.replace(String::new(), None, true);
    }

    pub fn snapshot(&self) -> AuthSnapshot {
        AuthSnapshot { token: self.token(), model: self.model() }
    }

    /// JSON encoding of [`AuthStore::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`AuthStoreError::Encode`] if the model cannot be serialized.
    pub fn export_snapshot(&self) -> Result<String, AuthStoreError> {
        serde_json::to_string(&self.snapshot()).map_err(AuthStoreError::Encode)
    }

    /// Replace the session with a JSON snapshot, then notify listeners.
    /// Local stores also write the loaded snapshot to storage.
    ///
    /// # Errors
    ///
    /// Returns [`AuthStoreError::Decode`] for malformed JSON; the store is
    /// left unchanged and no listener fires.
    pub fn load_snapshot(&self, json: &str) -> Result<(), AuthStoreError> {
        self.load(json, true)
    }

    /// Load the snapshot persisted under the configured key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`AuthStoreError::Storage`] when storage cannot be read, or
    /// [`AuthStoreError::Decode`] for a malformed stored snapshot.
    pub fn restore(&self) -> Result<(), AuthStoreError> {
        match storage::read(&self.config.storage_key)? {
            Some(json) => self.load(&json, false),
            None => Ok(()),
        }
    }

    /// Write the current session to storage, or remove it when signed out.
    ///
    /// # Errors
    ///
    /// Returns [`AuthStoreError::Storage`] or [`AuthStoreError::Encode`].
    pub fn persist(&self) -> Result<(), AuthStoreError> {
        if self.token.borrow().is_empty() && self.model.borrow().is_none() {
            storage::remove(&self.config.storage_key)
        } else {
            storage::write(&self.config.storage_key, &self.export_snapshot()?)
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    fn load(&self, json: &str, persist: bool) -> Result<(), AuthStoreError> {
        let snapshot: AuthSnapshot = serde_json::from_str(json).map_err(AuthStoreError::Decode)?;
        self.replace(snapshot.token, snapshot.model, persist);
        Ok(())
    }

    fn replace(&self, token: String, model: Option<User>, persist: bool) {
        *self.token.borrow_mut() = token;
        *self.model.borrow_mut() = model;

        if persist && self.persistent {
            if let Err(e) = self.persist() {
                leptos::logging::warn!("auth store persist failed: {e}");
            }
        }

        self.fire();
    }

    fn fire(&self) {
        let pass: Vec<(ListenerId, Listener)> =
            self.listeners.borrow().iter().map(|(id, l)| (*id, Rc::clone(l))).collect();
        for (id, listener) in pass {
            let registered = self.listeners.borrow().iter().any(|(lid, _)| *lid == id);
            if registered {
                listener();
            }
        }
    }
}

impl AuthCollaborator for AuthStore {
    fn model(&self) -> Option<User> {
        AuthStore::model(self)
    }

    fn on_change(&self, callback: Box<dyn Fn()>) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().push((id, Rc::from(callback)));
        id
    }

    fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(lid, _)| *lid != id);
        listeners.len() != before
    }
}
