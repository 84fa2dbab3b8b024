//! Session configuration.
//!
//! Values come from `Default`, optionally overridden by environment
//! variables (native builds) or the `with_*` setters.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// `localStorage` key the auth store persists under unless overridden.
pub const DEFAULT_STORAGE_KEY: &str = "pocketbase_auth";

/// Environment variable overriding [`SessionConfig::storage_key`].
pub const STORAGE_KEY_VAR: &str = "SESSION_STORAGE_KEY";

/// Environment variable enabling [`SessionConfig::log_transitions`].
pub const LOG_TRANSITIONS_VAR: &str = "SESSION_LOG_TRANSITIONS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Browser storage key for the persisted auth snapshot.
    pub storage_key: String,
    /// Log every mirrored session transition. Off unless asked for.
    pub log_transitions: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { storage_key: DEFAULT_STORAGE_KEY.to_owned(), log_transitions: false }
    }
}

impl SessionConfig {
    /// Defaults with `SESSION_STORAGE_KEY` (when non-empty) and
    /// `SESSION_LOG_TRANSITIONS` (`1`/`true`/`yes`) applied.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(key) = lookup(STORAGE_KEY_VAR).filter(|k| !k.trim().is_empty()) {
            config.storage_key = key.trim().to_owned();
        }
        if let Some(flag) = lookup(LOG_TRANSITIONS_VAR) {
            config.log_transitions = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes");
        }
        config
    }

    #[must_use]
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    #[must_use]
    pub fn with_log_transitions(mut self, enabled: bool) -> Self {
        self.log_transitions = enabled;
        self
    }
}
