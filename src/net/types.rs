//! User record DTO as returned by the auth backend.
//!
//! DESIGN
//! ======
//! The session layer treats the user as opaque. Only the fields the UI
//! commonly renders are typed; everything else the backend sends is kept in
//! `extra` so a round-trip through a snapshot loses nothing.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// An authenticated principal.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique record identifier.
    pub id: String,
    /// Login handle.
    #[serde(default)]
    pub username: String,
    /// Email address, when the backend exposes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Avatar file name or URL, if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Whether the account's email has been verified.
    #[serde(default)]
    pub verified: bool,
    /// Auth collection the record belongs to (e.g. `"users"`).
    #[serde(default, rename = "collectionName", skip_serializing_if = "Option::is_none")]
    pub collection_name: Option<String>,
    /// Any other record fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// A user carrying only an id.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Name to show in the UI: display name, then username, then id.
    pub fn display_name(&self) -> &str {
        if !self.name.is_empty() {
            &self.name
        } else if !self.username.is_empty() {
            &self.username
        } else {
            &self.id
        }
    }
}
