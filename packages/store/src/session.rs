//! # Durable session storage
//!
//! A signed-in session is the pair (access token, [`User`]). It is written to
//! durable storage on login so a reload can restore it without talking to the
//! server, and removed on logout or when the server rejects the token.
//!
//! [`SessionStore`] is the seam between the session context and the platform:
//!
//! | Implementation | Platform | Medium |
//! |----------------|----------|--------|
//! | [`crate::MemoryStore`] | tests, fallback | process memory |
//! | [`crate::FileStore`] | desktop / native | `<dir>/session.json` |
//! | `LocalStorageStore` | web (`web` feature) | `window.localStorage` |
//!
//! Storage failures never take the UI down: `load` degrades to "no session"
//! and the write paths report a [`StoreError`] the caller may log.

use serde::{Deserialize, Serialize};

use crate::models::User;

/// Key under which the token is stored.
pub const TOKEN_KEY: &str = "token";
/// Key under which the serialized user is stored.
pub const USER_KEY: &str = "user";

/// A persisted session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl StoredSession {
    pub fn new(access_token: impl Into<String>, user: User) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: default_token_type(),
            user,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Durable storage for at most one session.
pub trait SessionStore {
    /// The stored session, or `None` when absent or unreadable.
    fn load(&self) -> Option<StoredSession>;

    fn save(&self, session: &StoredSession) -> Result<(), StoreError>;

    /// Remove every trace of the session. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}
