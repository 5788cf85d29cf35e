//! # Browser `localStorage` session store
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the **web platform**.
//! The token and the user are kept under two keys so other tabs and dev tools
//! see plain values:
//!
//! | Key | Value |
//! |-----|-------|
//! | [`TOKEN_KEY`] (`"token"`) | the raw access token |
//! | [`USER_KEY`] (`"user"`) | the [`User`](crate::User) as JSON |
//!
//! `LocalStorageStore` is a zero-size struct that looks up
//! `window.localStorage` on every operation; `web_sys::Storage` is not `Send`
//! and the lookup is cheap.

use crate::models::User;
use crate::session::{SessionStore, StoreError, StoredSession, TOKEN_KEY, USER_KEY};

#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|_| StoreError::Unavailable("localStorage access denied".to_string()))?
            .ok_or_else(|| StoreError::Unavailable("localStorage missing".to_string()))
    }
}

impl SessionStore for LocalStorageStore {
    fn load(&self) -> Option<StoredSession> {
        let storage = Self::storage().ok()?;
        let token = storage.get_item(TOKEN_KEY).ok()??;
        let user_json = storage.get_item(USER_KEY).ok()??;
        let user: User = serde_json::from_str(&user_json).ok()?;
        Some(StoredSession::new(token, user))
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        let user_json = serde_json::to_string(&session.user)?;
        storage
            .set_item(TOKEN_KEY, &session.access_token)
            .map_err(|_| StoreError::Unavailable("localStorage write failed".to_string()))?;
        storage
            .set_item(USER_KEY, &user_json)
            .map_err(|_| StoreError::Unavailable("localStorage write failed".to_string()))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        for key in [TOKEN_KEY, USER_KEY] {
            storage
                .remove_item(key)
                .map_err(|_| StoreError::Unavailable("localStorage remove failed".to_string()))?;
        }
        Ok(())
    }
}
