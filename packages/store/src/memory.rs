use std::sync::{Arc, Mutex};

use crate::session::{SessionStore, StoreError, StoredSession};

/// In-memory SessionStore for testing and as a fallback when no durable
/// storage is available. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    slot: Arc<Mutex<Option<StoredSession>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `session`, as if a previous run had saved it.
    pub fn with_session(session: StoredSession) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(session))),
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<StoredSession>>, StoreError> {
        self.slot
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<StoredSession> {
        self.lock().ok()?.clone()
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        *self.lock()? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.lock()? = None;
        Ok(())
    }
}
