//! # Filesystem-backed session store
//!
//! [`FileStore`] persists the session as JSON on native platforms so a restart
//! keeps the user signed in.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── session.json        # {"access_token": "...", "token_type": "bearer", "user": {...}}
//! ```
//!
//! Use `dirs::data_dir()` to obtain a platform-appropriate base, e.g.
//! `~/.local/share/notes/` on Linux.

use std::path::PathBuf;

use crate::session::{SessionStore, StoreError, StoredSession};

const SESSION_FILE: &str = "session.json";

#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    fn session_path(&self) -> PathBuf {
        self.base.join(SESSION_FILE)
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Option<StoredSession> {
        let content = std::fs::read_to_string(self.session_path()).ok()?;
        serde_json::from_str(&content).ok()
    }

    fn save(&self, session: &StoredSession) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base)?;
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(self.session_path(), json)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(self.session_path()) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("notes_{name}_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_file_store_roundtrip() {
        let dir = temp_dir("file_store_roundtrip");
        let session = StoredSession::new(
            "tok-file",
            User {
                id: "u-9".into(),
                email: "file@example.com".into(),
            },
        );

        FileStore::new(dir.clone()).save(&session).unwrap();

        // Re-open from same directory
        let reopened = FileStore::new(dir.clone());
        assert_eq!(reopened.load(), Some(session));

        reopened.clear().unwrap();
        assert!(reopened.load().is_none());
        assert!(!dir.join(SESSION_FILE).exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_corrupt_file_reads_as_no_session() {
        let dir = temp_dir("file_store_corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(SESSION_FILE), "{not json").unwrap();

        let store = FileStore::new(dir.clone());
        assert!(store.load().is_none());
        store.clear().unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
