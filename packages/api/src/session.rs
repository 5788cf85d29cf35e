//! # Session context
//!
//! [`SessionContext`] is the process-wide record of who is signed in. It is
//! created once at startup, restores any session a previous run left in the
//! [`SessionStore`], and is passed explicitly to [`crate::ApiClient`] and to
//! the view controllers.
//!
//! Only two writers exist: the login flow ([`SessionContext::login`]) and the
//! HTTP client's 401 path ([`SessionContext::logout`]). Everything else reads,
//! or [`subscribe`](SessionContext::subscribe)s to be told when the session
//! changes; the web shell's coordinator uses that feed to redirect to `/login`.

use std::sync::Arc;

use store::{SessionStore, StoredSession, User};
use tokio::sync::watch;

#[derive(Clone)]
pub struct SessionContext {
    state: Arc<watch::Sender<Option<StoredSession>>>,
    storage: Arc<dyn SessionStore + Send + Sync>,
}

impl SessionContext {
    /// Create the context, restoring a previously persisted session if any.
    /// The restored token is not validated; an expired one surfaces as a 401
    /// on first use.
    pub fn restore<S>(storage: S) -> Self
    where
        S: SessionStore + Send + Sync + 'static,
    {
        let restored = storage.load();
        if let Some(session) = &restored {
            tracing::debug!(user = %session.user.email, "restored session");
        }
        Self {
            state: Arc::new(watch::Sender::new(restored)),
            storage: Arc::new(storage),
        }
    }

    /// Record a successful authentication and persist it.
    pub fn login(&self, access_token: impl Into<String>, user: User) {
        let session = StoredSession::new(access_token, user);
        if let Err(e) = self.storage.save(&session) {
            tracing::warn!("failed to persist session: {e}");
        }
        tracing::info!(user = %session.user.email, "signed in");
        self.state.send_replace(Some(session));
    }

    /// Forget the session, in memory and in durable storage.
    pub fn logout(&self) {
        if let Err(e) = self.storage.clear() {
            tracing::warn!("failed to clear persisted session: {e}");
        }
        if self.state.send_replace(None).is_some() {
            tracing::info!("signed out");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_some()
    }

    pub fn current(&self) -> Option<StoredSession> {
        self.state.borrow().clone()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().as_ref().map(|s| s.user.clone())
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().as_ref().map(|s| s.access_token.clone())
    }

    /// A receiver that wakes on every login and logout.
    pub fn subscribe(&self) -> watch::Receiver<Option<StoredSession>> {
        self.state.subscribe()
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("user", &self.user())
            .finish_non_exhaustive()
    }
}

impl PartialEq for SessionContext {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::MemoryStore;

    fn user() -> User {
        User {
            id: "u-1".into(),
            email: "a@example.com".into(),
        }
    }

    #[test]
    fn test_starts_signed_out_with_empty_storage() {
        let session = SessionContext::restore(MemoryStore::new());
        assert!(!session.is_authenticated());
        assert!(session.current().is_none());
        assert!(session.token().is_none());
    }

    #[test]
    fn test_login_persists_exact_token_and_user() {
        let storage = MemoryStore::new();
        let session = SessionContext::restore(storage.clone());

        session.login("tok-123", user());

        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok-123"));
        assert_eq!(session.user(), Some(user()));
        assert_eq!(storage.load(), Some(StoredSession::new("tok-123", user())));
    }

    #[test]
    fn test_logout_leaves_nothing_in_storage() {
        let storage = MemoryStore::new();
        let session = SessionContext::restore(storage.clone());
        session.login("tok-123", user());

        session.logout();

        assert!(!session.is_authenticated());
        assert!(storage.load().is_none());
    }

    #[test]
    fn test_restore_from_previous_run() {
        let storage = MemoryStore::with_session(StoredSession::new("old-token", user()));
        let session = SessionContext::restore(storage);
        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("old-token"));
    }

    #[tokio::test]
    async fn test_subscribers_see_logout() {
        let session = SessionContext::restore(MemoryStore::with_session(StoredSession::new(
            "tok", user(),
        )));
        let mut rx = session.subscribe();

        session.logout();

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let session = SessionContext::restore(MemoryStore::new());
        let other = session.clone();
        other.login("tok", user());
        assert!(session.is_authenticated());
        assert_eq!(session, other);
    }
}
