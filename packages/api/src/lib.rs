//! # API crate: typed client for the notes service
//!
//! Everything the frontends need to talk to the remote REST API: an HTTP
//! adapter that attaches the session's bearer token and classifies failures,
//! the session context itself, and one method per remote capability.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: base URL, bearer token, 401 handling, JSON decoding |
//! | [`transport`] | [`Transport`] trait and the `reqwest` implementation |
//! | [`session`] | [`SessionContext`]: login/logout/current plus a change feed |
//! | [`error`] | [`ApiError`] taxonomy and user-facing messages |
//! | `auth`, `notes`, `upload` | the facade methods on [`ApiClient`] |
//!
//! ## Calls
//!
//! | Method | Request |
//! |--------|---------|
//! | `register` / `login` | `POST /auth/register`, `POST /auth/login` |
//! | `confirm_email` | `GET /auth/confirm?token_hash=&type=` |
//! | `list_notes` / `get_note` | `GET /notes`, `GET /notes/{id}` |
//! | `create_note` / `update_note` / `delete_note` | `POST /notes`, `PUT /notes/{id}`, `DELETE /notes/{id}` |
//! | `summarize_note` | `POST /notes/{id}/summarize` |
//! | `upload_image` | `POST /upload/image` (multipart) |
//! | `health` | `GET /health` |

use serde::Deserialize;

mod auth;
pub mod client;
pub mod error;
mod notes;
pub mod session;
pub mod transport;
mod upload;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

#[cfg(all(test, not(target_arch = "wasm32")))]
mod local_server;

pub use auth::{AuthOutcome, AuthSession};
pub use client::ApiClient;
pub use error::{ApiError, GENERIC_ERROR};
pub use session::SessionContext;
pub use transport::{ReqwestTransport, Transport};
pub use upload::{guess_image_type, validate_image, ALLOWED_IMAGE_TYPES, MAX_IMAGE_BYTES};

pub use store::{Note, NoteDraft, NoteUpdate, StoredSession, UploadedImage, User};

/// Client used by the frontends.
pub type WebClient = ApiClient<ReqwestTransport>;

#[derive(Debug, Clone, Deserialize)]
struct Health {
    status: String,
}

impl<T: Transport> ApiClient<T> {
    /// `GET /health`: whether the service is reachable and reports healthy.
    pub async fn health(&self) -> bool {
        match self.get::<Health>("/health").await {
            Ok(health) => health.status == "healthy",
            Err(e) => {
                tracing::debug!("health check failed: {e}");
                false
            }
        }
    }
}
