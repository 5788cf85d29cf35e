//! # HTTP client adapter
//!
//! [`ApiClient`] turns `(method, path, body)` into a request against the
//! configured base URL, attaches the bearer token from the [`SessionContext`],
//! and classifies the response:
//!
//! | Response | Result |
//! |----------|--------|
//! | 2xx | body decoded as the requested type |
//! | 401 | session cleared, [`ApiError::Unauthenticated`] |
//! | other | [`ApiError::Server`] with the server's message, if any |
//! | no response | [`ApiError::Transport`] |
//!
//! The client never navigates; whoever owns routing reacts to the session
//! change that a 401 produces.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::session::SessionContext;
use crate::transport::{HttpRequest, HttpResponse, Method, RequestBody, Transport};

#[derive(Clone)]
pub struct ApiClient<T> {
    base_url: String,
    session: SessionContext,
    transport: T,
}

impl<T: Transport> ApiClient<T> {
    /// `base_url` must be absolute (see [`store::ClientConfig::resolve_against`]).
    pub fn new(base_url: impl Into<String>, session: SessionContext, transport: T) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            session,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send a request and return whatever response came back, except that a
    /// 401 clears the session and becomes [`ApiError::Unauthenticated`].
    pub(crate) async fn exchange(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<HttpResponse, ApiError> {
        let request = HttpRequest {
            method,
            url: self.url(path),
            bearer: self.session.token(),
            body,
        };
        tracing::debug!(method = method.as_str(), url = %request.url, "request");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(method = method.as_str(), path, "network error: {e}");
            ApiError::Transport(e)
        })?;

        if response.status == 401 {
            tracing::info!(path, "401 received, clearing session");
            self.session.logout();
            return Err(ApiError::unauthenticated(&response.body));
        }
        Ok(response)
    }

    /// Send a request and return the raw successful response.
    pub(crate) async fn send(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<HttpResponse, ApiError> {
        let response = self.exchange(method, path, body).await?;
        if !response.is_success() {
            let err = ApiError::from_response(response.status, &response.body);
            tracing::warn!(method = method.as_str(), path, "request failed: {err}");
            return Err(err);
        }
        Ok(response)
    }

    pub(crate) async fn request<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: RequestBody,
    ) -> Result<R, ApiError> {
        let response = self.send(method, path, body).await?;
        serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub(crate) async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        self.request(Method::Get, path, RequestBody::Empty).await
    }

    pub(crate) async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::Post, path, json_body(body)?).await
    }

    pub(crate) async fn put_json<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        self.request(Method::Put, path, json_body(body)?).await
    }
}

fn json_body<B: Serialize + ?Sized>(body: &B) -> Result<RequestBody, ApiError> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use store::{MemoryStore, SessionStore, StoredSession, User};

    fn signed_in() -> (SessionContext, MemoryStore) {
        let storage = MemoryStore::with_session(StoredSession::new(
            "tok-abc",
            User {
                id: "u-1".into(),
                email: "a@example.com".into(),
            },
        ));
        (SessionContext::restore(storage.clone()), storage)
    }

    #[test]
    fn test_url_joining() {
        let (session, _) = signed_in();
        let client = ApiClient::new("https://x.test/api/", session, ScriptedTransport::new());
        assert_eq!(client.base_url(), "https://x.test/api");
        assert_eq!(client.url("/notes"), "https://x.test/api/notes");
        assert_eq!(client.url("notes/3"), "https://x.test/api/notes/3");
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let (session, _) = signed_in();
        let transport = ScriptedTransport::new();
        transport.push_json(200, serde_json::json!({"status": "healthy"}));
        let client = ApiClient::new("https://x.test", session, transport.clone());

        let _: serde_json::Value = client.get("/health").await.unwrap();

        let sent = transport.requests();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer.as_deref(), Some("tok-abc"));
        assert_eq!(sent[0].url, "https://x.test/health");
    }

    #[tokio::test]
    async fn test_no_bearer_without_session() {
        let session = SessionContext::restore(MemoryStore::new());
        let transport = ScriptedTransport::new();
        transport.push_json(200, serde_json::json!([]));
        let client = ApiClient::new("https://x.test", session, transport.clone());

        let _: Vec<serde_json::Value> = client.get("/notes").await.unwrap();
        assert!(transport.requests()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_401_clears_session_from_any_endpoint() {
        for path in ["/notes", "/notes/3", "/health"] {
            let (session, storage) = signed_in();
            let transport = ScriptedTransport::new();
            transport.push_json(401, serde_json::json!({"detail": "Invalid token format"}));
            let client = ApiClient::new("https://x.test", session.clone(), transport);

            let err = client.get::<serde_json::Value>(path).await.unwrap_err();

            assert_eq!(
                err,
                ApiError::Unauthenticated {
                    message: Some("Invalid token format".into())
                }
            );
            assert!(err.user_message("fallback").is_none());
            assert!(!session.is_authenticated());
            assert!(storage.load().is_none());
        }
    }

    #[tokio::test]
    async fn test_server_error_keeps_session() {
        let (session, _) = signed_in();
        let transport = ScriptedTransport::new();
        transport.push_json(404, serde_json::json!({"detail": "Note not found"}));
        let client = ApiClient::new("https://x.test", session.clone(), transport);

        let err = client.get::<serde_json::Value>("/notes/9").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 404,
                message: Some("Note not found".into())
            }
        );
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn test_transport_and_decode_failures() {
        let (session, _) = signed_in();
        let transport = ScriptedTransport::new();
        transport.push_network_error("connection refused");
        transport.push_raw(200, b"not json".to_vec());
        let client = ApiClient::new("https://x.test", session, transport);

        assert!(matches!(
            client.get::<serde_json::Value>("/notes").await,
            Err(ApiError::Transport(_))
        ));
        assert!(matches!(
            client.get::<serde_json::Value>("/notes").await,
            Err(ApiError::Decode(_))
        ));
    }
}
