//! Notes CRUD and summarization. Each method is exactly one request; nothing is
//! cached or retried.

use store::{Note, NoteDraft, NoteUpdate};

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{Method, RequestBody, Transport};

impl<T: Transport> ApiClient<T> {
    /// `GET /notes`: every note owned by the current session.
    pub async fn list_notes(&self) -> Result<Vec<Note>, ApiError> {
        self.get("/notes").await
    }

    /// `GET /notes/{id}`
    pub async fn get_note(&self, id: i64) -> Result<Note, ApiError> {
        self.get(&format!("/notes/{id}")).await
    }

    /// `POST /notes`
    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note, ApiError> {
        let note: Note = self.post_json("/notes", draft).await?;
        tracing::info!(id = note.id, "note created");
        Ok(note)
    }

    /// `PUT /notes/{id}` with only the fields present in `update`.
    pub async fn update_note(&self, id: i64, update: &NoteUpdate) -> Result<Note, ApiError> {
        if update.is_empty() {
            return Err(ApiError::Validation("Nothing to update".to_string()));
        }
        self.put_json(&format!("/notes/{id}"), update).await
    }

    /// `DELETE /notes/{id}`. The caller removes the note from local state.
    pub async fn delete_note(&self, id: i64) -> Result<(), ApiError> {
        self.send(Method::Delete, &format!("/notes/{id}"), RequestBody::Empty)
            .await?;
        tracing::info!(id, "note deleted");
        Ok(())
    }

    /// `POST /notes/{id}/summarize`: the server generates the summary, which
    /// may take a while. Returns the note with `summary` filled in.
    pub async fn summarize_note(&self, id: i64) -> Result<Note, ApiError> {
        self.request(
            Method::Post,
            &format!("/notes/{id}/summarize"),
            RequestBody::Empty,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{note_json, ScriptedTransport};
    use crate::SessionContext;
    use store::{MemoryStore, StoredSession, User};

    fn client() -> (ApiClient<ScriptedTransport>, ScriptedTransport) {
        let transport = ScriptedTransport::new();
        let session = SessionContext::restore(MemoryStore::with_session(StoredSession::new(
            "tok",
            User {
                id: "u-1".into(),
                email: "a@example.com".into(),
            },
        )));
        (
            ApiClient::new("https://x.test/api", session, transport.clone()),
            transport,
        )
    }

    #[tokio::test]
    async fn test_list_notes() {
        let (client, transport) = client();
        transport.push_json(
            200,
            serde_json::json!([note_json(2, "b", "two"), note_json(1, "a", "one")]),
        );

        let notes = client.list_notes().await.unwrap();

        assert_eq!(notes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![2, 1]);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.url, "https://x.test/api/notes");
    }

    #[tokio::test]
    async fn test_create_note_sends_draft() {
        let (client, transport) = client();
        transport.push_json(201, note_json(7, "Groceries", "Milk, eggs"));

        let note = client
            .create_note(&NoteDraft::new("Groceries", "Milk, eggs"))
            .await
            .unwrap();

        assert_eq!(note.id, 7);
        assert_eq!(note.title, "Groceries");
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "https://x.test/api/notes");
        assert_eq!(
            sent.body,
            RequestBody::Json(serde_json::json!({"title": "Groceries", "content": "Milk, eggs"}))
        );
    }

    #[tokio::test]
    async fn test_update_note_sends_partial_body() {
        let (client, transport) = client();
        transport.push_json(200, note_json(3, "renamed", "one"));

        let update = NoteUpdate {
            title: Some("renamed".into()),
            ..Default::default()
        };
        let note = client.update_note(3, &update).await.unwrap();

        assert_eq!(note.title, "renamed");
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Put);
        assert_eq!(sent.url, "https://x.test/api/notes/3");
        assert_eq!(sent.body, RequestBody::Json(serde_json::json!({"title": "renamed"})));
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected_locally() {
        let (client, transport) = client();
        let err = client.update_note(3, &NoteUpdate::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_delete_note_accepts_no_content() {
        let (client, transport) = client();
        transport.push_empty(204);

        client.delete_note(5).await.unwrap();

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "https://x.test/api/notes/5");
    }

    #[tokio::test]
    async fn test_summarize_and_get() {
        let (client, transport) = client();
        let mut summarized = note_json(4, "t", "long text");
        summarized["summary"] = serde_json::json!("short");
        transport.push_json(200, summarized);
        transport.push_json(200, note_json(4, "t", "long text"));

        let note = client.summarize_note(4).await.unwrap();
        assert_eq!(note.summary.as_deref(), Some("short"));
        assert_eq!(
            transport.last_request().unwrap().url,
            "https://x.test/api/notes/4/summarize"
        );

        let note = client.get_note(4).await.unwrap();
        assert_eq!(note.id, 4);
        assert_eq!(transport.last_request().unwrap().url, "https://x.test/api/notes/4");
    }

    #[tokio::test]
    async fn test_summarize_failure_message() {
        let (client, transport) = client();
        transport.push_json(
            500,
            serde_json::json!({"detail": "Failed to generate summary. Check OpenAI API key."}),
        );
        let err = client.summarize_note(4).await.unwrap_err();
        assert_eq!(
            err.user_message("Failed to summarize note").as_deref(),
            Some("Failed to generate summary. Check OpenAI API key.")
        );
    }
}
