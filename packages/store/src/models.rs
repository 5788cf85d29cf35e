//! # Domain models shared by the API client and the UI
//!
//! These types mirror the JSON documents exchanged with the notes service. They
//! are `Serialize + Deserialize` so the same structs decode responses, encode
//! request bodies, and persist the session to local storage.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`User`] | The authenticated account (`id`, `email`) as issued by the server. |
//! | [`Note`] | A persisted note. Only ever built from a server response. |
//! | [`NoteDraft`] | The body of a create request (also the composition form's output). |
//! | [`NoteUpdate`] | A partial update; absent fields are not serialized. |
//! | [`UploadedImage`] | The hosted location of an uploaded image. |
//!
//! ## Tolerant decoding
//!
//! The service stores ids as `BIGSERIAL` and timestamps as Postgres
//! `timestamptz`, but older rows come back with stringly ids or naive
//! timestamps. [`Note`] accepts both forms.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Account information returned alongside an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
}

/// A note owned by the current user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    #[serde(deserialize_with = "note_id")]
    pub id: i64,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub user_id: String,
    #[serde(deserialize_with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /notes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NoteDraft {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

impl From<&Note> for NoteDraft {
    fn from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            image_url: note.image_url.clone(),
        }
    }
}

/// Body of `PUT /notes/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.image_url.is_none()
    }
}

/// Response of `POST /upload/image`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
    /// Storage key on the server, e.g. `"<user>/<uuid>.png"`.
    #[serde(default)]
    pub filename: Option<String>,
}

fn note_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(n) => Ok(n),
        RawId::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid note id: {s}"))),
    }
}

fn timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_note_decodes_server_shape() {
        let json = r#"{
            "id": 7,
            "title": "Groceries",
            "content": "Milk, eggs",
            "image_url": null,
            "summary": null,
            "user_id": "u-1",
            "created_at": "2024-03-01T10:00:00.123456+00:00",
            "updated_at": "2024-03-01T10:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, 7);
        assert_eq!(note.title, "Groceries");
        assert!(note.image_url.is_none());
        assert_eq!(note.created_at.hour(), 10);
    }

    #[test]
    fn test_note_accepts_string_id_and_naive_timestamps() {
        let json = r#"{
            "id": "42",
            "title": "t",
            "content": "c",
            "user_id": "u-1",
            "created_at": "2024-03-01T10:00:00.5",
            "updated_at": "2024-03-01T11:30:00"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.id, 42);
        assert!(note.summary.is_none());
        assert_eq!(note.updated_at.minute(), 30);
    }

    #[test]
    fn test_note_rejects_uuid_id() {
        let json = r#"{
            "id": "2b1c-44",
            "title": "t",
            "content": "c",
            "user_id": "u-1",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        }"#;
        assert!(serde_json::from_str::<Note>(json).is_err());
    }

    #[test]
    fn test_draft_omits_missing_image() {
        let body = serde_json::to_value(NoteDraft::new("Groceries", "Milk, eggs")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"title": "Groceries", "content": "Milk, eggs"})
        );

        let body =
            serde_json::to_value(NoteDraft::new("a", "b").with_image("https://cdn/x.png")).unwrap();
        assert_eq!(body["image_url"], "https://cdn/x.png");
    }

    #[test]
    fn test_update_serializes_only_present_fields() {
        let update = NoteUpdate {
            content: Some("new".into()),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"content": "new"})
        );
        assert!(NoteUpdate::default().is_empty());
    }
}
