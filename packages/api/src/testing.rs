//! Scripted [`Transport`] for tests: responses are queued up front and every
//! request is recorded for inspection.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::transport::{HttpRequest, HttpResponse, Transport};

#[derive(Clone, Debug, Default)]
pub struct ScriptedTransport {
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, String>>>>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_raw(&self, status: u16, body: Vec<u8>) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(HttpResponse {
                status,
                body,
                ..HttpResponse::default()
            }));
    }

    /// A redirect the transport hands back unfollowed.
    pub fn push_redirect(&self, status: u16, location: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            location: Some(location.to_string()),
            ..HttpResponse::default()
        }));
    }

    /// A response reached by following redirects to `final_url`.
    pub fn push_landed(&self, status: u16, final_url: &str, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.as_bytes().to_vec(),
            final_url: Some(final_url.to_string()),
            location: None,
        }));
    }

    pub fn push_json(&self, status: u16, body: serde_json::Value) {
        self.push_raw(status, body.to_string().into_bytes());
    }

    pub fn push_empty(&self, status: u16) {
        self.push_raw(status, Vec::new());
    }

    pub fn push_network_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(message.to_string()));
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response".to_string()))
    }
}

/// A note as the server would return it.
pub fn note_json(id: i64, title: &str, content: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "title": title,
        "content": content,
        "image_url": null,
        "summary": null,
        "user_id": "u-1",
        "created_at": "2024-03-01T10:00:00+00:00",
        "updated_at": "2024-03-01T10:00:00+00:00"
    })
}
