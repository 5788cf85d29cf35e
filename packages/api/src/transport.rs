//! # Transport: one HTTP exchange, nothing more
//!
//! [`Transport`] sends a fully-built [`HttpRequest`] and hands back the raw
//! [`HttpResponse`]. It knows nothing about sessions, status codes or JSON
//! shapes; [`crate::ApiClient`] layers those on top. Keeping the wire behind a
//! trait lets the same client run against `reqwest` in the browser (fetch) and
//! natively, and against a scripted transport in tests.

use std::future::Future;

/// HTTP methods used by the notes service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A file part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FilePart {
    /// Form field name.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    Multipart(FilePart),
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Absolute URL, query string included.
    pub url: String,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
    /// URL the response finally came from, after any redirects the transport
    /// followed on its own.
    pub final_url: Option<String>,
    /// `Location` of a redirect the transport did not follow.
    pub location: Option<String>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }

    /// Where the request was sent on to: the unfollowed `Location`, or the
    /// final URL when it differs from `requested`.
    pub fn redirect_target(&self, requested: &str) -> Option<&str> {
        if self.is_redirect() {
            return self.location.as_deref();
        }
        self.final_url.as_deref().filter(|url| *url != requested)
    }
}

/// Async trait for performing a single HTTP exchange.
///
/// The error is a human-readable description of a network-level failure
/// (no response at all). Any response, whatever its status, is `Ok`.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, String>>;
}

/// Production transport backed by [`reqwest::Client`].
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };

        let mut builder = self.client.request(method, &request.url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(file) => {
                let part = reqwest::multipart::Part::bytes(file.bytes)
                    .file_name(file.file_name)
                    .mime_str(&file.content_type)
                    .map_err(|e| format!("invalid content type: {e}"))?;
                builder.multipart(reqwest::multipart::Form::new().part(file.field, part))
            }
        };

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let final_url = Some(response.url().to_string());
        let location = response
            .headers()
            .get(reqwest::header::LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await.map_err(|e| e.to_string())?;
        Ok(HttpResponse {
            status,
            body: body.to_vec(),
            final_url,
            location,
        })
    }
}
