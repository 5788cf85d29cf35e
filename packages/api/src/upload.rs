//! Image upload. The file travels as a multipart body with a single `file`
//! field; the server answers with the hosted URL.

use store::UploadedImage;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{FilePart, Method, RequestBody, Transport};

/// Content types the server accepts.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Largest upload the server accepts (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Best-effort content type from a file name, for platforms that do not report one.
pub fn guess_image_type(file_name: &str) -> Option<&'static str> {
    let ext = file_name.rsplit_once('.')?.1.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Check an upload against the server's limits before sending it.
pub fn validate_image(content_type: &str, len: usize) -> Result<(), ApiError> {
    if !ALLOWED_IMAGE_TYPES.contains(&content_type) {
        return Err(ApiError::Validation(format!(
            "Invalid file type. Allowed types: {}",
            ALLOWED_IMAGE_TYPES.join(", ")
        )));
    }
    if len > MAX_IMAGE_BYTES {
        return Err(ApiError::Validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_IMAGE_BYTES / (1024 * 1024)
        )));
    }
    Ok(())
}

impl<T: Transport> ApiClient<T> {
    /// `POST /upload/image`
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, ApiError> {
        validate_image(content_type, bytes.len())?;
        let size = bytes.len();
        let uploaded: UploadedImage = self
            .request(
                Method::Post,
                "/upload/image",
                RequestBody::Multipart(FilePart {
                    field: "file".to_string(),
                    file_name: file_name.to_string(),
                    content_type: content_type.to_string(),
                    bytes,
                }),
            )
            .await?;
        tracing::info!(size, url = %uploaded.url, "image uploaded");
        Ok(uploaded)
    }
}
