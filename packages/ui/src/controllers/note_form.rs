//! Create/edit form for a single note, including the optional image.

use api::{ApiError, Note, NoteDraft, UploadedImage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Title and content are required.")]
    MissingFields,
    #[error("Wait for the image upload to finish.")]
    UploadInProgress,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub title: String,
    pub content: String,
    image_url: Option<String>,
    uploading: bool,
    editing: bool,
    error: Option<String>,
}

impl NoteForm {
    /// An empty form for a new note.
    pub fn new() -> Self {
        Self::default()
    }

    /// A form pre-filled from an existing note. Submitting keeps the values.
    pub fn editing(note: &Note) -> Self {
        let draft = NoteDraft::from(note);
        Self {
            title: draft.title,
            content: draft.content,
            image_url: draft.image_url,
            editing: true,
            ..Self::default()
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn can_submit(&self) -> bool {
        !self.uploading && !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }

    /// Returns `false` if an upload is already running.
    pub fn begin_upload(&mut self) -> bool {
        if self.uploading {
            return false;
        }
        self.uploading = true;
        self.error = None;
        true
    }

    pub fn finish_upload(&mut self, result: Result<UploadedImage, ApiError>) {
        self.uploading = false;
        match result {
            Ok(image) => self.image_url = Some(image.url),
            Err(e) => self.error = e.user_message("Failed to upload image."),
        }
    }

    pub fn remove_image(&mut self) {
        self.image_url = None;
    }

    /// Produce the draft to send. A new-note form is cleared afterwards; an
    /// edit form keeps its values.
    pub fn submit(&mut self) -> Result<NoteDraft, FormError> {
        if self.uploading {
            return Err(FormError::UploadInProgress);
        }
        let title = self.title.trim();
        let content = self.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(FormError::MissingFields);
        }

        let mut draft = NoteDraft::new(title, content);
        if let Some(url) = &self.image_url {
            draft = draft.with_image(url.clone());
        }
        if !self.editing {
            self.clear();
        }
        Ok(draft)
    }

    pub fn clear(&mut self) {
        *self = Self {
            editing: self.editing,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_block_submit() {
        let mut form = NoteForm::new();
        form.title = "Title".into();
        form.content = "   ".into();
        assert!(!form.can_submit());
        assert_eq!(form.submit(), Err(FormError::MissingFields));
        assert_eq!(form.title, "Title");
    }

    #[test]
    fn test_submit_trims_and_clears() {
        let mut form = NoteForm::new();
        form.title = "  Groceries ".into();
        form.content = "Milk, eggs\n".into();

        let draft = form.submit().unwrap();

        assert_eq!(draft, NoteDraft::new("Groceries", "Milk, eggs"));
        assert_eq!(form, NoteForm::new());
    }

    #[test]
    fn test_upload_attaches_image() {
        let mut form = NoteForm::new();
        form.title = "t".into();
        form.content = "c".into();

        assert!(form.begin_upload());
        assert!(!form.begin_upload());
        assert_eq!(form.submit(), Err(FormError::UploadInProgress));

        form.finish_upload(Ok(UploadedImage {
            url: "https://cdn/x.png".into(),
            filename: None,
        }));
        assert_eq!(form.image_url(), Some("https://cdn/x.png"));

        let draft = form.submit().unwrap();
        assert_eq!(draft.image_url.as_deref(), Some("https://cdn/x.png"));
    }

    #[test]
    fn test_failed_upload_shows_message() {
        let mut form = NoteForm::new();
        form.begin_upload();
        form.finish_upload(Err(ApiError::Validation("File too large. Maximum size is 5MB".into())));
        assert!(!form.is_uploading());
        assert!(form.image_url().is_none());
        assert_eq!(form.error(), Some("File too large. Maximum size is 5MB"));
    }

    #[test]
    fn test_remove_image() {
        let mut form = NoteForm::new();
        form.finish_upload(Ok(UploadedImage {
            url: "u".into(),
            filename: None,
        }));
        form.remove_image();
        assert!(form.image_url().is_none());
    }

    #[test]
    fn test_edit_form_keeps_values() {
        let note: Note = serde_json::from_value(api::testing::note_json(4, "t", "c")).unwrap();
        let mut form = NoteForm::editing(&note);
        assert!(form.is_editing());
        form.title = "renamed".into();
        let draft = form.submit().unwrap();
        assert_eq!(draft.title, "renamed");
        assert_eq!(form.title, "renamed");
    }
}
