//! State machine behind the notes screen.
//!
//! The controller holds what the screen shows and decides what each event
//! does to it; it never performs I/O. A view drives it in three steps:
//! a `begin_*` transition (which may refuse, e.g. a second summarize of the
//! same note), the API call, then the matching `finish_*` with the call's
//! result. Notes only ever change by applying a server response.
//!
//! ```text
//! loading ──finish_refresh──▶ ready(list, selection?)
//!   ready ──toggle_form──▶ form_open ──finish_create(Ok)──▶ ready + refresh
//!   ready ──begin_summarize(id)──▶ summarizing(id) ──finish_summarize──▶ ready
//!   ready ──request_delete(id)──▶ pending_delete(id)
//!            pending_delete ──cancel_delete──▶ ready
//!            pending_delete ──confirm_delete──▶ deleting(id) ──finish_delete(Ok)──▶ ready + refresh
//! ```

use std::collections::BTreeSet;

use api::{ApiError, Note};

#[derive(Debug, Clone, PartialEq)]
pub struct NotesController {
    notes: Vec<Note>,
    selection: Option<Note>,
    loading: bool,
    form_open: bool,
    creating: bool,
    summarizing: BTreeSet<i64>,
    pending_delete: Option<i64>,
    deleting: Option<i64>,
    alert: Option<String>,
}

impl Default for NotesController {
    fn default() -> Self {
        Self {
            notes: Vec::new(),
            selection: None,
            loading: true,
            form_open: false,
            creating: false,
            summarizing: BTreeSet::new(),
            pending_delete: None,
            deleting: None,
            alert: None,
        }
    }
}

impl NotesController {
    /// A controller in the `loading` state, as on first mount.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selection(&self) -> Option<&Note> {
        self.selection.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_form_open(&self) -> bool {
        self.form_open
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn is_summarizing(&self, id: i64) -> bool {
        self.summarizing.contains(&id)
    }

    pub fn pending_delete(&self) -> Option<i64> {
        self.pending_delete
    }

    pub fn is_deleting(&self, id: i64) -> bool {
        self.deleting == Some(id)
    }

    /// The blocking notification to show, if any.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    fn report(&mut self, err: &ApiError, fallback: &str) {
        if let Some(message) = err.user_message(fallback) {
            self.alert = Some(message);
        }
    }

    // --- loading ---

    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Apply a fetched list. The selection follows its note into the new list
    /// and is dropped if the note is gone. On failure the list is kept.
    pub fn finish_refresh(&mut self, result: Result<Vec<Note>, ApiError>) {
        self.loading = false;
        match result {
            Ok(notes) => {
                self.selection = self
                    .selection
                    .take()
                    .and_then(|selected| notes.iter().find(|n| n.id == selected.id).cloned());
                self.notes = notes;
            }
            Err(e) => self.report(&e, "Failed to load notes"),
        }
    }

    // --- selection and form ---

    pub fn select(&mut self, id: i64) {
        self.selection = self.notes.iter().find(|n| n.id == id).cloned();
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Open or close the "new note" form. The list is untouched.
    pub fn toggle_form(&mut self) {
        self.form_open = !self.form_open;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    // --- create ---

    /// Returns `false` while a previous create is still in flight.
    pub fn begin_create(&mut self) -> bool {
        if self.creating {
            return false;
        }
        self.creating = true;
        true
    }

    /// Returns `true` when the list must be re-fetched.
    pub fn finish_create(&mut self, result: Result<Note, ApiError>) -> bool {
        self.creating = false;
        match result {
            Ok(_) => {
                self.form_open = false;
                true
            }
            Err(e) => {
                self.report(&e, "Failed to create note");
                false
            }
        }
    }

    // --- delete ---

    /// First step of deleting: ask for confirmation.
    pub fn request_delete(&mut self, id: i64) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Second step: the user confirmed. Returns the id to delete.
    pub fn confirm_delete(&mut self) -> Option<i64> {
        let id = self.pending_delete.take()?;
        self.deleting = Some(id);
        Some(id)
    }

    /// Returns `true` when the list must be re-fetched. A failed delete leaves
    /// the list exactly as it was.
    pub fn finish_delete(&mut self, id: i64, result: Result<(), ApiError>) -> bool {
        if self.deleting == Some(id) {
            self.deleting = None;
        }
        match result {
            Ok(()) => {
                self.notes.retain(|n| n.id != id);
                if self.selection.as_ref().is_some_and(|n| n.id == id) {
                    self.selection = None;
                }
                true
            }
            Err(e) => {
                self.report(&e, "Failed to delete note");
                false
            }
        }
    }

    // --- summarize ---

    /// Returns `false` if this note is already being summarized.
    pub fn begin_summarize(&mut self, id: i64) -> bool {
        self.summarizing.insert(id)
    }

    /// Replace the summarized note, by id, in the list and in the selection.
    pub fn finish_summarize(&mut self, id: i64, result: Result<Note, ApiError>) {
        self.summarizing.remove(&id);
        match result {
            Ok(note) => {
                if let Some(slot) = self.notes.iter_mut().find(|n| n.id == note.id) {
                    *slot = note.clone();
                }
                if let Some(selected) = self.selection.as_mut().filter(|n| n.id == note.id) {
                    *selected = note;
                }
            }
            Err(e) => self.report(&e, "Failed to summarize note"),
        }
    }
}
