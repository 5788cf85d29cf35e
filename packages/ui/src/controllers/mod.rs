//! Screen state machines. Views own one of these in a signal, call the API
//! between a `begin_*` and a `finish_*` transition, and render from it.

mod login;
mod note_form;
mod notes;

pub use login::{AuthMode, ConfirmationToken, LoginController, LoginStep, Submission};
pub use note_form::{FormError, NoteForm};
pub use notes::NotesController;
