mod modal_overlay;
pub use modal_overlay::{AlertDialog, ConfirmDialog, ModalOverlay};

mod notes_placeholder;
pub use notes_placeholder::NotesPlaceholder;

mod note_detail;
pub use note_detail::NoteDetailView;

mod notes;
pub use notes::NotesView;

mod login;
pub use login::LoginView;
