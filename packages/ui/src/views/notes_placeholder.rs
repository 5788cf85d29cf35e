use dioxus::prelude::*;

/// Empty state shown when no note is selected.
#[component]
pub fn NotesPlaceholder() -> Element {
    rsx! {
        div {
            class: "notes-placeholder",
            h2 { "Select a note" }
            p { "Choose a note from the list or create a new one." }
        }
    }
}
