use api::Note;
use dioxus::prelude::*;

use crate::icons::{FaTrash, FaXmark};
use crate::Icon;

/// The selected note, with its summary and actions.
///
/// Actions only emit the note's id; the parent owns the state machine and
/// the requests.
#[component]
pub fn NoteDetailView(
    note: Note,
    /// A summary request for this note is in flight.
    #[props(default)]
    summarizing: bool,
    /// A delete request for this note is in flight.
    #[props(default)]
    deleting: bool,
    on_summarize: EventHandler<i64>,
    on_delete: EventHandler<i64>,
    on_close: EventHandler<()>,
) -> Element {
    let id = note.id;
    let created = note.created_at.format("%b %e, %Y %H:%M").to_string();
    let updated = note.updated_at.format("%b %e, %Y %H:%M").to_string();
    let edited = note.updated_at != note.created_at;
    let summarize_label = match (summarizing, note.summary.is_some()) {
        (true, _) => "Summarizing...",
        (false, true) => "Summarize again",
        (false, false) => "Summarize",
    };

    rsx! {
        article {
            class: "note-detail",
            header {
                class: "note-detail__header",
                h2 { class: "note-detail__title", "{note.title}" }
                button {
                    class: "btn btn--ghost",
                    title: "Close",
                    onclick: move |_| on_close.call(()),
                    Icon { icon: FaXmark, width: 14, height: 14 }
                }
            }
            p {
                class: "note-detail__meta",
                "Created {created}"
                if edited {
                    " · Updated {updated}"
                }
            }

            if let Some(url) = &note.image_url {
                img { class: "note-detail__image", src: "{url}", alt: "{note.title}" }
            }

            div { class: "note-detail__content", "{note.content}" }

            if let Some(summary) = &note.summary {
                section {
                    class: "note-detail__summary",
                    h3 { "Summary" }
                    p { "{summary}" }
                }
            }

            div {
                class: "note-detail__actions",
                button {
                    class: "btn btn--primary",
                    disabled: summarizing,
                    onclick: move |_| on_summarize.call(id),
                    "{summarize_label}"
                }
                button {
                    class: "btn btn--danger",
                    disabled: deleting,
                    onclick: move |_| on_delete.call(id),
                    Icon { icon: FaTrash, width: 12, height: 12 }
                    if deleting { " Deleting..." } else { " Delete" }
                }
            }
        }
    }
}
