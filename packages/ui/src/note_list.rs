use api::Note;
use dioxus::prelude::*;

const PREVIEW_CHARS: usize = 120;

fn preview(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{}…", head.trim_end())
    } else {
        head
    }
}

/// The list of notes, newest first as the server sent them.
#[component]
pub fn NoteList(notes: Vec<Note>, selected: Option<i64>, on_select: EventHandler<i64>) -> Element {
    if notes.is_empty() {
        return rsx! {
            p { class: "note-list__empty", "No notes yet. Create your first one." }
        };
    }

    rsx! {
        ul {
            class: "note-list",
            {notes.iter().map(|note| {
                let id = note.id;
                let class = if selected == Some(id) {
                    "note-list__item note-list__item--selected"
                } else {
                    "note-list__item"
                };
                let updated = note.updated_at.format("%b %e, %Y").to_string();
                rsx! {
                    li {
                        key: "{id}",
                        class: "{class}",
                        onclick: move |_| on_select.call(id),
                        h3 { class: "note-list__title", "{note.title}" }
                        p { class: "note-list__preview", "{preview(&note.content)}" }
                        div {
                            class: "note-list__meta",
                            span { "{updated}" }
                            if note.summary.is_some() {
                                span { class: "badge", "Summarized" }
                            }
                        }
                    }
                }
            })}
        }
    }
}
