use dioxus::prelude::*;
use ui::views::NotesView;

#[component]
pub fn Notes() -> Element {
    rsx! {
        NotesView {}
    }
}
