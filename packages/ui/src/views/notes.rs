use api::NoteDraft;
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::controllers::NotesController;
use crate::icons::FaPlus;
use crate::views::{AlertDialog, ConfirmDialog, NoteDetailView, NotesPlaceholder};
use crate::{Icon, Navbar, NoteFormPanel, NoteList};

/// The notes screen: list, optional "new note" form, selected note pane.
///
/// Every action follows the same shape: a controller transition, the request,
/// then the matching `finish_*` with its result.
#[component]
pub fn NotesView() -> Element {
    let client = use_api();
    let mut controller = use_signal(NotesController::new);

    let refresh = use_callback({
        let client = client.clone();
        move |()| {
            let client = client.clone();
            spawn(async move {
                controller.write().begin_refresh();
                let result = client.list_notes().await;
                controller.write().finish_refresh(result);
            });
        }
    });

    let create = use_callback({
        let client = client.clone();
        move |draft: NoteDraft| {
            if !controller.write().begin_create() {
                return;
            }
            let client = client.clone();
            spawn(async move {
                let result = client.create_note(&draft).await;
                if controller.write().finish_create(result) {
                    refresh.call(());
                }
            });
        }
    });

    let summarize = use_callback({
        let client = client.clone();
        move |id: i64| {
            if !controller.write().begin_summarize(id) {
                return;
            }
            let client = client.clone();
            spawn(async move {
                let result = client.summarize_note(id).await;
                controller.write().finish_summarize(id, result);
            });
        }
    });

    let confirm_delete = use_callback(move |()| {
        let Some(id) = controller.write().confirm_delete() else {
            return;
        };
        let client = client.clone();
        spawn(async move {
            let result = client.delete_note(id).await;
            if controller.write().finish_delete(id, result) {
                refresh.call(());
            }
        });
    });

    // Initial load
    use_hook(move || refresh.call(()));

    let state = controller.read().clone();
    let selected_id = state.selection().map(|n| n.id);

    rsx! {
        Navbar {
            button {
                class: "btn btn--primary",
                onclick: move |_| controller.write().toggle_form(),
                Icon { icon: FaPlus, width: 12, height: 12 }
                if state.is_form_open() { " Close" } else { " New note" }
            }
        }

        main {
            class: "notes-layout",
            section {
                class: "notes-layout__list",
                if state.is_form_open() {
                    NoteFormPanel {
                        submitting: state.is_creating(),
                        on_submit: move |draft| create.call(draft),
                        on_cancel: move |_| controller.write().close_form(),
                    }
                }
                if state.is_loading() && state.notes().is_empty() {
                    p { class: "loading", "Loading notes..." }
                } else {
                    NoteList {
                        notes: state.notes().to_vec(),
                        selected: selected_id,
                        on_select: move |id| controller.write().select(id),
                    }
                }
            }
            section {
                class: "notes-layout__detail",
                if let Some(note) = state.selection() {
                    NoteDetailView {
                        note: note.clone(),
                        summarizing: state.is_summarizing(note.id),
                        deleting: state.is_deleting(note.id),
                        on_summarize: move |id| summarize.call(id),
                        on_delete: move |id| controller.write().request_delete(id),
                        on_close: move |_| controller.write().clear_selection(),
                    }
                } else {
                    NotesPlaceholder {}
                }
            }
        }

        if state.pending_delete().is_some() {
            ConfirmDialog {
                title: "Delete note?",
                message: "This note will be permanently deleted.",
                on_confirm: move |_| confirm_delete.call(()),
                on_cancel: move |_| controller.write().cancel_delete(),
            }
        }

        if let Some(message) = state.alert() {
            AlertDialog {
                message: message.to_string(),
                on_dismiss: move |_| controller.write().dismiss_alert(),
            }
        }
    }
}
