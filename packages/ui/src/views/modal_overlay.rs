use dioxus::prelude::*;

/// A full-screen overlay that centers its children in a modal card.
/// Clicking outside the card triggers `on_close`.
#[component]
pub fn ModalOverlay(on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div {
            class: "modal-overlay",
            onclick: move |_| on_close.call(()),
            div {
                class: "modal-card",
                role: "dialog",
                onclick: move |evt: Event<MouseData>| evt.stop_propagation(),
                {children}
            }
        }
    }
}

/// Asks before a destructive action. Dismissing the overlay cancels.
#[component]
pub fn ConfirmDialog(
    title: String,
    message: String,
    #[props(default = "Delete".to_string())] confirm_label: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_cancel.call(()),
            h2 { class: "modal-card__title", "{title}" }
            p { class: "modal-card__body", "{message}" }
            div {
                class: "modal-card__actions",
                button {
                    class: "btn btn--outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn--danger",
                    onclick: move |_| on_confirm.call(()),
                    "{confirm_label}"
                }
            }
        }
    }
}

/// A blocking notification with a single dismiss button.
#[component]
pub fn AlertDialog(message: String, on_dismiss: EventHandler<()>) -> Element {
    rsx! {
        ModalOverlay {
            on_close: move |_| on_dismiss.call(()),
            p { class: "modal-card__body", "{message}" }
            div {
                class: "modal-card__actions",
                button {
                    class: "btn btn--primary",
                    onclick: move |_| on_dismiss.call(()),
                    "OK"
                }
            }
        }
    }
}
