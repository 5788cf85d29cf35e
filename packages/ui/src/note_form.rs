use api::{guess_image_type, ApiError, Note, NoteDraft, ALLOWED_IMAGE_TYPES};
use dioxus::prelude::*;

use crate::auth::use_api;
use crate::controllers::NoteForm;
use crate::icons::{FaImage, FaXmark};
use crate::Icon;

/// Inline form for composing a note, with an optional image upload.
///
/// With `initial` set the form edits that note and keeps its values after
/// submitting; otherwise it starts empty and clears itself on submit.
#[component]
pub fn NoteFormPanel(
    #[props(default)] initial: Option<Note>,
    /// Whether the parent is still sending the previous submission.
    #[props(default)]
    submitting: bool,
    on_submit: EventHandler<NoteDraft>,
    on_cancel: EventHandler<()>,
) -> Element {
    let client = use_api();
    let mut form = use_signal(move || initial.as_ref().map(NoteForm::editing).unwrap_or_default());
    let mut form_error = use_signal(|| Option::<String>::None);

    let handle_upload = move |evt: FormEvent| {
        let client = client.clone();
        async move {
            let Some(engine) = evt.files() else {
                return;
            };
            let Some(name) = engine.files().into_iter().next() else {
                return;
            };
            if !form.write().begin_upload() {
                return;
            }
            let result = match engine.read_file(&name).await {
                Some(bytes) => {
                    let content_type = guess_image_type(&name).unwrap_or("application/octet-stream");
                    client.upload_image(&name, content_type, bytes).await
                }
                None => Err(ApiError::Validation("Could not read the selected file.".to_string())),
            };
            form.write().finish_upload(result);
        }
    };

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        if submitting {
            return;
        }
        let result = form.write().submit();
        match result {
            Ok(draft) => {
                form_error.set(None);
                on_submit.call(draft);
            }
            Err(e) => form_error.set(Some(e.to_string())),
        }
    };

    let state = form.read().clone();
    let heading = if state.is_editing() { "Edit note" } else { "New note" };
    let upload_class = if state.is_uploading() {
        "btn btn--outline btn--disabled"
    } else {
        "btn btn--outline"
    };
    let accept = ALLOWED_IMAGE_TYPES.join(",");
    let message = form_error().or_else(|| state.error().map(str::to_string));

    rsx! {
        form {
            class: "note-form",
            onsubmit: handle_submit,
            h2 { class: "note-form__heading", "{heading}" }

            div {
                class: "field",
                label { r#for: "note-title", "Title" }
                input {
                    id: "note-title",
                    class: "input",
                    r#type: "text",
                    placeholder: "Title",
                    value: "{state.title}",
                    oninput: move |evt: FormEvent| form.write().title = evt.value(),
                }
            }

            div {
                class: "field",
                label { r#for: "note-content", "Content" }
                textarea {
                    id: "note-content",
                    class: "input input--multiline",
                    rows: "6",
                    placeholder: "Write something...",
                    value: "{state.content}",
                    oninput: move |evt: FormEvent| form.write().content = evt.value(),
                }
            }

            div {
                class: "note-form__image",
                if let Some(url) = state.image_url() {
                    img { class: "note-form__preview", src: "{url}", alt: "Attached image" }
                    button {
                        r#type: "button",
                        class: "btn btn--ghost",
                        onclick: move |_| form.write().remove_image(),
                        Icon { icon: FaXmark, width: 12, height: 12 }
                        " Remove image"
                    }
                } else {
                    label {
                        class: "{upload_class}",
                        Icon { icon: FaImage, width: 14, height: 14 }
                        if state.is_uploading() { " Uploading..." } else { " Add image" }
                        input {
                            r#type: "file",
                            accept: "{accept}",
                            hidden: true,
                            disabled: state.is_uploading(),
                            onchange: handle_upload,
                        }
                    }
                }
            }

            if let Some(message) = message {
                p { class: "form-error", "{message}" }
            }

            div {
                class: "note-form__actions",
                button {
                    r#type: "submit",
                    class: "btn btn--primary",
                    disabled: submitting || !state.can_submit(),
                    if submitting { "Saving..." } else { "Save" }
                }
                button {
                    r#type: "button",
                    class: "btn btn--outline",
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
            }
        }
    }
}
