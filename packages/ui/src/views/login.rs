//! Sign-in / registration page.

use dioxus::prelude::*;

use crate::auth::{use_api, use_session};
use crate::controllers::{AuthMode, LoginController};

/// Login page body. `query` is the raw query string of the current URL; it
/// may carry a confirmation result or a confirmation link's token.
///
/// A successful sign-in only updates the session; the session gate moves the
/// app to the notes screen.
#[component]
pub fn LoginView(#[props(default)] query: String) -> Element {
    let client = use_api();
    let session = use_session();
    let (initial, confirmation) = use_hook(|| LoginController::from_query(&query));
    let mut controller = use_signal(move || initial);

    // Redeem a confirmation link, once
    use_future({
        let client = client.clone();
        move || {
            let client = client.clone();
            let confirmation = confirmation.clone();
            async move {
                if let Some(token) = confirmation {
                    let result = client.confirm_email(&token.token_hash, &token.kind).await;
                    controller.write().finish_confirm(result);
                }
            }
        }
    });

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let Some(submission) = controller.write().begin_submit() else {
            return;
        };
        let client = client.clone();
        let session = session.clone();
        spawn(async move {
            let result = match submission.mode {
                AuthMode::SignIn => client.login(&submission.email, &submission.password).await,
                AuthMode::Register => {
                    client.register(&submission.email, &submission.password).await
                }
            };
            let step = controller.write().finish_submit(result, &session);
            tracing::debug!(?step, "login finished");
        });
    };

    let state = controller.read().clone();
    let busy = state.is_submitting() || state.is_confirming();
    let submit_label = match (state.is_submitting(), state.mode) {
        (true, _) => "Please wait...",
        (false, mode) => mode.title(),
    };

    rsx! {
        div {
            class: "login",
            form {
                class: "login__card",
                onsubmit: handle_submit,
                h1 { class: "login__brand", "Notes" }
                h2 { class: "login__title", "{state.mode.title()}" }

                if state.is_confirming() {
                    p { class: "banner banner--info", "Confirming your email..." }
                }
                if let Some(error) = state.error() {
                    p { class: "banner banner--error", "{error}" }
                }
                if let Some(success) = state.success() {
                    p { class: "banner banner--success", "{success}" }
                }

                div {
                    class: "field",
                    label { r#for: "login-email", "Email" }
                    input {
                        id: "login-email",
                        class: "input",
                        r#type: "email",
                        autocomplete: "email",
                        value: "{state.email}",
                        oninput: move |evt: FormEvent| controller.write().email = evt.value(),
                    }
                }
                div {
                    class: "field",
                    label { r#for: "login-password", "Password" }
                    input {
                        id: "login-password",
                        class: "input",
                        r#type: "password",
                        autocomplete: if state.mode == AuthMode::Register { "new-password" } else { "current-password" },
                        value: "{state.password}",
                        oninput: move |evt: FormEvent| controller.write().password = evt.value(),
                    }
                }

                button {
                    r#type: "submit",
                    class: "btn btn--primary btn--block",
                    disabled: busy,
                    "{submit_label}"
                }
                button {
                    r#type: "button",
                    class: "btn btn--link",
                    disabled: busy,
                    onclick: move |_| controller.write().toggle_mode(),
                    "{state.mode.switch_label()}"
                }
            }
        }
    }
}
