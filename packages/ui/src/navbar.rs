use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::ConnectionBadge;

/// App header: title, signed-in user, connectivity and logout.
#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let email = auth().user.map(|u| u.email);

    rsx! {
        header {
            class: "navbar",
            h1 { class: "navbar__title", "Notes" }
            {children}
            div {
                class: "navbar__session",
                ConnectionBadge {}
                if let Some(email) = email {
                    span { class: "navbar__user", "{email}" }
                    LogoutButton { class: "btn btn--ghost" }
                }
            }
        }
    }
}
