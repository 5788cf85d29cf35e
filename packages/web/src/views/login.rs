//! Login page.

use dioxus::prelude::*;
use ui::views::LoginView;

/// `/login`, with whatever query the confirmation redirect carried.
#[component]
pub fn Login(query: String) -> Element {
    rsx! {
        LoginView { query }
    }
}
