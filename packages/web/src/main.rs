use dioxus::logger::tracing::Level;
use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Login, Notes, SessionGate};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(SessionGate)]
        #[route("/")]
        Root {},
        #[route("/login?:..query")]
        Login { query: String },
        #[route("/notes")]
        Notes {},
        #[route("/:..segments")]
        NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    if let Err(e) = dioxus::logger::init(if cfg!(debug_assertions) {
        Level::DEBUG
    } else {
        Level::INFO
    }) {
        eprintln!("logger already initialized: {e}");
    }
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        document::Link { rel: "stylesheet", href: ui::VIEWS_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}

/// `/`; the session gate redirects before this renders.
#[component]
fn Root() -> Element {
    rsx! {}
}

/// Any unknown path; the session gate redirects before this renders.
#[component]
fn NotFound(segments: Vec<String>) -> Element {
    tracing::debug!(path = %segments.join("/"), "unknown route");
    rsx! {}
}
