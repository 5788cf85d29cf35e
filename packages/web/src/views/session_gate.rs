//! The single place that reacts to session changes with navigation.
//!
//! The API client clears the session on a 401 and [`ui::AuthProvider`] mirrors
//! the session feed into the auth signal; this layout re-renders on that
//! signal and moves the user to wherever the current route says they belong.

use dioxus::prelude::*;
use ui::use_auth;

use crate::Route;

/// Where `route` should send a user who is (or is not) signed in, if
/// anywhere else.
pub(crate) fn redirect_for(route: &Route, signed_in: bool) -> Option<Route> {
    match route {
        Route::Login { .. } if signed_in => Some(Route::Notes {}),
        Route::Login { .. } => None,
        Route::Notes {} if !signed_in => Some(Route::Login {
            query: String::new(),
        }),
        Route::Notes {} => None,
        Route::Root {} | Route::NotFound { .. } => Some(Route::Notes {}),
    }
}

#[component]
pub fn SessionGate() -> Element {
    let auth = use_auth();
    let route = use_route::<Route>();
    let nav = use_navigator();

    let signed_in = auth.read().user.is_some();
    if let Some(target) = redirect_for(&route, signed_in) {
        tracing::debug!(from = %route, to = %target, "redirecting");
        nav.replace(target);
        return rsx! {};
    }

    rsx! {
        Outlet::<Route> {}
    }
}
