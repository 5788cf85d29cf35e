//! This crate contains all shared UI for the workspace: screen controllers,
//! components and the views the platform shells route to.

use dioxus::prelude::*;

pub mod controllers;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod platform;
pub use platform::{api_base_url, make_client, make_session_store, NATIVE_ORIGIN};

pub mod views;

pub const VIEWS_CSS: Asset = asset!("/src/views/views.css");

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{use_api, use_auth, use_session, AuthProvider, AuthState, LogoutButton};

mod connection_status;
pub use connection_status::{ConnectionBadge, ConnectionStatus};

mod note_form;
pub use note_form::NoteFormPanel;

mod note_list;
pub use note_list::NoteList;
