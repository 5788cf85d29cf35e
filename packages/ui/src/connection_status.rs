//! Service reachability pill for the header, fed by the health loop in
//! [`crate::AuthProvider`].

use dioxus::prelude::*;

use crate::auth::{use_auth, AuthState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// No health check has finished yet.
    Checking,
    Online,
    Unreachable,
}

impl ConnectionStatus {
    pub fn from_state(state: &AuthState) -> Self {
        match (state.checked, state.online) {
            (false, _) => ConnectionStatus::Checking,
            (true, true) => ConnectionStatus::Online,
            (true, false) => ConnectionStatus::Unreachable,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Checking => "Connecting…",
            ConnectionStatus::Online => "Online",
            ConnectionStatus::Unreachable => "Service unreachable",
        }
    }

    fn modifier(self) -> &'static str {
        match self {
            ConnectionStatus::Checking => "checking",
            ConnectionStatus::Online => "online",
            ConnectionStatus::Unreachable => "unreachable",
        }
    }
}

#[component]
pub fn ConnectionBadge() -> Element {
    let auth = use_auth();
    let status = ConnectionStatus::from_state(&auth.read());
    let modifier = status.modifier();
    let label = status.label();

    rsx! {
        span {
            class: "connection connection--{modifier}",
            role: "status",
            span { class: "connection__dot" }
            span { class: "connection__label", "{label}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_health_checks() {
        let mut state = AuthState::default();
        assert_eq!(ConnectionStatus::from_state(&state), ConnectionStatus::Checking);

        state.checked = true;
        assert_eq!(ConnectionStatus::from_state(&state), ConnectionStatus::Unreachable);

        state.online = true;
        assert_eq!(ConnectionStatus::from_state(&state), ConnectionStatus::Online);
        assert_eq!(ConnectionStatus::Online.label(), "Online");
    }

    #[test]
    fn test_status_ignores_sign_in() {
        let state = AuthState {
            user: None,
            online: false,
            checked: true,
        };
        assert_eq!(ConnectionStatus::from_state(&state), ConnectionStatus::Unreachable);
    }
}
