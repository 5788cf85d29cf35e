//! Session context and connectivity state for the UI.

use std::time::Duration;

use api::{SessionContext, User, WebClient};
use dioxus::prelude::*;

use crate::platform::make_client;

/// How often the service's health endpoint is polled.
const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

/// What the views render from: who is signed in and whether the service
/// answered the last health check.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AuthState {
    pub user: Option<User>,
    /// Whether the server is reachable (last health check succeeded).
    pub online: bool,
    /// Whether at least one health check has completed.
    pub checked: bool,
}

/// Get the current authentication state.
/// Updates when the user logs in or out, including a logout caused by a 401.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// The shared session context.
pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}

/// The shared API client.
pub fn use_api() -> WebClient {
    use_context::<WebClient>()
}

async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Provider component that owns the session and the API client.
/// Wrap your app with this component; everything below can use
/// [`use_auth`], [`use_session`] and [`use_api`].
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let client = use_context_provider(make_client);
    let session = use_context_provider(|| client.session().clone());
    let mut auth_state = use_signal(|| AuthState {
        user: session.user(),
        ..AuthState::default()
    });

    // Mirror the session feed into the signal
    use_future(move || {
        let mut changes = session.subscribe();
        async move {
            while changes.changed().await.is_ok() {
                let user = changes
                    .borrow_and_update()
                    .as_ref()
                    .map(|s| s.user.clone());
                if auth_state.peek().user != user {
                    auth_state.with_mut(|state| state.user = user);
                }
            }
        }
    });

    // Periodic connectivity check
    use_future(move || {
        let client = client.clone();
        async move {
            loop {
                let online = client.health().await;
                let current = auth_state.peek().clone();
                if current.online != online || !current.checked {
                    if current.online != online {
                        tracing::info!(online, "connectivity changed");
                    }
                    auth_state.set(AuthState {
                        online,
                        checked: true,
                        ..current
                    });
                }
                sleep(HEALTH_INTERVAL).await;
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Button to log out the current user. The session gate takes care of
/// leaving the page.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let session = use_session();

    rsx! {
        button {
            class: "{class}",
            onclick: move |_| session.logout(),
            "{label}"
        }
    }
}
