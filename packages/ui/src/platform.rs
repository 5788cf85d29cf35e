//! Platform-specific construction of the session store and API client.
//!
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorageStore`],
//!   relative API roots resolved against the page origin
//! - **Native**: a JSON file under `<data_dir>/notes/`, relative roots
//!   resolved against [`NATIVE_ORIGIN`]

use api::{ApiClient, ReqwestTransport, SessionContext, WebClient};
use store::{ClientConfig, SessionStore};

/// Origin assumed for a root-relative API base outside the browser.
pub const NATIVE_ORIGIN: &str = "http://localhost:8000";

/// Durable storage for the session on this platform.
pub fn make_session_store() -> impl SessionStore + Send + Sync + 'static {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        let base = dirs::data_dir()
            .unwrap_or_else(|| std::path::PathBuf::from("."))
            .join("notes");
        store::FileStore::new(base)
    }
}

fn origin() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.location().origin().ok()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        Some(NATIVE_ORIGIN.to_string())
    }
}

/// The absolute base URL for API requests, from the build configuration.
pub fn api_base_url(config: &ClientConfig) -> String {
    config
        .resolve_against(origin().as_deref())
        .unwrap_or_else(|| config.base_url())
}

/// Restore the session and build the client that every view shares.
pub fn make_client() -> WebClient {
    let config = ClientConfig::from_build_env();
    let base_url = api_base_url(&config);
    tracing::info!(%base_url, production = config.production, "api client configured");
    ApiClient::new(
        base_url,
        SessionContext::restore(make_session_store()),
        ReqwestTransport::default(),
    )
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_relative_root_uses_native_origin() {
        let config = ClientConfig::new(None, false);
        assert_eq!(api_base_url(&config), "http://localhost:8000/api");
    }

    #[test]
    fn test_absolute_override_kept() {
        let config = ClientConfig::new(Some("https://notes.example.com/api/".into()), true);
        assert_eq!(api_base_url(&config), "https://notes.example.com/api");
    }
}
