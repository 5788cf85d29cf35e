//! # Client configuration: API base URL
//!
//! The client talks to a single REST endpoint. Its location comes from one
//! externally supplied override (`NOTES_API_URL`, baked in at build time for the
//! web target, or `api_url` in a `notes.toml` document), validated by
//! [`ClientConfig::base_url`]:
//!
//! 1. An override must be an absolute `http(s)` URL or a root-relative path
//!    (`/something`). Anything else is ignored.
//! 2. In a production build an override pointing at a local-only host
//!    (`localhost`, `*.localhost`, loopback, `0.0.0.0`) is ignored, so a stray
//!    development value never ships.
//! 3. Otherwise the fixed relative root [`DEFAULT_API_ROOT`] is used.
//!
//! Root-relative results still need an origin before an HTTP stack can use
//! them; [`ClientConfig::resolve_against`] joins them to the page origin.
//!
//! ```toml
//! api_url = "https://notes.example.com/api"
//! production = true
//! ```

use std::net::IpAddr;

use serde::{Deserialize, Serialize};
use url::{Host, Url};

/// Relative API root used when no acceptable override is configured.
pub const DEFAULT_API_ROOT: &str = "/api";

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Endpoint override. `None` or empty means "use the default root".
    #[serde(default)]
    pub api_url: Option<String>,
    /// Whether this is a production build.
    #[serde(default)]
    pub production: bool,
}

impl ClientConfig {
    pub fn new(api_url: Option<String>, production: bool) -> Self {
        Self {
            api_url,
            production,
        }
    }

    /// Configuration baked into the binary: `NOTES_API_URL` at compile time,
    /// production when built without debug assertions.
    pub fn from_build_env() -> Self {
        Self::new(
            option_env!("NOTES_API_URL").map(str::to_string),
            !cfg!(debug_assertions),
        )
    }

    /// Parse from a `notes.toml` document.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// The base URL to use, after validating the override. May be
    /// root-relative; trailing slashes are trimmed.
    pub fn base_url(&self) -> String {
        let Some(raw) = self.api_url.as_deref().map(str::trim) else {
            return DEFAULT_API_ROOT.to_string();
        };
        if raw.is_empty() {
            return DEFAULT_API_ROOT.to_string();
        }

        if raw.starts_with('/') && !raw.starts_with("//") {
            return trim_slashes(raw);
        }

        match Url::parse(raw) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => {
                if self.production && is_local_host(&url) {
                    return DEFAULT_API_ROOT.to_string();
                }
                trim_slashes(raw)
            }
            _ => DEFAULT_API_ROOT.to_string(),
        }
    }

    /// The base URL as an absolute URL. Root-relative bases are joined to
    /// `origin` (e.g. `https://app.example.com`); returns `None` when the base
    /// is relative and no usable origin is known.
    pub fn resolve_against(&self, origin: Option<&str>) -> Option<String> {
        let base = self.base_url();
        if !base.starts_with('/') {
            return Some(base);
        }
        let origin = origin?.trim().trim_end_matches('/');
        let parsed = Url::parse(origin).ok()?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return None;
        }
        Some(format!("{origin}{base}"))
    }
}

fn trim_slashes(raw: &str) -> String {
    let trimmed = raw.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Whether the URL points at an address only reachable from this machine.
pub fn is_local_host(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => {
            let domain = domain.to_ascii_lowercase();
            domain == "localhost" || domain.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => IpAddr::V4(ip).is_loopback() || ip.is_unspecified(),
        Some(Host::Ipv6(ip)) => IpAddr::V6(ip).is_loopback() || ip.is_unspecified(),
        None => false,
    }
}
