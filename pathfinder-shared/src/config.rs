//! Where the route service and the airport list live.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::RouteError;

const DEFAULT_ROUTE_BASE: &str = "http://127.0.0.1:5000/";
const DEFAULT_AIRPORTS_PATH: &str = "/airports.txt";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base address of the pathfinding service. Route paths are joined onto it, so it should end
    /// with a `/`.
    #[serde(default = "default_route_base")]
    pub route_base: Url,

    /// Site the airport list is served from. The browser fetches same-origin and ignores this.
    #[serde(default)]
    pub site_base: Option<Url>,

    #[serde(default = "default_airports_path")]
    pub airports_path: String,

    /// Request timeout for the native client.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_route_base() -> Url {
    Url::parse(DEFAULT_ROUTE_BASE).expect("default route service address is a valid URL")
}

fn default_airports_path() -> String {
    DEFAULT_AIRPORTS_PATH.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            route_base: default_route_base(),
            site_base: None,
            airports_path: default_airports_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ServiceConfig {
    pub fn with_route_base(route_base: Url) -> Self {
        Self {
            route_base,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn site(mut self, site_base: Url) -> Self {
        self.site_base = Some(site_base);
        self
    }

    /// Absolute address of the airport list for clients that have no origin of their own.
    pub fn airports_url(&self) -> Result<Url, RouteError> {
        let base = self.site_base.as_ref().unwrap_or(&self.route_base);
        base.join(&self.airports_path)
            .map_err(|e| RouteError::InvalidAddress(e.to_string()))
    }
}
