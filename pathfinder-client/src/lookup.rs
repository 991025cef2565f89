//! Lookup module to communicate with the pathfinding service.
//!
//! The service does the actual A* search. We only build the request and read back whatever it
//! decided.

use std::time::Duration;

use log::{debug, info};
use pathfinder_shared::{
    interpret_airports, interpret_route_response, AirportError, AirportList, RouteError,
    RouteOutcome, RouteQuery, ServiceConfig,
};
use url::Url;

#[async_trait::async_trait]
pub trait RouteLookup: Send + Sync {
    async fn find_routes(&self, query: &RouteQuery) -> Result<RouteOutcome, RouteError>;
    async fn load_airports(&self) -> Result<AirportList, AirportError>;
}

/// Talks to the real service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRouteLookup {
    config: ServiceConfig,
    client: reqwest::Client,
}

impl HttpRouteLookup {
    pub fn new(config: ServiceConfig) -> Result<Self, RouteError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| RouteError::Unreachable(e.to_string()))?;

        Ok(HttpRouteLookup { config, client })
    }

    pub fn with_route_base(route_base: Url) -> Result<Self, RouteError> {
        Self::new(ServiceConfig::with_route_base(route_base))
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl RouteLookup for HttpRouteLookup {
    async fn find_routes(&self, query: &RouteQuery) -> Result<RouteOutcome, RouteError> {
        let url = query.route_url(&self.config.route_base)?;

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RouteError::Unreachable(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| RouteError::Unreachable(e.to_string()))?;

        debug!("Response from route service ({}): {}", status, body);
        interpret_route_response(status, &body)
    }

    async fn load_airports(&self) -> Result<AirportList, AirportError> {
        let url = self
            .config
            .airports_url()
            .map_err(|e| AirportError::Unreachable(e.detail()))?;

        let resp = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| AirportError::Unreachable(e.to_string()))?;

        let status = resp.status().as_u16();
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AirportError::Unreachable(e.to_string()))?;
        let text = std::str::from_utf8(&bytes).ok();

        let airports = interpret_airports(status, text)?;
        info!("Loaded {} airports from {}", airports.len(), url);
        Ok(airports)
    }
}
