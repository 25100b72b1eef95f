//! reqwest-backed directions client

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Client;
use tracing::{debug, warn};

use super::DirectionsService;
use crate::api::models::{DirectionsQuery, DirectionsResponse};
use crate::config::DirectionsConfig;
use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// HTTP client for the walking-directions endpoint.
///
/// Sends one `POST` per lookup with the route parameters in the query string
/// and an empty body. No retries; the configured timeout bounds each call.
pub struct HttpDirectionsClient {
    http: Client,
    config: DirectionsConfig,
}

impl HttpDirectionsClient {
    pub fn new(config: DirectionsConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(DirectionsConfig::from_env()?)
    }

    pub fn config(&self) -> &DirectionsConfig {
        &self.config
    }

    fn query(&self, origin: Coordinate, destination: Coordinate) -> DirectionsQuery {
        DirectionsQuery {
            origin: origin.to_query_value(),
            destination: destination.to_query_value(),
            mode: "walking".to_string(),
            alternatives: false,
            steps: true,
            overview: "full".to_string(),
            language: Some(self.config.language.clone()),
            traffic_metadata: Some(false),
            api_key: self.config.api_key.clone(),
        }
    }
}

#[async_trait]
impl DirectionsService for HttpDirectionsClient {
    async fn walking_route(&self, origin: Coordinate, destination: Coordinate) -> Result<DirectionsResponse> {
        let query = self.query(origin, destination);
        debug!(origin = %query.origin, destination = %query.destination, "requesting walking route");

        let response = self
            .http
            .post(&self.config.endpoint)
            .query(&query)
            .header(ACCEPT, "application/json")
            .body("")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "directions service returned error status");
            return Err(Error::Http(status.as_u16()));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| Error::MalformedResponse(e.to_string()))
    }
}
