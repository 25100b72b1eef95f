//! Walking-directions service access
//!
//! [`DirectionsService`] is the seam between the orchestrator and the network.
//! It returns the raw response; [`route_geometry`] applies the success rules.

pub mod client;

use async_trait::async_trait;

use crate::api::models::DirectionsResponse;
use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::polyline;

pub use client::HttpDirectionsClient;

/// One walking-route lookup, single attempt.
///
/// Implementations map transport failures to [`Error::Network`] and non-2xx
/// answers to [`Error::Http`].
#[async_trait]
pub trait DirectionsService: Send + Sync {
    async fn walking_route(&self, origin: Coordinate, destination: Coordinate) -> Result<DirectionsResponse>;
}

/// Extracts and decodes the first route's geometry
pub fn route_geometry(response: &DirectionsResponse) -> Result<Vec<Coordinate>> {
    if !response.status.eq_ignore_ascii_case(DirectionsResponse::SUCCESS) {
        return Err(Error::RouteNotFound(response.status.clone()));
    }

    let route = response
        .routes
        .first()
        .ok_or_else(|| Error::RouteNotFound("no routes in response".to_string()))?;

    let path = polyline::decode(&route.overview_polyline)?;
    if path.is_empty() {
        return Err(Error::RouteNotFound("empty route geometry".to_string()));
    }

    Ok(path)
}
