//! Route orchestration
//!
//! [`RouteEngine`] is the context object for one map screen. It owns the
//! overlay, the camera animator and the request-token counter, and turns a
//! (source, destination) selection into at most one overlay replacement.
//!
//! Every request takes a fresh token before it suspends. When the directions
//! call returns, the route is applied only if that token is still the latest
//! issued; otherwise it is dropped and reported as
//! [`RouteOutcome::Superseded`]. A request that fails after a newer one was
//! issued is reported the same way. Failed requests never touch the overlay.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::camera::CameraAnimator;
use crate::config::EngineConfig;
use crate::device::{self, LocationProvider};
use crate::directions::{route_geometry, DirectionsService};
use crate::error::{Error, Result};
use crate::geo::{is_within_bounds, Coordinate};
use crate::locations::{LocationTable, SymbolicLocation};
use crate::overlay::{OverlayManager, OverlayState};
use crate::surface::RenderSurface;
use crate::types::{RequestToken, Route, RouteEndpoints, RouteOutcome};

pub struct RouteEngine {
    directions: Arc<dyn DirectionsService>,
    locations: LocationTable,
    config: EngineConfig,
    overlay: OverlayManager,
    camera: CameraAnimator,
    latest_token: AtomicU64,
}

impl RouteEngine {
    pub fn new(
        directions: Arc<dyn DirectionsService>,
        surface: Arc<dyn RenderSurface>,
        locations: LocationTable,
        config: EngineConfig,
    ) -> Result<Self> {
        config.tour.validate()?;

        Ok(Self {
            directions,
            overlay: OverlayManager::new(surface.clone(), config.view.clone()),
            camera: CameraAnimator::new(surface, config.tour.clone()),
            locations,
            config,
            latest_token: AtomicU64::new(0),
        })
    }

    /// Fetches the walking route between two keys and applies it if still current.
    ///
    /// `live` is the device's last known position; it is needed when either key
    /// is [`SymbolicLocation::CurrentLocation`] and is drawn as the
    /// current-location marker when inside the geofence.
    pub async fn request_route(
        &self,
        source: &SymbolicLocation,
        destination: &SymbolicLocation,
        live: Option<Coordinate>,
    ) -> Result<RouteOutcome> {
        let token = self.issue_token();
        info!(token, %source, %destination, "route requested");

        let endpoints = self
            .resolve_endpoints(source, destination, live)
            .inspect_err(|e| warn!(token, error = %e, "route request failed"))?;

        match self.fetch_and_apply(token, source, destination, endpoints).await {
            Err(e) if token != self.latest_token() => {
                debug!(token, error = %e, "superseded request failed; dropping");
                Ok(RouteOutcome::Superseded { token })
            }
            result => result.inspect_err(|e| warn!(token, error = %e, "route request failed")),
        }
    }

    fn resolve_endpoints(
        &self,
        source: &SymbolicLocation,
        destination: &SymbolicLocation,
        live: Option<Coordinate>,
    ) -> Result<RouteEndpoints> {
        Ok(RouteEndpoints {
            source: self.resolve(source, live)?,
            destination: self.resolve(destination, live)?,
            current: live.filter(|p| is_within_bounds(*p, &self.config.bounds)),
        })
    }

    async fn fetch_and_apply(
        &self,
        token: RequestToken,
        source: &SymbolicLocation,
        destination: &SymbolicLocation,
        endpoints: RouteEndpoints,
    ) -> Result<RouteOutcome> {
        let response = self
            .directions
            .walking_route(endpoints.source, endpoints.destination)
            .await?;
        let path = route_geometry(&response)?;

        let route = Route {
            source: source.clone(),
            destination: destination.clone(),
            token,
            path,
        };

        if self.overlay.apply_if_latest(&route, endpoints, &self.latest_token) {
            Ok(RouteOutcome::Applied(route))
        } else {
            info!(token, latest = self.latest_token(), "route superseded; not applied");
            Ok(RouteOutcome::Superseded { token })
        }
    }

    /// Resolves a key to a coordinate, gating the live location on the geofence
    pub fn resolve(&self, location: &SymbolicLocation, live: Option<Coordinate>) -> Result<Coordinate> {
        match location {
            SymbolicLocation::Named(key) => self.locations.coordinate(key),
            SymbolicLocation::CurrentLocation => {
                let point = live.ok_or(Error::LocationUnavailable)?;
                if is_within_bounds(point, &self.config.bounds) {
                    Ok(point)
                } else {
                    debug!(lat = point.latitude, lng = point.longitude, "live location outside campus");
                    Err(Error::OutOfBounds(point))
                }
            }
        }
    }

    /// Gets a fresh device fix and clears the map back to the campus view.
    /// On error nothing changes.
    pub async fn refresh_live_location<P: LocationProvider + ?Sized>(&self, provider: &P) -> Result<Coordinate> {
        let position = device::locate(provider).await?;
        self.reset();
        Ok(position)
    }

    /// Stops any tour, clears the overlay, returns to the default view and
    /// invalidates in-flight requests
    pub fn reset(&self) {
        let token = self.issue_token();
        debug!(token, "reset invalidates in-flight routes");
        self.camera.cancel();
        self.overlay.reset();
    }

    /// Flies to `location` and orbits it. Returns the tour id.
    pub fn start_tour(&self, location: &SymbolicLocation, live: Option<Coordinate>) -> Result<u64> {
        let target = self.resolve(location, live)?;
        let label = self.locations.display_name(location).map(str::to_string);

        self.overlay.set_tour_target(target, label);
        Ok(self.camera.start_tour(target))
    }

    pub fn cancel_tour(&self) {
        self.camera.cancel();
    }

    pub fn latest_token(&self) -> RequestToken {
        self.latest_token.load(Ordering::SeqCst)
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay.snapshot()
    }

    pub fn camera(&self) -> &CameraAnimator {
        &self.camera
    }

    pub fn locations(&self) -> &LocationTable {
        &self.locations
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn issue_token(&self) -> RequestToken {
        self.latest_token.fetch_add(1, Ordering::SeqCst) + 1
    }
}
