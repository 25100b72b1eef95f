//! Device location access

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Granted,
    Denied,
}

/// Platform location service
#[async_trait]
pub trait LocationProvider: Send + Sync {
    async fn request_permission(&self) -> Permission;

    /// Current fix, or `None` if the platform has none
    async fn current_position(&self) -> Option<Coordinate>;
}

/// Asks for permission, then for a fix
pub async fn locate<P: LocationProvider + ?Sized>(provider: &P) -> Result<Coordinate> {
    if provider.request_permission().await == Permission::Denied {
        warn!("location permission denied");
        return Err(Error::PermissionDenied);
    }

    let position = provider
        .current_position()
        .await
        .filter(Coordinate::is_finite)
        .ok_or(Error::LocationUnavailable)?;

    debug!(lat = position.latitude, lng = position.longitude, "device located");
    Ok(position)
}

/// Provider with a fixed answer, for tests and desktop runs
#[derive(Debug, Clone)]
pub struct FixedLocationProvider {
    pub permission: Permission,
    pub position: Option<Coordinate>,
}

impl FixedLocationProvider {
    pub fn at(position: Coordinate) -> Self {
        Self {
            permission: Permission::Granted,
            position: Some(position),
        }
    }

    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            position: None,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            permission: Permission::Granted,
            position: None,
        }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request_permission(&self) -> Permission {
        self.permission
    }

    async fn current_position(&self) -> Option<Coordinate> {
        self.position
    }
}
