//! Core data types for campus-route-sync

use crate::geo::Coordinate;
use crate::locations::SymbolicLocation;

/// Identifier of one route request; larger is newer
pub type RequestToken = u64;

/// Decoded walking route for one request
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub source: SymbolicLocation,
    pub destination: SymbolicLocation,
    pub token: RequestToken,
    /// Path geometry, source to destination
    pub path: Vec<Coordinate>,
}

impl Route {
    /// Approximate walking length in meters (haversine over the path)
    pub fn length_meters(&self) -> f64 {
        self.path.windows(2).map(|w| haversine_meters(w[0], w[1])).sum()
    }
}

/// Resolved positions that accompany a route onto the overlay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteEndpoints {
    pub source: Coordinate,
    pub destination: Coordinate,
    /// Device position, shown when known and inside the geofence
    pub current: Option<Coordinate>,
}

/// Result of a route request that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum RouteOutcome {
    /// The route is now on the overlay
    Applied(Route),
    /// A newer request was issued while this one was in flight; nothing was applied
    Superseded { token: RequestToken },
}

impl RouteOutcome {
    pub fn applied(&self) -> Option<&Route> {
        match self {
            RouteOutcome::Applied(route) => Some(route),
            RouteOutcome::Superseded { .. } => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, RouteOutcome::Superseded { .. })
    }
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;

fn haversine_meters(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(path: Vec<Coordinate>) -> Route {
        Route {
            source: SymbolicLocation::named("Block2"),
            destination: SymbolicLocation::named("Library"),
            token: 1,
            path,
        }
    }

    #[test]
    fn test_route_length() {
        // one hundredth of a degree of latitude is about 1.11 km
        let r = route(vec![Coordinate::new(12.87, 80.22), Coordinate::new(12.88, 80.22)]);
        let len = r.length_meters();
        assert!((len - 1111.9).abs() < 1.0, "{}", len);
    }

    #[test]
    fn test_route_length_degenerate() {
        assert_eq!(route(vec![]).length_meters(), 0.0);
        assert_eq!(route(vec![Coordinate::new(1.0, 1.0)]).length_meters(), 0.0);
    }

    #[test]
    fn test_outcome_accessors() {
        let applied = RouteOutcome::Applied(route(vec![]));
        assert!(applied.applied().is_some());
        assert!(!applied.is_superseded());

        let superseded = RouteOutcome::Superseded { token: 4 };
        assert!(superseded.applied().is_none());
        assert!(superseded.is_superseded());
    }
}
