//! Campus geofence

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Box described by its two literal corners.
///
/// On this campus the `ne` corner carries the larger latitude and the smaller
/// longitude, so containment compares each axis against the corner values as
/// stored rather than deriving min/max.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub ne: Coordinate,
    pub sw: Coordinate,
}

/// Fixed campus extent
pub const CAMPUS_BOUNDS: BoundingBox = BoundingBox {
    ne: Coordinate::new(12.882300720316172, 80.21333939608719),
    sw: Coordinate::new(12.864758610349512, 80.22775364730131),
};

impl BoundingBox {
    pub const fn new(ne: Coordinate, sw: Coordinate) -> Self {
        Self { ne, sw }
    }

    /// Checks whether `point` lies inside the box (edges inclusive)
    pub fn contains(&self, point: Coordinate) -> bool {
        is_within_bounds(point, self)
    }

    /// Midpoint of the two corners
    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.ne.latitude + self.sw.latitude) / 2.0,
            (self.ne.longitude + self.sw.longitude) / 2.0,
        )
    }
}

/// Point-in-box test against the literal corners.
pub fn is_within_bounds(point: Coordinate, bounds: &BoundingBox) -> bool {
    point.latitude <= bounds.ne.latitude
        && point.latitude >= bounds.sw.latitude
        && point.longitude >= bounds.ne.longitude
        && point.longitude <= bounds.sw.longitude
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_corners_are_inside() {
        assert!(is_within_bounds(CAMPUS_BOUNDS.ne, &CAMPUS_BOUNDS));
        assert!(is_within_bounds(CAMPUS_BOUNDS.sw, &CAMPUS_BOUNDS));
    }

    #[test]
    fn test_interior_point() {
        assert!(CAMPUS_BOUNDS.contains(CAMPUS_BOUNDS.center()));
        assert!(CAMPUS_BOUNDS.contains(Coordinate::new(12.87279953771407, 80.2208933391326)));
    }

    #[test]
    fn test_just_outside_each_edge() {
        let c = CAMPUS_BOUNDS.center();
        let north = Coordinate::new(CAMPUS_BOUNDS.ne.latitude + EPS, c.longitude);
        let south = Coordinate::new(CAMPUS_BOUNDS.sw.latitude - EPS, c.longitude);
        let west = Coordinate::new(c.latitude, CAMPUS_BOUNDS.ne.longitude - EPS);
        let east = Coordinate::new(c.latitude, CAMPUS_BOUNDS.sw.longitude + EPS);

        for point in [north, south, west, east] {
            assert!(!is_within_bounds(point, &CAMPUS_BOUNDS), "{:?}", point);
        }
    }

    #[test]
    fn test_monotonic_along_latitude() {
        let lng = CAMPUS_BOUNDS.center().longitude;
        let mut inside_seen = false;
        let mut exited = false;
        let steps = 200;
        let lo = CAMPUS_BOUNDS.sw.latitude - 0.01;
        let hi = CAMPUS_BOUNDS.ne.latitude + 0.01;

        for i in 0..=steps {
            let lat = lo + (hi - lo) * i as f64 / steps as f64;
            let inside = is_within_bounds(Coordinate::new(lat, lng), &CAMPUS_BOUNDS);
            if inside {
                assert!(!exited, "re-entered box at lat {}", lat);
                inside_seen = true;
            } else if inside_seen {
                exited = true;
            }
        }

        assert!(inside_seen && exited);
    }

    #[test]
    fn test_far_away_point() {
        assert!(!is_within_bounds(Coordinate::new(0.0, 0.0), &CAMPUS_BOUNDS));
    }
}
