//! Geographic primitives: coordinates and the campus geofence

pub mod coordinate;
pub mod bounds;

pub use coordinate::Coordinate;
pub use bounds::{is_within_bounds, BoundingBox, CAMPUS_BOUNDS};
