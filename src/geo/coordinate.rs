use serde::{Deserialize, Serialize};

/// A WGS84 position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from latitude/longitude in degrees
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Creates a coordinate from a `[lat, lng]` pair
    pub fn from_pair(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }

    /// Formats the coordinate as the `lat,lng` query value used by directions services
    pub fn to_query_value(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }

    /// Parses a `lat,lng` query value
    pub fn parse_query_value(value: &str) -> Option<Self> {
        let (lat, lng) = value.split_once(',')?;
        let latitude = lat.trim().parse().ok()?;
        let longitude = lng.trim().parse().ok()?;
        Some(Self::new(latitude, longitude))
    }

    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_value() {
        let coord = Coordinate::new(12.5, 80.25);
        assert_eq!(coord.to_query_value(), "12.5,80.25");
        assert_eq!(Coordinate::parse_query_value("12.5,80.25"), Some(coord));
    }

    #[test]
    fn test_parse_query_value_rejects_garbage() {
        assert_eq!(Coordinate::parse_query_value("12.5"), None);
        assert_eq!(Coordinate::parse_query_value("a,b"), None);
    }

    #[test]
    fn test_from_pair() {
        let coord = Coordinate::from_pair([12.872502, 80.219496]);
        assert_eq!(coord.latitude, 12.872502);
        assert_eq!(coord.longitude, 80.219496);
    }
}
