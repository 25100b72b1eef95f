use serde::{Deserialize, Serialize};

/// Query parameters of a walking-directions request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsQuery {
    /// `lat,lng`
    pub origin: String,
    /// `lat,lng`
    pub destination: String,
    pub mode: String,
    pub alternatives: bool,
    pub steps: bool,
    pub overview: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traffic_metadata: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Directions service response; only the fields the engine consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectionsResponse {
    pub status: String,
    #[serde(default)]
    pub routes: Vec<RouteSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub overview_polyline: String,
}

impl DirectionsResponse {
    pub const SUCCESS: &'static str = "SUCCESS";

    pub fn success(overview_polyline: String) -> Self {
        Self {
            status: Self::SUCCESS.to_string(),
            routes: vec![RouteSummary { overview_polyline }],
        }
    }

    pub fn failure(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            routes: Vec::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
