//! Engine configuration

use std::time::Duration;

use crate::error::{Error, Result};
use crate::geo::{BoundingBox, Coordinate, CAMPUS_BOUNDS};

const DEFAULT_DIRECTIONS_URL: &str = "https://api.olamaps.io/routing/v1/directions";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Walking-directions service settings
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    /// Upper bound on one request, connect included
    pub timeout: Duration,
    pub language: String,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_DIRECTIONS_URL.to_string(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            language: "en".to_string(),
        }
    }
}

impl DirectionsConfig {
    /// Defaults overridden by `ROUTESYNC_DIRECTIONS_URL`, `ROUTESYNC_API_KEY`
    /// and `ROUTESYNC_TIMEOUT_SECS`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup("ROUTESYNC_DIRECTIONS_URL") {
            config.endpoint = endpoint;
        }
        if let Some(api_key) = lookup("ROUTESYNC_API_KEY").filter(|k| !k.is_empty()) {
            config.api_key = Some(api_key);
        }
        if let Some(secs) = lookup("ROUTESYNC_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("ROUTESYNC_TIMEOUT_SECS is not a number: {}", secs)))?;
            if secs == 0 {
                return Err(Error::Config("ROUTESYNC_TIMEOUT_SECS must be positive".to_string()));
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Camera tour parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TourConfig {
    pub zoom: f64,
    pub pitch: f64,
    /// Bearing of the fly-to, and where rotation starts and ends
    pub start_bearing: f64,
    pub fly_duration: Duration,
    /// Time from fly-to until rotation begins
    pub settle_delay: Duration,
    /// Degrees advanced per frame; must divide 360
    pub step_degrees: f64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            zoom: 18.0,
            pitch: 60.0,
            start_bearing: -30.0,
            fly_duration: Duration::from_millis(2000),
            settle_delay: Duration::from_millis(2500),
            step_degrees: 0.5,
        }
    }
}

impl TourConfig {
    /// Frames in one full sweep
    pub fn frames_per_revolution(&self) -> u32 {
        (360.0 / self.step_degrees).round() as u32
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.step_degrees > 0.0 && self.step_degrees <= 360.0) {
            return Err(Error::Config(format!("Invalid rotation step: {}", self.step_degrees)));
        }
        let frames = 360.0 / self.step_degrees;
        if (frames - frames.round()).abs() > 1e-9 {
            return Err(Error::Config(format!(
                "Rotation step {} does not divide 360",
                self.step_degrees
            )));
        }
        Ok(())
    }
}

/// Default camera and overlay view settings
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub default_center: Coordinate,
    pub default_zoom: f64,
    /// Padding for fitting the camera to a new route; `None` leaves the camera alone
    pub fit_padding: Option<f64>,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_center: Coordinate::new(12.8741, 80.2234),
            default_zoom: 17.0,
            fit_padding: Some(40.0),
        }
    }
}

/// Everything the route engine needs besides its collaborators
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Geofence for accepting the live location as an endpoint
    pub bounds: BoundingBox,
    pub view: ViewConfig,
    pub tour: TourConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bounds: CAMPUS_BOUNDS,
            view: ViewConfig::default(),
            tour: TourConfig::default(),
        }
    }
}
