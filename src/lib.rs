//! campus-route-sync - walking-route synchronization for an embedded campus map
//!
//! The engine resolves symbolic campus locations, fetches a walking route from
//! a directions service, decodes its polyline geometry and keeps the map
//! overlay in step with the latest selection. It also drives a cancellable
//! fly-to-and-orbit camera tour. Drawing is delegated to a render surface that
//! receives typed [`SurfaceCommand`]s.
//!
//! # Examples
//!
//! ## Requesting a route
//!
//! ```no_run
//! use std::sync::Arc;
//! use campus_route_sync::{
//!     ChannelSurface, EngineConfig, HttpDirectionsClient, LocationTable, RouteEngine,
//!     SymbolicLocation,
//! };
//!
//! # async fn demo() -> campus_route_sync::Result<()> {
//! let (surface, commands) = ChannelSurface::new();
//! let engine = RouteEngine::new(
//!     Arc::new(HttpDirectionsClient::from_env()?),
//!     Arc::new(surface),
//!     LocationTable::campus_default(),
//!     EngineConfig::default(),
//! )?;
//!
//! let outcome = engine
//!     .request_route(
//!         &SymbolicLocation::named("Block2"),
//!         &SymbolicLocation::named("CentreForAdvancedStudies"),
//!         None,
//!     )
//!     .await?;
//!
//! if let Some(route) = outcome.applied() {
//!     println!("{} points, {:.0} m", route.path.len(), route.length_meters());
//! }
//! for command in commands.try_iter() {
//!     println!("{}", command.to_json().unwrap_or_default());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Decoding a polyline
//!
//! ```
//! let points = campus_route_sync::polyline::decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@")?;
//! assert_eq!(points.len(), 3);
//! # Ok::<(), campus_route_sync::polyline::DecodeError>(())
//! ```

pub mod error;
pub mod types;
pub mod geo;
pub mod polyline;
pub mod locations;
pub mod surface;
pub mod overlay;
pub mod camera;
pub mod directions;
pub mod device;
pub mod config;
pub mod logging;
pub mod orchestrator;
pub mod api;

pub use error::{Error, Result};
pub use types::{RequestToken, Route, RouteEndpoints, RouteOutcome};
pub use geo::{is_within_bounds, BoundingBox, Coordinate, CAMPUS_BOUNDS};
pub use locations::{LocationEntry, LocationTable, SymbolicLocation};
pub use surface::{ChannelSurface, RecordingSurface, RenderSurface, SurfaceCommand};
pub use overlay::{OverlayManager, OverlayState};
pub use camera::{AnimationPhase, AnimationState, CameraAnimator, FrameStatus};
pub use directions::{DirectionsService, HttpDirectionsClient};
pub use device::{LocationProvider, Permission};
pub use config::{DirectionsConfig, EngineConfig, TourConfig, ViewConfig};
pub use orchestrator::RouteEngine;
