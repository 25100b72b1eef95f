//! Route overlay ownership
//!
//! The overlay (markers plus route line) is only ever replaced as a whole:
//! everything previously drawn is removed, then the new set is drawn, all under
//! one lock. Two overlapping requests can therefore never leave markers from
//! one and a line from the other.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, info};

use crate::config::ViewConfig;
use crate::geo::Coordinate;
use crate::surface::{LineStyle, MarkerKind, MarkerStyle, RenderSurface};
use crate::types::{RequestToken, Route, RouteEndpoints};

pub const SOURCE_MARKER_ID: &str = "route-source";
pub const DESTINATION_MARKER_ID: &str = "route-destination";
pub const CURRENT_MARKER_ID: &str = "current-location";
pub const TOUR_MARKER_ID: &str = "tour-target";
pub const ROUTE_LINE_ID: &str = "route-line";

/// A marker as last sent to the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: &'static str,
    pub position: Coordinate,
    pub style: MarkerStyle,
}

/// The route line as last sent to the surface
#[derive(Debug, Clone, PartialEq)]
pub struct RouteLine {
    pub id: &'static str,
    pub path: Vec<Coordinate>,
    /// Request the line came from
    pub token: RequestToken,
}

/// What is currently drawn
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverlayState {
    pub source: Option<Marker>,
    pub destination: Option<Marker>,
    pub current: Option<Marker>,
    pub tour_target: Option<Marker>,
    pub route_line: Option<RouteLine>,
}

impl OverlayState {
    pub fn is_empty(&self) -> bool {
        self.markers().next().is_none() && self.route_line.is_none()
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        [&self.source, &self.destination, &self.current, &self.tour_target]
            .into_iter()
            .flatten()
    }
}

/// Owns [`OverlayState`] and mirrors every change onto the render surface
pub struct OverlayManager {
    surface: Arc<dyn RenderSurface>,
    state: Mutex<OverlayState>,
    view: ViewConfig,
    line_style: LineStyle,
}

impl OverlayManager {
    pub fn new(surface: Arc<dyn RenderSurface>, view: ViewConfig) -> Self {
        Self {
            surface,
            state: Mutex::new(OverlayState::default()),
            view,
            line_style: LineStyle::default(),
        }
    }

    /// Replaces the whole overlay with `route` and its endpoints
    pub fn apply_route(&self, route: &Route, endpoints: RouteEndpoints) {
        let mut state = self.lock();
        self.replace(&mut state, route, endpoints);
    }

    /// Applies `route` only if its token is still the latest issued.
    ///
    /// The comparison and the replacement happen under the same lock, so a
    /// newer request that finishes concurrently is applied strictly after.
    pub fn apply_if_latest(&self, route: &Route, endpoints: RouteEndpoints, latest: &AtomicU64) -> bool {
        let mut state = self.lock();

        let current = latest.load(Ordering::SeqCst);
        if route.token != current {
            debug!(token = route.token, latest = current, "dropping superseded route");
            return false;
        }

        self.replace(&mut state, route, endpoints);
        true
    }

    /// Clears the overlay and returns the camera to the default campus view
    pub fn reset(&self) {
        let mut state = self.lock();
        self.clear(&mut state);
        self.surface
            .set_view(self.view.default_center, self.view.default_zoom);
        info!("overlay reset to default view");
    }

    /// Places (or moves) the tour target marker without touching the route
    pub fn set_tour_target(&self, position: Coordinate, label: Option<String>) {
        let mut state = self.lock();

        if state.tour_target.take().is_some() {
            self.surface.remove_marker(TOUR_MARKER_ID);
        }

        let style = MarkerStyle::for_kind(MarkerKind::TourTarget);
        let style = match label {
            Some(label) => style.with_label(label),
            None => style,
        };
        state.tour_target = Some(self.draw_marker(TOUR_MARKER_ID, position, style));
    }

    pub fn clear_tour_target(&self) {
        let mut state = self.lock();
        if state.tour_target.take().is_some() {
            self.surface.remove_marker(TOUR_MARKER_ID);
        }
    }

    /// Copy of what is drawn right now
    pub fn snapshot(&self) -> OverlayState {
        self.lock().clone()
    }

    fn replace(&self, state: &mut OverlayState, route: &Route, endpoints: RouteEndpoints) {
        self.clear(state);

        let mut next = OverlayState {
            source: Some(self.draw_marker(
                SOURCE_MARKER_ID,
                endpoints.source,
                MarkerStyle::for_kind(MarkerKind::Source),
            )),
            destination: Some(self.draw_marker(
                DESTINATION_MARKER_ID,
                endpoints.destination,
                MarkerStyle::for_kind(MarkerKind::Destination),
            )),
            ..OverlayState::default()
        };

        if let Some(current) = endpoints.current {
            next.current = Some(self.draw_marker(
                CURRENT_MARKER_ID,
                current,
                MarkerStyle::for_kind(MarkerKind::CurrentLocation),
            ));
        }

        self.surface
            .add_line(ROUTE_LINE_ID, route.path.clone(), self.line_style.clone());
        next.route_line = Some(RouteLine {
            id: ROUTE_LINE_ID,
            path: route.path.clone(),
            token: route.token,
        });

        if let Some(padding) = self.view.fit_padding {
            if !route.path.is_empty() {
                self.surface.fit_bounds(route.path.clone(), padding);
            }
        }

        *state = next;
        info!(
            token = route.token,
            source = %route.source,
            destination = %route.destination,
            points = route.path.len(),
            "route overlay replaced"
        );
    }

    fn clear(&self, state: &mut OverlayState) {
        for marker in state.markers() {
            self.surface.remove_marker(marker.id);
        }
        if let Some(line) = &state.route_line {
            self.surface.remove_line(line.id);
        }
        *state = OverlayState::default();
    }

    fn draw_marker(&self, id: &'static str, position: Coordinate, style: MarkerStyle) -> Marker {
        self.surface.add_marker(id, position, style.clone());
        Marker { id, position, style }
    }

    fn lock(&self) -> MutexGuard<'_, OverlayState> {
        // State is rebuilt wholesale on every write, so a poisoned guard still holds a consistent overlay
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locations::SymbolicLocation;
    use crate::surface::{RecordingSurface, SurfaceCommand};

    fn setup() -> (Arc<RecordingSurface>, OverlayManager) {
        let surface = Arc::new(RecordingSurface::new());
        let view = ViewConfig {
            fit_padding: None,
            ..ViewConfig::default()
        };
        let overlay = OverlayManager::new(surface.clone(), view);
        (surface, overlay)
    }

    fn route(token: RequestToken) -> Route {
        Route {
            source: SymbolicLocation::named("Block2"),
            destination: SymbolicLocation::named("Library"),
            token,
            path: vec![Coordinate::new(12.8728, 80.2209), Coordinate::new(12.8736, 80.2192)],
        }
    }

    fn endpoints(current: Option<Coordinate>) -> RouteEndpoints {
        RouteEndpoints {
            source: Coordinate::new(12.8728, 80.2209),
            destination: Coordinate::new(12.8736, 80.2192),
            current,
        }
    }

    #[test]
    fn test_apply_on_empty_overlay() {
        let (surface, overlay) = setup();
        overlay.apply_route(&route(1), endpoints(None));

        let commands = surface.take();
        assert_eq!(commands.len(), 3);
        assert!(matches!(&commands[0], SurfaceCommand::AddMarker { id, .. } if id == SOURCE_MARKER_ID));
        assert!(matches!(&commands[1], SurfaceCommand::AddMarker { id, .. } if id == DESTINATION_MARKER_ID));
        assert!(matches!(&commands[2], SurfaceCommand::AddLine { id, .. } if id == ROUTE_LINE_ID));

        let state = overlay.snapshot();
        assert!(state.current.is_none());
        assert_eq!(state.route_line.unwrap().token, 1);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let (surface, overlay) = setup();
        let current = Some(Coordinate::new(12.873, 80.221));

        overlay.apply_route(&route(1), endpoints(current));
        let once = overlay.snapshot();
        let first_adds = surface.take();

        overlay.apply_route(&route(1), endpoints(current));
        let twice = overlay.snapshot();
        let second = surface.take();

        assert_eq!(once, twice);
        // second pass removes the four elements then redraws the identical set
        let removes = second
            .iter()
            .filter(|c| matches!(c, SurfaceCommand::RemoveMarker { .. } | SurfaceCommand::RemoveLine { .. }))
            .count();
        assert_eq!(removes, 4);
        assert_eq!(&second[removes..], &first_adds[..]);
    }

    #[test]
    fn test_replace_drops_stale_current_marker() {
        let (surface, overlay) = setup();
        overlay.apply_route(&route(1), endpoints(Some(Coordinate::new(12.873, 80.221))));
        surface.take();

        overlay.apply_route(&route(2), endpoints(None));
        let state = overlay.snapshot();
        assert!(state.current.is_none());
        assert_eq!(state.route_line.as_ref().map(|l| l.token), Some(2));
        assert!(surface
            .take()
            .iter()
            .any(|c| matches!(c, SurfaceCommand::RemoveMarker { id } if id == CURRENT_MARKER_ID)));
    }

    #[test]
    fn test_apply_if_latest() {
        let (_surface, overlay) = setup();
        let latest = AtomicU64::new(2);

        assert!(!overlay.apply_if_latest(&route(1), endpoints(None), &latest));
        assert!(overlay.snapshot().is_empty());

        assert!(overlay.apply_if_latest(&route(2), endpoints(None), &latest));
        assert_eq!(overlay.snapshot().route_line.unwrap().token, 2);
    }

    #[test]
    fn test_reset() {
        let (surface, overlay) = setup();
        overlay.apply_route(&route(1), endpoints(None));
        surface.take();

        overlay.reset();
        assert!(overlay.snapshot().is_empty());

        let commands = surface.take();
        assert_eq!(
            commands.last(),
            Some(&SurfaceCommand::SetView {
                center: ViewConfig::default().default_center,
                zoom: 17.0,
            })
        );
    }

    #[test]
    fn test_fit_bounds_after_apply() {
        let surface = Arc::new(RecordingSurface::new());
        let overlay = OverlayManager::new(surface.clone(), ViewConfig::default());
        overlay.apply_route(&route(1), endpoints(None));

        assert!(matches!(
            surface.take().last(),
            Some(SurfaceCommand::FitBounds { padding, .. }) if *padding == 40.0
        ));
    }

    #[test]
    fn test_tour_target_replaced() {
        let (surface, overlay) = setup();
        overlay.set_tour_target(Coordinate::new(1.0, 1.0), Some("Library".to_string()));
        overlay.set_tour_target(Coordinate::new(2.0, 2.0), None);

        let commands = surface.take();
        assert_eq!(commands.len(), 3);
        assert!(matches!(&commands[1], SurfaceCommand::RemoveMarker { id } if id == TOUR_MARKER_ID));
        assert_eq!(
            overlay.snapshot().tour_target.map(|m| m.position),
            Some(Coordinate::new(2.0, 2.0))
        );

        overlay.clear_tour_target();
        assert!(overlay.snapshot().is_empty());
    }
}
