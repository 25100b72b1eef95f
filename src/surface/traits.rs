//! Render surface trait

use super::command::{LineStyle, MarkerStyle, SurfaceCommand};
use crate::geo::Coordinate;

/// Sink for map commands.
///
/// Implementors only provide [`submit`](RenderSurface::submit); the typed
/// helpers build the matching [`SurfaceCommand`]. Delivery is fire-and-forget:
/// the engine's state is authoritative, not the surface's.
pub trait RenderSurface: Send + Sync {
    fn submit(&self, command: SurfaceCommand);

    fn add_marker(&self, id: &str, position: Coordinate, style: MarkerStyle) {
        self.submit(SurfaceCommand::AddMarker {
            id: id.to_string(),
            position,
            style,
        });
    }

    fn remove_marker(&self, id: &str) {
        self.submit(SurfaceCommand::RemoveMarker { id: id.to_string() });
    }

    fn add_line(&self, id: &str, path: Vec<Coordinate>, style: LineStyle) {
        self.submit(SurfaceCommand::AddLine {
            id: id.to_string(),
            path,
            style,
        });
    }

    fn remove_line(&self, id: &str) {
        self.submit(SurfaceCommand::RemoveLine { id: id.to_string() });
    }

    fn fly_to(&self, center: Coordinate, zoom: f64, pitch: f64, bearing: f64, duration_ms: u64) {
        self.submit(SurfaceCommand::FlyTo {
            center,
            zoom,
            pitch,
            bearing,
            duration_ms,
        });
    }

    fn jump_to(&self, center: Coordinate, bearing: f64) {
        self.submit(SurfaceCommand::JumpTo { center, bearing });
    }

    fn fit_bounds(&self, points: Vec<Coordinate>, padding: f64) {
        self.submit(SurfaceCommand::FitBounds { points, padding });
    }

    fn set_view(&self, center: Coordinate, zoom: f64) {
        self.submit(SurfaceCommand::SetView { center, zoom });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use std::sync::Arc;

    #[test]
    fn test_helpers_build_commands() {
        let surface = RecordingSurface::new();
        surface.set_view(Coordinate::new(1.0, 2.0), 17.0);
        surface.remove_line("route-line");

        assert_eq!(
            surface.take(),
            vec![
                SurfaceCommand::SetView {
                    center: Coordinate::new(1.0, 2.0),
                    zoom: 17.0,
                },
                SurfaceCommand::RemoveLine {
                    id: "route-line".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_shared_trait_object() {
        let surface = Arc::new(RecordingSurface::new());
        let shared: Arc<dyn RenderSurface> = surface.clone();
        shared.jump_to(Coordinate::new(0.0, 0.0), 90.0);

        assert_eq!(surface.len(), 1);
    }
}
