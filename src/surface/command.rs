//! Wire protocol between the engine and the map adapter

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Role of a marker, used by the adapter to pick an icon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Source,
    Destination,
    CurrentLocation,
    TourTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub kind: MarkerKind,
    pub color: String,
    pub scale: f64,
    /// Popup text shown above the marker
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl MarkerStyle {
    pub fn for_kind(kind: MarkerKind) -> Self {
        let (color, scale) = match kind {
            MarkerKind::Source => ("#2E7D32", 1.0),
            MarkerKind::Destination => ("#C62828", 1.0),
            MarkerKind::CurrentLocation => ("#1565C0", 0.8),
            MarkerKind::TourTarget => ("#0000FF", 1.2),
        };

        Self {
            kind,
            color: color.to_string(),
            scale,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub opacity: f64,
    pub weight: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#0066CC".to_string(),
            opacity: 0.8,
            weight: 6.0,
        }
    }
}

/// Closed set of imperative map commands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SurfaceCommand {
    AddMarker {
        id: String,
        position: Coordinate,
        style: MarkerStyle,
    },
    RemoveMarker {
        id: String,
    },
    AddLine {
        id: String,
        path: Vec<Coordinate>,
        style: LineStyle,
    },
    RemoveLine {
        id: String,
    },
    /// Animated camera transition
    FlyTo {
        center: Coordinate,
        zoom: f64,
        pitch: f64,
        bearing: f64,
        duration_ms: u64,
    },
    /// Instantaneous camera move, used for rotation frames
    JumpTo {
        center: Coordinate,
        bearing: f64,
    },
    FitBounds {
        points: Vec<Coordinate>,
        padding: f64,
    },
    SetView {
        center: Coordinate,
        zoom: f64,
    },
}

impl SurfaceCommand {
    /// Serializes the command as one JSON object
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// True for commands that move the camera rather than the overlay
    pub fn is_camera(&self) -> bool {
        matches!(
            self,
            SurfaceCommand::FlyTo { .. }
                | SurfaceCommand::JumpTo { .. }
                | SurfaceCommand::FitBounds { .. }
                | SurfaceCommand::SetView { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_tagging() {
        let cmd = SurfaceCommand::RemoveMarker {
            id: "route-source".to_string(),
        };
        assert_eq!(cmd.to_json().unwrap(), r#"{"type":"remove_marker","id":"route-source"}"#);
    }

    #[test]
    fn test_json_parse() {
        let json = r#"{"type":"jump_to","center":{"latitude":12.5,"longitude":80.2},"bearing":15.0}"#;
        let cmd: SurfaceCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            SurfaceCommand::JumpTo {
                center: Coordinate::new(12.5, 80.2),
                bearing: 15.0,
            }
        );
        assert!(cmd.is_camera());
    }

    #[test]
    fn test_marker_label_omitted_when_absent() {
        let style = MarkerStyle::for_kind(MarkerKind::Source);
        let json = serde_json::to_string(&style).unwrap();
        assert!(!json.contains("label"));
        assert!(json.contains(r#""kind":"source""#));
    }

    #[test]
    fn test_default_line_style() {
        let style = LineStyle::default();
        assert_eq!(style.color, "#0066CC");
        assert_eq!(style.weight, 6.0);
    }
}
