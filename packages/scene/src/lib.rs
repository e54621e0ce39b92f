#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Render scene construction and the map surface adapter.
//!
//! [`RenderScene::build`] turns a query snapshot into renderable
//! geometry: classified point markers for reports and proportional
//! circles for hotspots, each carrying the detail payload surfaced on
//! selection. [`renderer::MapRenderer`] diffs consecutive scenes onto a
//! [`surface::MapSurface`].

pub mod payload;
pub mod renderer;
pub mod surface;

use hazard_map_dataset_models::{GeoPoint, QuerySnapshot};
use hazard_map_hazard_models::{VisualEncoding, classify};
use serde::{Deserialize, Serialize};

pub use payload::{DetailPayload, EntityKind};
pub use renderer::MapRenderer;
pub use surface::{MapSurface, SurfaceError, SurfaceHandle};

/// Fixed visual style for hotspot circles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleStyle {
    /// Fill color as a `#rrggbb` hex string.
    pub fill_hex: &'static str,
    /// Fill opacity, [0, 1].
    pub fill_opacity: f64,
    /// Stroke width in pixels.
    pub stroke_weight: f64,
    /// Stroke opacity, [0, 1].
    pub stroke_opacity: f64,
}

/// The one hotspot style; hotspots are not classified by severity.
pub const HOTSPOT_STYLE: CircleStyle = CircleStyle {
    fill_hex: "#dc2626",
    fill_opacity: 0.3,
    stroke_weight: 2.0,
    stroke_opacity: 0.7,
};

/// Scene construction configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneConfig {
    /// Linear factor from clamped intensity to circle radius, in
    /// distance units of the rendering surface.
    pub radius_scale: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self { radius_scale: 50.0 }
    }
}

/// A classified report rendered as a point marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMarker {
    /// Entity id, unique within a scene.
    pub id: String,
    /// Marker position.
    pub position: GeoPoint,
    /// Visual encoding from the classifier.
    pub encoding: VisualEncoding,
    /// Popup payload surfaced on selection.
    pub detail: DetailPayload,
}

/// A hotspot rendered as a proportional circle.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotspotCircle {
    /// Entity id, unique within a scene.
    pub id: String,
    /// Circle center.
    pub center: GeoPoint,
    /// Radius in surface distance units; linear in clamped intensity.
    pub radius: f64,
    /// Fixed circle style.
    pub style: CircleStyle,
    /// Popup payload surfaced on selection.
    pub detail: DetailPayload,
}

/// Either renderable entity, for id-keyed scene diffing.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    /// A report marker.
    Marker(ReportMarker),
    /// A hotspot circle.
    Circle(HotspotCircle),
}

impl SceneNode {
    /// The node's detail payload.
    #[must_use]
    pub const fn detail(&self) -> &DetailPayload {
        match self {
            Self::Marker(marker) => &marker.detail,
            Self::Circle(circle) => &circle.detail,
        }
    }

    /// The node's entity id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Marker(marker) => &marker.id,
            Self::Circle(circle) => &circle.id,
        }
    }
}

/// A complete renderable scene: the full visible set for one query.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderScene {
    /// Report markers, draw-ordered lowest severity first.
    pub markers: Vec<ReportMarker>,
    /// Hotspot circles.
    pub circles: Vec<HotspotCircle>,
}

impl RenderScene {
    /// Builds the scene for a query snapshot.
    ///
    /// Each report is classified into its visual encoding; each hotspot
    /// gets a radius linear in its clamped intensity. Markers are sorted
    /// by draw-order hint so higher severities paint on top.
    #[must_use]
    pub fn build(snapshot: &QuerySnapshot, config: &SceneConfig) -> Self {
        let mut markers: Vec<ReportMarker> = snapshot
            .reports
            .iter()
            .map(|report| ReportMarker {
                id: report.id.clone(),
                position: report.location,
                encoding: classify(report.kind, report.severity),
                detail: DetailPayload::for_report(report),
            })
            .collect();
        markers.sort_by_key(|m| m.encoding.z_index_hint);

        let circles = snapshot
            .hotspots
            .iter()
            .map(|hotspot| HotspotCircle {
                id: hotspot.id.clone(),
                center: hotspot.location,
                radius: hotspot.clamped_intensity() * config.radius_scale,
                style: HOTSPOT_STYLE,
                detail: DetailPayload::for_hotspot(hotspot),
            })
            .collect();

        Self { markers, circles }
    }

    /// Total number of renderable entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len() + self.circles.len()
    }

    /// Returns `true` if the scene has nothing to draw.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty() && self.circles.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{TimeZone, Utc};
    use hazard_map_dataset_models::{GeoPoint, HazardReport, Hotspot, QuerySnapshot};
    use hazard_map_hazard_models::{HazardKind, HazardSeverity, ReportStatus};

    /// A snapshot mirroring the embedded seed set: three reports, two
    /// hotspots.
    pub fn snapshot() -> QuerySnapshot {
        QuerySnapshot {
            reports: vec![
                HazardReport {
                    id: "1".to_string(),
                    kind: HazardKind::Tsunami,
                    severity: HazardSeverity::Critical,
                    location: GeoPoint::new(8.5241, 76.9366),
                    title: "Tsunami Warning".to_string(),
                    description: "High waves observed near Kochi".to_string(),
                    reported_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
                    status: ReportStatus::Verified,
                },
                HazardReport {
                    id: "2".to_string(),
                    kind: HazardKind::Cyclone,
                    severity: HazardSeverity::High,
                    location: GeoPoint::new(22.5726, 88.3639),
                    title: "Cyclone Formation".to_string(),
                    description: "Cyclone developing in Bay of Bengal".to_string(),
                    reported_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 15, 0).unwrap(),
                    status: ReportStatus::Pending,
                },
            ],
            hotspots: vec![
                Hotspot {
                    id: "h1".to_string(),
                    location: GeoPoint::new(13.0827, 80.2707),
                    intensity: 0.8,
                    report_count: 15,
                    title: "Chennai Bay Area".to_string(),
                },
                Hotspot {
                    id: "h2".to_string(),
                    location: GeoPoint::new(15.2993, 74.124),
                    intensity: 0.6,
                    report_count: 8,
                    title: "Goa Coastline".to_string(),
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hazard_map_dataset_models::{GeoPoint, Hotspot};
    use hazard_map_hazard_models::{MarkerGlyph, color};

    #[test]
    fn build_classifies_each_report() {
        let scene = RenderScene::build(&test_support::snapshot(), &SceneConfig::default());
        assert_eq!(scene.markers.len(), 2);
        assert_eq!(scene.circles.len(), 2);

        let critical = scene.markers.iter().find(|m| m.id == "1").unwrap();
        assert_eq!(critical.encoding.glyph, MarkerGlyph::Wave);
        assert_eq!(critical.encoding.color_hex, color::DANGER);
    }

    #[test]
    fn markers_paint_higher_severity_last() {
        let scene = RenderScene::build(&test_support::snapshot(), &SceneConfig::default());
        let hints: Vec<u8> = scene.markers.iter().map(|m| m.encoding.z_index_hint).collect();
        assert!(hints.windows(2).all(|w| w[0] <= w[1]));
    }

    fn hotspot_with_intensity(intensity: f64) -> Hotspot {
        Hotspot {
            id: "h".to_string(),
            location: GeoPoint::new(13.0, 80.0),
            intensity,
            report_count: 1,
            title: "Test".to_string(),
        }
    }

    #[test]
    fn radius_is_monotone_in_intensity() {
        let config = SceneConfig::default();
        let radii: Vec<f64> = [0.0, 0.2, 0.5, 0.8, 1.0]
            .iter()
            .map(|&i| {
                let snapshot = QuerySnapshot {
                    reports: Vec::new(),
                    hotspots: vec![hotspot_with_intensity(i)],
                };
                RenderScene::build(&snapshot, &config).circles[0].radius
            })
            .collect();
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn out_of_range_intensity_clamps_to_full_radius() {
        let config = SceneConfig::default();
        let build = |intensity: f64| {
            let snapshot = QuerySnapshot {
                reports: Vec::new(),
                hotspots: vec![hotspot_with_intensity(intensity)],
            };
            RenderScene::build(&snapshot, &config).circles[0].radius
        };
        assert!((build(1.5) - build(1.0)).abs() < f64::EPSILON);
        assert!((build(1.0) - config.radius_scale).abs() < f64::EPSILON);
        assert!(build(-0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn scene_serializes_for_downstream_tooling() {
        let scene = RenderScene::build(&test_support::snapshot(), &SceneConfig::default());
        let json = serde_json::to_string(&scene).unwrap();
        assert!(json.contains("\"colorHex\":\"#dc2626\""));
        assert!(json.contains("\"radius\""));
    }
}
