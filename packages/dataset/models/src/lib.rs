#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Hazard entity records and view query shapes.
//!
//! These types represent the entities the spatial dataset holds and the
//! ephemeral query value the interaction controller rebuilds on every
//! input event. They are distinct from the scene types in
//! `hazard_map_scene`, which are derived per render.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use hazard_map_hazard_models::{HazardKind, HazardSeverity, MapLayer, ReportStatus};
use serde::{Deserialize, Serialize};

/// A geographic point in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    /// Latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Longitude in degrees, [-180, 180].
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a new point from the given coordinates.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A geographic bounding box in WGS84 coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl BoundingBox {
    /// Creates a new bounding box from the given coordinates.
    #[must_use]
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Returns `true` if the point lies inside this box (inclusive).
    #[must_use]
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.longitude >= self.west
            && point.longitude <= self.east
            && point.latitude >= self.south
            && point.latitude <= self.north
    }

    /// Approximate area in square degrees, used for smallest-region
    /// tie-breaking.
    #[must_use]
    pub fn area(&self) -> f64 {
        (self.east - self.west).abs() * (self.north - self.south).abs()
    }
}

/// A user- or system-submitted point-in-time observation of a hazard
/// event at a location.
///
/// Immutable once created; updating or deleting a report is an external
/// collaborator's responsibility, surfaced here only as a wholesale
/// dataset refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HazardReport {
    /// Unique report ID.
    pub id: String,
    /// Kind of hazard observed.
    pub kind: HazardKind,
    /// Severity classification.
    pub severity: HazardSeverity,
    /// Where the hazard was observed.
    pub location: GeoPoint,
    /// Short display title.
    pub title: String,
    /// Longer description of the observation.
    pub description: String,
    /// When the report was created.
    pub reported_at: DateTime<Utc>,
    /// Verification status.
    pub status: ReportStatus,
}

/// An aggregate spatial indicator of report density over an area,
/// distinct from individual reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotspot {
    /// Unique hotspot ID.
    pub id: String,
    /// Center of the hotspot area.
    pub location: GeoPoint,
    /// Density intensity; nominally in [0, 1], clamped before use.
    pub intensity: f64,
    /// Number of reports contributing to this hotspot.
    pub report_count: u32,
    /// Short display title.
    pub title: String,
}

impl Hotspot {
    /// Intensity clamped to [0, 1].
    ///
    /// Out-of-range values from a provider are clamped here rather than
    /// rejected, so a bad row degrades to a capped circle instead of a
    /// missing one.
    #[must_use]
    pub fn clamped_intensity(&self) -> f64 {
        self.intensity.clamp(0.0, 1.0)
    }
}

/// Ephemeral query state owned by the interaction controller.
///
/// Rebuilt on every input event and passed by reference into the pure
/// dataset query; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    /// Case-insensitive substring match target; empty matches everything.
    pub search_text: String,
    /// Snapshot of the active layer set.
    pub active_layers: BTreeSet<MapLayer>,
    /// Optional viewport restriction.
    pub bounds: Option<BoundingBox>,
}

impl ViewQuery {
    /// Creates a query with the given search text and active layers,
    /// unrestricted by viewport.
    #[must_use]
    pub const fn new(search_text: String, active_layers: BTreeSet<MapLayer>) -> Self {
        Self {
            search_text,
            active_layers,
            bounds: None,
        }
    }
}

impl Default for ViewQuery {
    /// The default "show everything" query: empty search, all layers
    /// active, no viewport restriction.
    fn default() -> Self {
        Self {
            search_text: String::new(),
            active_layers: MapLayer::all().iter().copied().collect(),
            bounds: None,
        }
    }
}

/// Immutable result of a dataset query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySnapshot {
    /// Reports passing the layer, bounds, and text filters.
    pub reports: Vec<HazardReport>,
    /// Hotspots passing the layer and bounds filters.
    pub hotspots: Vec<Hotspot>,
}

impl QuerySnapshot {
    /// Returns `true` if no entities matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty() && self.hotspots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_contains_is_inclusive() {
        let bbox = BoundingBox::new(70.0, 5.0, 90.0, 25.0);
        assert!(bbox.contains(GeoPoint::new(8.52, 76.94)));
        assert!(bbox.contains(GeoPoint::new(5.0, 70.0)));
        assert!(!bbox.contains(GeoPoint::new(26.0, 80.0)));
        assert!(!bbox.contains(GeoPoint::new(10.0, 60.0)));
    }

    #[test]
    fn intensity_clamps_both_ends() {
        let mut hotspot = Hotspot {
            id: "h1".to_string(),
            location: GeoPoint::new(13.08, 80.27),
            intensity: 1.5,
            report_count: 15,
            title: "Chennai Bay Area".to_string(),
        };
        assert!((hotspot.clamped_intensity() - 1.0).abs() < f64::EPSILON);

        hotspot.intensity = -0.2;
        assert!(hotspot.clamped_intensity().abs() < f64::EPSILON);

        hotspot.intensity = 0.6;
        assert!((hotspot.clamped_intensity() - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    fn default_query_shows_everything() {
        let query = ViewQuery::default();
        assert!(query.search_text.is_empty());
        assert_eq!(query.active_layers.len(), MapLayer::all().len());
        assert!(query.bounds.is_none());
    }
}
