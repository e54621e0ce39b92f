//! Entity storage behind the [`EntityStore`] trait.
//!
//! The dataset's query contract is independent of how entities are held.
//! [`VecStore`] is a plain linear scan, right for the data scale this map
//! works at. [`RTreeStore`] keeps the same contract but answers
//! bounding-box queries through an R-tree, the shape production-scale
//! viewport queries need.

use hazard_map_dataset_models::{BoundingBox, HazardReport, Hotspot};
use rstar::{AABB, RTree, RTreeObject};

/// Storage abstraction for the spatial dataset.
///
/// Implementations own the entity collections and answer whole-set and
/// bounding-box reads. They never mutate individual entities; the only
/// write is a wholesale [`EntityStore::replace`] from the external
/// refresh seam.
pub trait EntityStore {
    /// Replaces the stored collections wholesale.
    fn replace(&mut self, reports: Vec<HazardReport>, hotspots: Vec<Hotspot>);

    /// All stored reports.
    fn reports(&self) -> Vec<&HazardReport>;

    /// All stored hotspots.
    fn hotspots(&self) -> Vec<&Hotspot>;

    /// Reports whose location lies inside `bounds`.
    fn reports_in(&self, bounds: &BoundingBox) -> Vec<&HazardReport>;

    /// Hotspots whose center lies inside `bounds`.
    fn hotspots_in(&self, bounds: &BoundingBox) -> Vec<&Hotspot>;
}

/// Linear-scan store. O(n) per query, no index maintenance.
#[derive(Debug, Default)]
pub struct VecStore {
    reports: Vec<HazardReport>,
    hotspots: Vec<Hotspot>,
}

impl VecStore {
    /// Creates a store over the given collections.
    #[must_use]
    pub const fn new(reports: Vec<HazardReport>, hotspots: Vec<Hotspot>) -> Self {
        Self { reports, hotspots }
    }
}

impl EntityStore for VecStore {
    fn replace(&mut self, reports: Vec<HazardReport>, hotspots: Vec<Hotspot>) {
        self.reports = reports;
        self.hotspots = hotspots;
    }

    fn reports(&self) -> Vec<&HazardReport> {
        self.reports.iter().collect()
    }

    fn hotspots(&self) -> Vec<&Hotspot> {
        self.hotspots.iter().collect()
    }

    fn reports_in(&self, bounds: &BoundingBox) -> Vec<&HazardReport> {
        self.reports
            .iter()
            .filter(|r| bounds.contains(r.location))
            .collect()
    }

    fn hotspots_in(&self, bounds: &BoundingBox) -> Vec<&Hotspot> {
        self.hotspots
            .iter()
            .filter(|h| bounds.contains(h.location))
            .collect()
    }
}

/// A report stored in the R-tree keyed by its position.
struct ReportEntry {
    envelope: AABB<[f64; 2]>,
    report: HazardReport,
}

impl RTreeObject for ReportEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// A hotspot stored in the R-tree keyed by its center.
struct HotspotEntry {
    envelope: AABB<[f64; 2]>,
    hotspot: Hotspot,
}

impl RTreeObject for HotspotEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// R-tree-backed store. Bounding-box queries touch only the envelope
/// intersection instead of scanning every entity.
pub struct RTreeStore {
    reports: RTree<ReportEntry>,
    hotspots: RTree<HotspotEntry>,
}

impl RTreeStore {
    /// Builds R-trees over the given collections.
    #[must_use]
    pub fn new(reports: Vec<HazardReport>, hotspots: Vec<Hotspot>) -> Self {
        let report_entries = reports
            .into_iter()
            .map(|report| ReportEntry {
                envelope: AABB::from_point([report.location.longitude, report.location.latitude]),
                report,
            })
            .collect();
        let hotspot_entries = hotspots
            .into_iter()
            .map(|hotspot| HotspotEntry {
                envelope: AABB::from_point([
                    hotspot.location.longitude,
                    hotspot.location.latitude,
                ]),
                hotspot,
            })
            .collect();
        Self {
            reports: RTree::bulk_load(report_entries),
            hotspots: RTree::bulk_load(hotspot_entries),
        }
    }
}

impl EntityStore for RTreeStore {
    fn replace(&mut self, reports: Vec<HazardReport>, hotspots: Vec<Hotspot>) {
        *self = Self::new(reports, hotspots);
    }

    fn reports(&self) -> Vec<&HazardReport> {
        self.reports.iter().map(|e| &e.report).collect()
    }

    fn hotspots(&self) -> Vec<&Hotspot> {
        self.hotspots.iter().map(|e| &e.hotspot).collect()
    }

    fn reports_in(&self, bounds: &BoundingBox) -> Vec<&HazardReport> {
        let query_env = AABB::from_corners([bounds.west, bounds.south], [bounds.east, bounds.north]);
        self.reports
            .locate_in_envelope_intersecting(&query_env)
            .map(|e| &e.report)
            .collect()
    }

    fn hotspots_in(&self, bounds: &BoundingBox) -> Vec<&Hotspot> {
        let query_env = AABB::from_corners([bounds.west, bounds.south], [bounds.east, bounds.north]);
        self.hotspots
            .locate_in_envelope_intersecting(&query_env)
            .map(|e| &e.hotspot)
            .collect()
    }
}
