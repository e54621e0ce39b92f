#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Spatial dataset: the working collection of hazard entities.
//!
//! Owns the point reports and density hotspots supplied by a data
//! provider, and serves filtered snapshots for a [`ViewQuery`]: layer
//! membership first, then optional viewport bounds, then case-insensitive
//! text search over each report's title, description, and gazetteer place
//! name. Hotspots are never text-filtered; they have no searchable prose
//! fields.
//!
//! Storage sits behind [`EntityStore`] so the linear scan used at this
//! data scale can be swapped for the R-tree store without touching the
//! query contract.

pub mod store;

use std::collections::BTreeSet;

use hazard_map_dataset_models::{HazardReport, Hotspot, QuerySnapshot, ViewQuery};
use hazard_map_gazetteer::Gazetteer;
use hazard_map_hazard_models::MapLayer;

pub use store::{EntityStore, RTreeStore, VecStore};

/// The working set of hazard entities behind the map view.
pub struct SpatialDataset {
    store: Box<dyn EntityStore>,
    gazetteer: Gazetteer,
}

impl SpatialDataset {
    /// Creates a dataset over a linear-scan store.
    ///
    /// Entities with duplicate ids are dropped (first occurrence wins)
    /// with a logged warning.
    #[must_use]
    pub fn new(reports: Vec<HazardReport>, hotspots: Vec<Hotspot>, gazetteer: Gazetteer) -> Self {
        Self::with_store(Box::new(VecStore::default()), reports, hotspots, gazetteer)
    }

    /// Creates a dataset over an R-tree store.
    #[must_use]
    pub fn with_rtree(
        reports: Vec<HazardReport>,
        hotspots: Vec<Hotspot>,
        gazetteer: Gazetteer,
    ) -> Self {
        Self::with_store(
            Box::new(RTreeStore::new(Vec::new(), Vec::new())),
            reports,
            hotspots,
            gazetteer,
        )
    }

    /// Creates a dataset over a caller-supplied store.
    #[must_use]
    pub fn with_store(
        mut store: Box<dyn EntityStore>,
        reports: Vec<HazardReport>,
        hotspots: Vec<Hotspot>,
        gazetteer: Gazetteer,
    ) -> Self {
        let (reports, hotspots) = dedupe_entities(reports, hotspots);
        store.replace(reports, hotspots);
        Self { store, gazetteer }
    }

    /// Replaces the entity collections wholesale.
    ///
    /// This is the external refresh seam: providers rebuild the working
    /// set here; the dataset itself never mutates or deletes individual
    /// entities.
    pub fn replace_entities(&mut self, reports: Vec<HazardReport>, hotspots: Vec<Hotspot>) {
        let (reports, hotspots) = dedupe_entities(reports, hotspots);
        self.store.replace(reports, hotspots);
    }

    /// Serves a filtered, immutable snapshot for the given query.
    ///
    /// An empty active-layer set yields an empty snapshot; an empty
    /// search string matches every report whose layer is active.
    #[must_use]
    pub fn query(&self, query: &ViewQuery) -> QuerySnapshot {
        let needle = query.search_text.trim().to_lowercase();

        let reports = if query.active_layers.contains(&MapLayer::Reports) {
            let candidates = query.bounds.as_ref().map_or_else(
                || self.store.reports(),
                |bounds| self.store.reports_in(bounds),
            );
            candidates
                .into_iter()
                .filter(|report| needle.is_empty() || self.report_matches(report, &needle))
                .cloned()
                .collect()
        } else {
            Vec::new()
        };

        let hotspots = if query.active_layers.contains(&MapLayer::Hotspots) {
            let candidates = query.bounds.as_ref().map_or_else(
                || self.store.hotspots(),
                |bounds| self.store.hotspots_in(bounds),
            );
            candidates.into_iter().cloned().collect()
        } else {
            Vec::new()
        };

        QuerySnapshot { reports, hotspots }
    }

    /// Number of reports in the working set.
    #[must_use]
    pub fn total_reports(&self) -> usize {
        self.store.reports().len()
    }

    /// Number of hotspots in the working set.
    #[must_use]
    pub fn total_hotspots(&self) -> usize {
        self.store.hotspots().len()
    }

    /// Case-insensitive substring match against the report's title,
    /// description, and gazetteer place name.
    fn report_matches(&self, report: &HazardReport, needle: &str) -> bool {
        if report.title.to_lowercase().contains(needle)
            || report.description.to_lowercase().contains(needle)
        {
            return true;
        }
        self.gazetteer
            .place_name(report.location)
            .is_some_and(|place| place.to_lowercase().contains(needle))
    }
}

/// Drops entities whose id was already seen, keeping the first
/// occurrence. Providers are responsible for unique ids; a duplicate is
/// logged and skipped rather than corrupting the working set.
fn dedupe_entities(
    reports: Vec<HazardReport>,
    hotspots: Vec<Hotspot>,
) -> (Vec<HazardReport>, Vec<Hotspot>) {
    let mut seen = BTreeSet::new();
    let reports = reports
        .into_iter()
        .filter(|report| {
            let fresh = seen.insert(report.id.clone());
            if !fresh {
                log::warn!("Dropping report with duplicate id '{}'", report.id);
            }
            fresh
        })
        .collect();

    let mut seen = BTreeSet::new();
    let hotspots = hotspots
        .into_iter()
        .filter(|hotspot| {
            let fresh = seen.insert(hotspot.id.clone());
            if !fresh {
                log::warn!("Dropping hotspot with duplicate id '{}'", hotspot.id);
            }
            fresh
        })
        .collect();

    (reports, hotspots)
}
