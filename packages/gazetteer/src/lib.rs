#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! In-memory gazetteer for place-name attribution.
//!
//! Holds a registry of named coastal regions (embedded TOML, one file per
//! region), builds an R-tree over their envelopes, and answers "what is
//! this point called" lookups. The dataset's text search matches report
//! locations against these names, so a search for "Kerala" finds reports
//! on the Kerala coast even when neither title nor description mentions
//! it.

use hazard_map_dataset_models::{BoundingBox, GeoPoint};
use rstar::{AABB, RTree, RTreeObject};
use serde::Deserialize;

/// Number of registered regions. Updated when new regions are added.
/// Enforced by a test.
#[cfg(test)]
const EXPECTED_REGION_COUNT: usize = 7;

/// Embedded TOML region definitions.
const REGION_TOMLS: &[(&str, &str)] = &[
    ("kerala_coast", include_str!("../regions/kerala_coast.toml")),
    (
        "west_bengal_coast",
        include_str!("../regions/west_bengal_coast.toml"),
    ),
    ("mumbai_coast", include_str!("../regions/mumbai_coast.toml")),
    ("chennai", include_str!("../regions/chennai.toml")),
    ("goa", include_str!("../regions/goa.toml")),
    (
        "coromandel_coast",
        include_str!("../regions/coromandel_coast.toml"),
    ),
    ("konkan_coast", include_str!("../regions/konkan_coast.toml")),
];

/// A named region as defined in a TOML registry file.
#[derive(Debug, Clone, Deserialize)]
pub struct Region {
    /// Stable region identifier.
    pub id: String,
    /// Human-readable region name; the search target.
    pub name: String,
    /// Western longitude boundary.
    pub west: f64,
    /// Southern latitude boundary.
    pub south: f64,
    /// Eastern longitude boundary.
    pub east: f64,
    /// Northern latitude boundary.
    pub north: f64,
}

impl Region {
    /// The region's envelope as a [`BoundingBox`].
    #[must_use]
    pub const fn bounds(&self) -> BoundingBox {
        BoundingBox::new(self.west, self.south, self.east, self.north)
    }
}

/// A region stored in the R-tree with its precomputed area.
struct RegionEntry {
    region: Region,
    area: f64,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for RegionEntry {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

/// Pre-built spatial index over the named region registry.
///
/// Constructed once and shared across all consumers.
pub struct Gazetteer {
    regions: RTree<RegionEntry>,
}

impl Gazetteer {
    /// Builds the gazetteer from the embedded region registry.
    ///
    /// # Panics
    ///
    /// Panics if any embedded TOML file fails to parse. Since these are
    /// compile-time constants, parse failures indicate a development
    /// error and are caught during CI.
    #[must_use]
    pub fn embedded() -> Self {
        let regions = REGION_TOMLS
            .iter()
            .map(|(name, toml_str)| {
                toml::de::from_str(toml_str)
                    .unwrap_or_else(|e| panic!("Failed to parse region '{name}': {e}"))
            })
            .collect::<Vec<Region>>();
        log::info!("Loaded {} named regions into gazetteer", regions.len());
        Self::from_regions(regions)
    }

    /// Builds a gazetteer from an explicit region list.
    #[must_use]
    pub fn from_regions(regions: Vec<Region>) -> Self {
        let entries = regions
            .into_iter()
            .map(|region| {
                let bounds = region.bounds();
                RegionEntry {
                    envelope: AABB::from_corners(
                        [bounds.west, bounds.south],
                        [bounds.east, bounds.north],
                    ),
                    area: bounds.area(),
                    region,
                }
            })
            .collect();
        Self {
            regions: RTree::bulk_load(entries),
        }
    }

    /// Look up the place name for a point.
    ///
    /// Regions can overlap; the smallest area wins, so a point in Chennai
    /// resolves to "Chennai" rather than the Coromandel Coast that
    /// contains it. Returns `None` outside every registered region.
    #[must_use]
    pub fn place_name(&self, point: GeoPoint) -> Option<&str> {
        let query_env = AABB::from_point([point.longitude, point.latitude]);

        let mut best: Option<&RegionEntry> = None;

        for entry in self.regions.locate_in_envelope_intersecting(&query_env) {
            if entry.region.bounds().contains(point) {
                match best {
                    None => best = Some(entry),
                    Some(current) if entry.area < current.area => {
                        best = Some(entry);
                    }
                    _ => {}
                }
            }
        }

        best.map(|e| e.region.name.as_str())
    }

    /// Returns all registered regions, unordered.
    pub fn regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().map(|e| &e.region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn loads_all_regions() {
        let gazetteer = Gazetteer::embedded();
        assert_eq!(
            gazetteer.regions().count(),
            EXPECTED_REGION_COUNT,
            "Update EXPECTED_REGION_COUNT after adding/removing regions."
        );
    }

    #[test]
    fn region_ids_are_unique() {
        let gazetteer = Gazetteer::embedded();
        let mut seen = BTreeSet::new();
        for region in gazetteer.regions() {
            assert!(
                seen.insert(&region.id),
                "Duplicate region ID: {}",
                region.id
            );
        }
    }

    #[test]
    fn known_points_resolve() {
        let gazetteer = Gazetteer::embedded();
        assert_eq!(
            gazetteer.place_name(GeoPoint::new(8.5241, 76.9366)),
            Some("Kerala Coast")
        );
        assert_eq!(
            gazetteer.place_name(GeoPoint::new(22.5726, 88.3639)),
            Some("West Bengal Coast")
        );
        assert_eq!(
            gazetteer.place_name(GeoPoint::new(19.076, 72.8777)),
            Some("Mumbai Coast")
        );
    }

    #[test]
    fn smallest_region_wins_on_overlap() {
        let gazetteer = Gazetteer::embedded();
        // Chennai sits inside both the Chennai box and the larger
        // Coromandel Coast box.
        assert_eq!(
            gazetteer.place_name(GeoPoint::new(13.0827, 80.2707)),
            Some("Chennai")
        );
        // Goa sits inside both the Goa box and the larger Konkan Coast.
        assert_eq!(
            gazetteer.place_name(GeoPoint::new(15.2993, 74.124)),
            Some("Goa")
        );
    }

    #[test]
    fn uncovered_point_resolves_to_none() {
        let gazetteer = Gazetteer::embedded();
        assert_eq!(gazetteer.place_name(GeoPoint::new(48.85, 2.35)), None);
    }
}
