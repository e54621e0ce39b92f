#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Embedded seed data provider.
//!
//! Supplies the working set of hazard reports and hotspots from a TOML
//! document embedded at compile time. Decoding is lenient per entry: a
//! malformed report or hotspot (missing field, bad enum value) is logged
//! and skipped, so partial provider data degrades to fewer markers
//! instead of a broken map.

use hazard_map_dataset_models::{HazardReport, Hotspot};
use serde::Deserialize;
use thiserror::Error;

/// Embedded seed document: the Indian-coast demo dataset.
const COASTAL_INDIA_TOML: &str = include_str!("../data/coastal_india.toml");

/// Errors from the seed provider.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The document itself failed to parse as TOML.
    #[error("Seed document is not valid TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A decoded seed data set.
#[derive(Debug, Clone, Default)]
pub struct SeedBundle {
    /// Successfully decoded reports, in document order.
    pub reports: Vec<HazardReport>,
    /// Successfully decoded hotspots, in document order.
    pub hotspots: Vec<Hotspot>,
}

/// Raw document shape: entries stay as TOML values so one bad entry
/// cannot fail the whole document.
#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    reports: Vec<toml::Value>,
    #[serde(default)]
    hotspots: Vec<toml::Value>,
}

/// Returns the embedded seed bundle.
///
/// # Panics
///
/// Panics if the embedded TOML document fails to parse. Since it is a
/// compile-time constant, a parse failure indicates a development error
/// and is caught during CI.
#[must_use]
pub fn embedded() -> SeedBundle {
    parse(COASTAL_INDIA_TOML).expect("Failed to parse embedded seed document")
}

/// Decodes a seed document, skipping malformed entries.
///
/// # Errors
///
/// Returns [`SeedError::Parse`] only when the document as a whole is not
/// valid TOML; individual malformed entries are logged and skipped.
pub fn parse(toml_str: &str) -> Result<SeedBundle, SeedError> {
    let file: SeedFile = toml::de::from_str(toml_str)?;

    let reports = decode_entries(file.reports, "report");
    let hotspots = decode_entries(file.hotspots, "hotspot");

    log::info!(
        "Seed provider loaded {} reports, {} hotspots",
        reports.len(),
        hotspots.len()
    );

    Ok(SeedBundle { reports, hotspots })
}

/// Decodes each entry independently; failures are warned and skipped.
fn decode_entries<T: serde::de::DeserializeOwned>(
    values: Vec<toml::Value>,
    label: &str,
) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match value.try_into() {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping malformed seed {label} at index {idx}: {e}");
                None
            }
        })
        .collect()
}
