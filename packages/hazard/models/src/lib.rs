#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Hazard taxonomy types and visual classification rules.
//!
//! This crate defines the canonical hazard kind and severity enums used
//! across the entire hazard-map system, plus the pure [`classify`] function
//! that maps a `(kind, severity)` pair to the visual encoding (glyph, color,
//! draw order) a renderer uses for that entity.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Severity level for a hazard report, from 1 (low) to 4 (critical).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HazardSeverity {
    /// Level 1: Minimal risk, informational reports
    Low = 1,
    /// Level 2: Localized impact, monitor conditions
    Medium = 2,
    /// Level 3: Significant danger, action recommended
    High = 3,
    /// Level 4: Life-threatening, immediate action required
    Critical = 4,
}

impl HazardSeverity {
    /// Returns the numeric value of this severity level.
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Creates a severity level from a numeric value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not in the range 1-4.
    pub const fn from_value(value: u8) -> Result<Self, InvalidSeverityError> {
        match value {
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Critical),
            _ => Err(InvalidSeverityError { value }),
        }
    }

    /// Returns the marker color for this severity level.
    ///
    /// Only `Critical` and `High` get distinct colors; all lower levels
    /// collapse to the shared caution color. Widening to a four-tier
    /// palette is a local change here.
    #[must_use]
    pub const fn color_hex(self) -> &'static str {
        match self {
            Self::Critical => color::DANGER,
            Self::High => color::WARNING,
            Self::Medium | Self::Low => color::CAUTION,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High, Self::Critical]
    }
}

/// Error returned when attempting to create a [`HazardSeverity`] from an
/// invalid numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSeverityError {
    /// The invalid severity value that was provided.
    pub value: u8,
}

impl std::fmt::Display for InvalidSeverityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid severity value {}: expected 1-4", self.value)
    }
}

impl std::error::Error for InvalidSeverityError {}

/// Kind of hazard a report describes.
///
/// `Other` is the catch-all for report kinds the map has no dedicated
/// glyph for; it renders with the generic warning glyph rather than
/// failing classification.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum HazardKind {
    /// Seismic sea wave or abnormal wave activity
    Tsunami,
    /// Rotating storm system (cyclone, hurricane, typhoon)
    Cyclone,
    /// Inundation from sea, river, or rainfall
    Flood,
    /// Any hazard without a dedicated map treatment. Unrecognized kind
    /// strings from a provider collapse here instead of failing to
    /// decode.
    #[serde(other)]
    Other,
}

impl HazardKind {
    /// Returns the marker glyph for this hazard kind.
    #[must_use]
    pub const fn glyph(self) -> MarkerGlyph {
        match self {
            Self::Tsunami => MarkerGlyph::Wave,
            Self::Cyclone => MarkerGlyph::Spiral,
            Self::Flood => MarkerGlyph::Droplet,
            Self::Other => MarkerGlyph::Warning,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Tsunami, Self::Cyclone, Self::Flood, Self::Other]
    }
}

/// Verification status of a hazard report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportStatus {
    /// Submitted but not yet confirmed by an authority
    Pending,
    /// Confirmed by an authority or corroborating reports
    Verified,
}

/// A named, toggleable category of entities shown on the map.
///
/// The layer universe is closed: unknown layer ids fail to parse at the
/// string boundary and never reach layer state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MapLayer {
    /// Individual point hazard reports
    Reports,
    /// Aggregate report-density hotspots
    Hotspots,
}

impl MapLayer {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Reports, Self::Hotspots]
    }
}

/// Glyph drawn inside a report marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkerGlyph {
    /// Tsunami marker
    Wave,
    /// Cyclone marker
    Spiral,
    /// Flood marker
    Droplet,
    /// Generic hazard marker
    Warning,
}

impl MarkerGlyph {
    /// Returns the display symbol for this glyph.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Wave => "\u{1f30a}",
            Self::Spiral => "\u{1f300}",
            Self::Droplet => "\u{1f4a7}",
            Self::Warning => "\u{26a0}\u{fe0f}",
        }
    }
}

/// Marker color palette shared by the classifier and map legend.
pub mod color {
    /// Critical severity marker color.
    pub const DANGER: &str = "#dc2626";
    /// High severity marker color.
    pub const WARNING: &str = "#ea580c";
    /// Medium/low severity marker color.
    pub const CAUTION: &str = "#eab308";
}

/// Visual encoding for a classified hazard entity, independent of
/// rendering technology.
///
/// Serialize-only: encodings are derived per render, never read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualEncoding {
    /// Glyph drawn inside the marker.
    pub glyph: MarkerGlyph,
    /// Marker fill color as a `#rrggbb` hex string.
    pub color_hex: &'static str,
    /// Draw-order hint; higher values render on top.
    pub z_index_hint: u8,
}

/// Maps a hazard's `(kind, severity)` pair to its visual encoding.
///
/// Total over both enums: every pair produces an encoding, unrecognized
/// kinds having already collapsed to [`HazardKind::Other`] at the parse
/// boundary. Pure and deterministic.
#[must_use]
pub const fn classify(kind: HazardKind, severity: HazardSeverity) -> VisualEncoding {
    VisualEncoding {
        glyph: kind.glyph(),
        color_hex: severity.color_hex(),
        z_index_hint: severity.value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_is_total_and_deterministic() {
        for kind in HazardKind::all() {
            for severity in HazardSeverity::all() {
                let first = classify(*kind, *severity);
                let second = classify(*kind, *severity);
                assert_eq!(first, second, "{kind:?}/{severity:?} not deterministic");
                assert!(!first.color_hex.is_empty());
            }
        }
    }

    #[test]
    fn severity_colors_collapse_below_high() {
        assert_eq!(HazardSeverity::Critical.color_hex(), color::DANGER);
        assert_eq!(HazardSeverity::High.color_hex(), color::WARNING);
        assert_eq!(HazardSeverity::Medium.color_hex(), color::CAUTION);
        assert_eq!(
            HazardSeverity::Low.color_hex(),
            HazardSeverity::Medium.color_hex(),
            "medium and low share the caution tier"
        );
    }

    #[test]
    fn glyph_mapping_matches_kind() {
        assert_eq!(HazardKind::Tsunami.glyph(), MarkerGlyph::Wave);
        assert_eq!(HazardKind::Cyclone.glyph(), MarkerGlyph::Spiral);
        assert_eq!(HazardKind::Flood.glyph(), MarkerGlyph::Droplet);
        assert_eq!(HazardKind::Other.glyph(), MarkerGlyph::Warning);
    }

    #[test]
    fn z_index_follows_severity_order() {
        let encodings: Vec<u8> = HazardSeverity::all()
            .iter()
            .map(|s| classify(HazardKind::Flood, *s).z_index_hint)
            .collect();
        assert!(
            encodings.windows(2).all(|w| w[0] < w[1]),
            "higher severity must draw on top"
        );
    }

    #[test]
    fn severity_from_value_roundtrip() {
        for v in 1..=4u8 {
            let severity = HazardSeverity::from_value(v).unwrap();
            assert_eq!(severity.value(), v);
        }
        assert!(HazardSeverity::from_value(0).is_err());
        assert!(HazardSeverity::from_value(5).is_err());
    }

    #[test]
    fn layer_ids_parse_lowercase() {
        assert_eq!("reports".parse::<MapLayer>().unwrap(), MapLayer::Reports);
        assert_eq!("hotspots".parse::<MapLayer>().unwrap(), MapLayer::Hotspots);
        assert!("traffic".parse::<MapLayer>().is_err());
    }
}
