//! Detail payloads surfaced when an entity is selected.
//!
//! This is the external contract with the popup/detail presentation
//! collaborator: a flat string map plus the entity kind, so the
//! presenter needs no knowledge of hazard domain types.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hazard_map_dataset_models::{HazardReport, Hotspot};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Which kind of entity a payload describes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    /// An individual hazard report.
    Report,
    /// A density hotspot.
    Hotspot,
}

/// Detail payload shown when a rendered entity is selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailPayload {
    /// Kind of entity this payload describes.
    pub kind: EntityKind,
    /// Display fields, keyed by camelCase field name.
    pub fields: BTreeMap<String, String>,
}

impl DetailPayload {
    /// Builds the popup payload for a hazard report.
    #[must_use]
    pub fn for_report(report: &HazardReport) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), report.title.clone());
        fields.insert("description".to_string(), report.description.clone());
        fields.insert("severity".to_string(), report.severity.to_string());
        fields.insert("status".to_string(), report.status.to_string());
        fields.insert(
            "reportedAt".to_string(),
            format_timestamp(report.reported_at),
        );
        Self {
            kind: EntityKind::Report,
            fields,
        }
    }

    /// Builds the popup payload for a hotspot.
    ///
    /// Intensity is shown as a whole percentage of the clamped value, so
    /// an out-of-range provider value caps at 100%.
    #[must_use]
    pub fn for_hotspot(hotspot: &Hotspot) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let pct = (hotspot.clamped_intensity() * 100.0).round() as u32;

        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), hotspot.title.clone());
        fields.insert(
            "reportCount".to_string(),
            hotspot.report_count.to_string(),
        );
        fields.insert("intensity".to_string(), format!("{pct}%"));
        Self {
            kind: EntityKind::Hotspot,
            fields,
        }
    }
}

/// Human-readable UTC timestamp for popup display.
fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use hazard_map_dataset_models::GeoPoint;
    use hazard_map_hazard_models::{HazardKind, HazardSeverity, ReportStatus};

    #[test]
    fn report_payload_carries_display_fields() {
        let report = HazardReport {
            id: "1".to_string(),
            kind: HazardKind::Tsunami,
            severity: HazardSeverity::Critical,
            location: GeoPoint::new(8.5241, 76.9366),
            title: "Tsunami Warning".to_string(),
            description: "High waves observed near Kochi".to_string(),
            reported_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            status: ReportStatus::Verified,
        };
        let payload = DetailPayload::for_report(&report);
        assert_eq!(payload.kind, EntityKind::Report);
        assert_eq!(payload.fields["title"], "Tsunami Warning");
        assert_eq!(payload.fields["severity"], "critical");
        assert_eq!(payload.fields["status"], "verified");
        assert_eq!(payload.fields["reportedAt"], "2024-01-15 10:30 UTC");
    }

    #[test]
    fn hotspot_payload_rounds_intensity_percentage() {
        let mut hotspot = Hotspot {
            id: "h1".to_string(),
            location: GeoPoint::new(13.0827, 80.2707),
            intensity: 0.8,
            report_count: 15,
            title: "Chennai Bay Area".to_string(),
        };
        let payload = DetailPayload::for_hotspot(&hotspot);
        assert_eq!(payload.kind, EntityKind::Hotspot);
        assert_eq!(payload.fields["intensity"], "80%");
        assert_eq!(payload.fields["reportCount"], "15");

        // Out-of-range intensity caps at 100%.
        hotspot.intensity = 1.5;
        let payload = DetailPayload::for_hotspot(&hotspot);
        assert_eq!(payload.fields["intensity"], "100%");
    }
}
