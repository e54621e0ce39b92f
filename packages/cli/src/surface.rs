//! Terminal implementation of the map surface.
//!
//! Renders the placed entity set as styled text lines instead of map
//! tiles. Placement and removal mutate an internal arena keyed by
//! handle; [`TerminalSurface::draw`] prints the current frame.

use std::collections::BTreeMap;

use console::{Color, style};
use hazard_map_hazard_models::color;
use hazard_map_scene::{
    DetailPayload, HotspotCircle, MapSurface, ReportMarker, SurfaceError, SurfaceHandle,
};

/// An entity currently placed on the terminal surface.
enum Placed {
    Marker(ReportMarker),
    Circle(HotspotCircle),
}

/// A text-mode rendering surface.
#[derive(Default)]
pub struct TerminalSurface {
    next_handle: u64,
    placed: BTreeMap<u64, Placed>,
    detail: Option<DetailPayload>,
    initialized: bool,
}

impl TerminalSurface {
    /// Creates an uninitialized terminal surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Prints the current frame: one line per entity, then the detail
    /// panel if a selection is shown.
    pub fn draw(&self) {
        if self.placed.is_empty() {
            println!("  (map is empty)");
        }

        let mut markers: Vec<&ReportMarker> = Vec::new();
        let mut circles: Vec<&HotspotCircle> = Vec::new();
        for placed in self.placed.values() {
            match placed {
                Placed::Marker(marker) => markers.push(marker),
                Placed::Circle(circle) => circles.push(circle),
            }
        }
        markers.sort_by_key(|m| std::cmp::Reverse(m.encoding.z_index_hint));

        for marker in markers {
            let severity = marker
                .detail
                .fields
                .get("severity")
                .map_or("?", String::as_str);
            let title = marker.detail.fields.get("title").map_or("?", String::as_str);
            println!(
                "  {} {} [{}] ({:.4}, {:.4})  #{}",
                marker.encoding.glyph.symbol(),
                style(title).bold(),
                style(severity).fg(severity_color(marker.encoding.color_hex)),
                marker.position.latitude,
                marker.position.longitude,
                marker.id,
            );
        }
        for circle in circles {
            let title = circle.detail.fields.get("title").map_or("?", String::as_str);
            println!(
                "  {} {} r={:.0} ({:.4}, {:.4})  #{}",
                style("\u{25cb}").fg(Color::Red),
                style(title).bold(),
                circle.radius,
                circle.center.latitude,
                circle.center.longitude,
                circle.id,
            );
        }

        if let Some(detail) = &self.detail {
            println!();
            println!("  {} ({})", style("Selected").underlined(), detail.kind);
            for (key, value) in &detail.fields {
                println!("    {:<12} {value}", style(key).dim());
            }
        }
    }
}

impl MapSurface for TerminalSurface {
    fn init(&mut self) -> Result<(), SurfaceError> {
        self.initialized = true;
        Ok(())
    }

    fn place_marker(&mut self, marker: &ReportMarker) -> Result<SurfaceHandle, SurfaceError> {
        if !self.initialized {
            return Err(SurfaceError::NotReady);
        }
        self.next_handle += 1;
        self.placed
            .insert(self.next_handle, Placed::Marker(marker.clone()));
        Ok(SurfaceHandle(self.next_handle))
    }

    fn place_circle(&mut self, circle: &HotspotCircle) -> Result<SurfaceHandle, SurfaceError> {
        if !self.initialized {
            return Err(SurfaceError::NotReady);
        }
        self.next_handle += 1;
        self.placed
            .insert(self.next_handle, Placed::Circle(circle.clone()));
        Ok(SurfaceHandle(self.next_handle))
    }

    fn remove(&mut self, handle: SurfaceHandle) {
        self.placed.remove(&handle.0);
    }

    fn show_detail(&mut self, payload: &DetailPayload) {
        self.detail = Some(payload.clone());
    }

    fn clear_detail(&mut self) {
        self.detail = None;
    }
}

/// Maps the classifier's hex palette onto terminal colors.
fn severity_color(hex: &str) -> Color {
    match hex {
        color::DANGER => Color::Red,
        color::WARNING => Color::Color256(208),
        _ => Color::Yellow,
    }
}
