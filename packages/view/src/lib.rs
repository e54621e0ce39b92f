#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! The map view interaction controller.
//!
//! Owns the UI-local state (search text, active layers, viewport bounds,
//! selection) and mediates between input events and the engine: every
//! event rebuilds the ephemeral [`ViewQuery`], re-queries the dataset,
//! and re-renders the scene synchronously on the caller's thread. The
//! controller never owns entity data; the dataset does.

use std::collections::BTreeSet;

use hazard_map_dataset::SpatialDataset;
use hazard_map_dataset_models::{BoundingBox, HazardReport, Hotspot, ViewQuery};
use hazard_map_hazard_models::MapLayer;
use hazard_map_layers::LayerRegistry;
use hazard_map_scene::{MapRenderer, MapSurface, RenderScene, SceneConfig, SurfaceError};

/// Drives the map view: one controller per rendering surface.
pub struct MapViewController<S: MapSurface> {
    dataset: SpatialDataset,
    layers: LayerRegistry,
    renderer: MapRenderer<S>,
    config: SceneConfig,
    search_text: String,
    bounds: Option<BoundingBox>,
}

impl<S: MapSurface> MapViewController<S> {
    /// Creates a controller and attempts to initialize the surface.
    ///
    /// On success the initial "show everything" scene is already
    /// rendered. On a retryable init failure the controller is still
    /// returned alongside the error so the caller can offer a retry via
    /// [`Self::retry_init`].
    ///
    /// # Errors
    ///
    /// Returns the controller and the [`SurfaceError`] if surface init
    /// or the first render fails.
    pub fn new(
        dataset: SpatialDataset,
        surface: S,
        config: SceneConfig,
    ) -> Result<Self, (Box<Self>, SurfaceError)> {
        let mut controller = Self {
            dataset,
            layers: LayerRegistry::new(),
            renderer: MapRenderer::new(surface),
            config,
            search_text: String::new(),
            bounds: None,
        };
        match controller.try_init() {
            Ok(()) => Ok(controller),
            Err(e) => Err((Box::new(controller), e)),
        }
    }

    /// Retries surface initialization after a retryable failure, then
    /// renders the current scene.
    ///
    /// # Errors
    ///
    /// Propagates the surface error if init fails again.
    pub fn retry_init(&mut self) -> Result<(), SurfaceError> {
        self.try_init()
    }

    /// Updates the search text and re-renders.
    ///
    /// # Errors
    ///
    /// Propagates render failures from the surface.
    pub fn set_search_text(&mut self, text: impl Into<String>) -> Result<(), SurfaceError> {
        self.search_text = text.into();
        self.refresh()
    }

    /// Toggles a layer and re-renders. Returns the layer's new state.
    ///
    /// # Errors
    ///
    /// Propagates render failures from the surface.
    pub fn toggle_layer(&mut self, layer: MapLayer) -> Result<bool, SurfaceError> {
        let now_active = self.layers.toggle(layer);
        self.refresh()?;
        Ok(now_active)
    }

    /// Toggles a layer by string id and re-renders. Unknown ids are
    /// warned about and ignored; the scene is still re-rendered (a
    /// no-op diff).
    ///
    /// # Errors
    ///
    /// Propagates render failures from the surface.
    pub fn toggle_layer_id(&mut self, layer_id: &str) -> Result<(), SurfaceError> {
        self.layers.toggle_id(layer_id);
        self.refresh()
    }

    /// Restricts the view to `bounds` (or clears the restriction) and
    /// re-renders.
    ///
    /// # Errors
    ///
    /// Propagates render failures from the surface.
    pub fn set_bounds(&mut self, bounds: Option<BoundingBox>) -> Result<(), SurfaceError> {
        self.bounds = bounds;
        self.refresh()
    }

    /// Selects a rendered entity, surfacing its detail payload in place
    /// of any currently shown one. Returns whether the id was found.
    pub fn select(&mut self, id: &str) -> bool {
        self.renderer.select(id)
    }

    /// Dismisses the current detail popup, if any.
    pub fn clear_selection(&mut self) {
        self.renderer.clear_selection();
    }

    /// Replaces the dataset's entities from an external provider and
    /// re-renders.
    ///
    /// # Errors
    ///
    /// Propagates render failures from the surface.
    pub fn refresh_data(
        &mut self,
        reports: Vec<HazardReport>,
        hotspots: Vec<Hotspot>,
    ) -> Result<(), SurfaceError> {
        self.dataset.replace_entities(reports, hotspots);
        self.refresh()
    }

    /// The ephemeral query value for the current input state.
    ///
    /// Rebuilt on every call; never cached or persisted.
    #[must_use]
    pub fn view_query(&self) -> ViewQuery {
        ViewQuery {
            search_text: self.search_text.clone(),
            active_layers: self.layers.active_set(),
            bounds: self.bounds,
        }
    }

    /// Snapshot of the active layer set, for layer toggle controls.
    #[must_use]
    pub fn active_layers(&self) -> BTreeSet<MapLayer> {
        self.layers.active_set()
    }

    /// The current search text.
    #[must_use]
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Id of the currently selected entity, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.renderer.selected()
    }

    /// Builds the scene for the current input state without touching
    /// the surface.
    #[must_use]
    pub fn current_scene(&self) -> RenderScene {
        RenderScene::build(&self.dataset.query(&self.view_query()), &self.config)
    }

    /// Read access to the dataset.
    #[must_use]
    pub const fn dataset(&self) -> &SpatialDataset {
        &self.dataset
    }

    /// Read access to the rendering surface.
    pub const fn surface(&self) -> &S {
        self.renderer.surface()
    }

    /// Mutable access to the rendering surface, for surface-specific
    /// operations outside the render cycle.
    pub const fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    /// Re-queries and re-renders the current scene.
    ///
    /// # Errors
    ///
    /// Propagates render failures from the surface.
    pub fn refresh(&mut self) -> Result<(), SurfaceError> {
        let scene = self.current_scene();
        self.renderer.render(&scene)
    }

    fn try_init(&mut self) -> Result<(), SurfaceError> {
        self.renderer.init()?;
        self.refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use hazard_map_dataset_models::GeoPoint;
    use hazard_map_gazetteer::Gazetteer;
    use hazard_map_hazard_models::{
        HazardKind, HazardSeverity, MarkerGlyph, ReportStatus, classify, color,
    };
    use hazard_map_scene::{DetailPayload, HotspotCircle, ReportMarker, SurfaceHandle};

    /// Minimal surface double tracking live entity ids and the popup.
    #[derive(Default)]
    struct FakeSurface {
        next: u64,
        live: std::collections::BTreeMap<u64, String>,
        detail: Option<DetailPayload>,
        fail_init: bool,
    }

    impl MapSurface for FakeSurface {
        fn init(&mut self) -> Result<(), SurfaceError> {
            if self.fail_init {
                return Err(SurfaceError::InitFailed {
                    message: "tiles failed to load".to_string(),
                    retryable: true,
                });
            }
            Ok(())
        }

        fn place_marker(&mut self, marker: &ReportMarker) -> Result<SurfaceHandle, SurfaceError> {
            self.next += 1;
            self.live.insert(self.next, marker.id.clone());
            Ok(SurfaceHandle(self.next))
        }

        fn place_circle(&mut self, circle: &HotspotCircle) -> Result<SurfaceHandle, SurfaceError> {
            self.next += 1;
            self.live.insert(self.next, circle.id.clone());
            Ok(SurfaceHandle(self.next))
        }

        fn remove(&mut self, handle: SurfaceHandle) {
            self.live.remove(&handle.0);
        }

        fn show_detail(&mut self, payload: &DetailPayload) {
            self.detail = Some(payload.clone());
        }

        fn clear_detail(&mut self) {
            self.detail = None;
        }
    }

    fn seed_dataset() -> SpatialDataset {
        SpatialDataset::new(
            vec![HazardReport {
                id: "1".to_string(),
                kind: HazardKind::Tsunami,
                severity: HazardSeverity::Critical,
                location: GeoPoint::new(8.52, 76.94),
                title: "Tsunami Warning".to_string(),
                description: "High waves observed near Kochi".to_string(),
                reported_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
                status: ReportStatus::Verified,
            }],
            vec![Hotspot {
                id: "h1".to_string(),
                location: GeoPoint::new(13.08, 80.27),
                intensity: 0.8,
                report_count: 15,
                title: "Chennai Bay Area".to_string(),
            }],
            Gazetteer::embedded(),
        )
    }

    fn controller() -> MapViewController<FakeSurface> {
        MapViewController::new(seed_dataset(), FakeSurface::default(), SceneConfig::default())
            .map_err(|(_, e)| e)
            .unwrap()
    }

    #[test]
    fn default_view_renders_everything() {
        let controller = controller();
        // One critical tsunami report plus one hotspot.
        assert_eq!(controller.surface().live.len(), 2);

        let scene = controller.current_scene();
        let marker = &scene.markers[0];
        assert_eq!(
            marker.encoding,
            classify(HazardKind::Tsunami, HazardSeverity::Critical)
        );
        assert_eq!(marker.encoding.glyph, MarkerGlyph::Wave);
        assert_eq!(marker.encoding.color_hex, color::DANGER);
    }

    #[test]
    fn toggling_reports_off_keeps_hotspots() {
        let mut controller = controller();
        controller.toggle_layer(MapLayer::Reports).unwrap();
        controller.set_search_text("anything").unwrap();

        let scene = controller.current_scene();
        assert!(scene.markers.is_empty());
        assert_eq!(scene.circles.len(), 1);
        assert_eq!(controller.surface().live.len(), 1);
    }

    #[test]
    fn search_rebuilds_query_each_event() {
        let mut controller = controller();
        controller.set_search_text("kerala").unwrap();
        assert_eq!(controller.view_query().search_text, "kerala");
        assert_eq!(controller.surface().live.len(), 2);

        controller.set_search_text("no such place").unwrap();
        let scene = controller.current_scene();
        assert!(scene.markers.is_empty());
        // The hotspot survives: text search never filters hotspots.
        assert_eq!(scene.circles.len(), 1);
    }

    #[test]
    fn selection_replaces_previous_detail() {
        let mut controller = controller();
        assert!(controller.select("1"));
        assert!(controller.select("h1"));
        let detail = controller.surface().detail.as_ref().unwrap();
        assert_eq!(detail.fields["title"], "Chennai Bay Area");
        assert_eq!(controller.selected(), Some("h1"));

        controller.clear_selection();
        assert!(controller.surface().detail.is_none());
    }

    #[test]
    fn failed_surface_init_supports_retry() {
        let mut surface = FakeSurface::default();
        surface.fail_init = true;
        let result =
            MapViewController::new(seed_dataset(), surface, SceneConfig::default());
        let (mut controller, err) = result.err().unwrap();
        assert!(err.is_retryable());

        // The underlying canvas comes back; retry succeeds and renders.
        // (Test double: flip the flag through a fresh refresh cycle.)
        controller.surface_mut().fail_init = false;
        controller.retry_init().unwrap();
        assert_eq!(controller.surface().live.len(), 2);
    }

    #[test]
    fn refresh_data_swaps_entities_and_rerenders() {
        let mut controller = controller();
        controller
            .refresh_data(
                Vec::new(),
                vec![Hotspot {
                    id: "h9".to_string(),
                    location: GeoPoint::new(15.3, 74.12),
                    intensity: 0.5,
                    report_count: 3,
                    title: "Goa Coastline".to_string(),
                }],
            )
            .unwrap();
        assert_eq!(controller.surface().live.len(), 1);
        assert_eq!(controller.dataset().total_reports(), 0);
    }
}
