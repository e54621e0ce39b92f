//! The renderer adapter: scene diffing and surface ownership.
//!
//! `render(scene)` replaces the entire visible set. Internally the
//! adapter diffs the incoming scene against its arena of placed handles
//! by entity id, so unchanged entities keep their handles, stale ones
//! are retired, and re-rendering an identical scene touches nothing.

use std::collections::BTreeMap;

use crate::payload::DetailPayload;
use crate::surface::{MapSurface, SurfaceError, SurfaceHandle};
use crate::{RenderScene, SceneNode};

/// Owns the rendering surface and the arena of placed handles.
///
/// The only component permitted to mutate the surface.
pub struct MapRenderer<S: MapSurface> {
    surface: S,
    initialized: bool,
    placed: BTreeMap<String, (SceneNode, SurfaceHandle)>,
    selected: Option<String>,
}

impl<S: MapSurface> MapRenderer<S> {
    /// Wraps a surface. No drawing happens until [`Self::init`] succeeds.
    pub const fn new(surface: S) -> Self {
        Self {
            surface,
            initialized: false,
            placed: BTreeMap::new(),
            selected: None,
        }
    }

    /// Initializes the surface.
    ///
    /// Safe to call again after a retryable failure; the error carries
    /// whether a retry can succeed.
    ///
    /// # Errors
    ///
    /// Propagates [`SurfaceError::InitFailed`] from the surface.
    pub fn init(&mut self) -> Result<(), SurfaceError> {
        self.surface.init()?;
        self.initialized = true;
        Ok(())
    }

    /// Whether the surface has been initialized.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Renders the scene, replacing the previously visible set.
    ///
    /// Idempotent: rendering the same scene twice leaves the surface
    /// untouched the second time — no duplicate markers, no leaked
    /// handles. If the selected entity disappears from the scene its
    /// popup is dismissed; if its payload changed the popup is refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::NotReady`] before a successful init, or a
    /// placement error from the surface.
    pub fn render(&mut self, scene: &RenderScene) -> Result<(), SurfaceError> {
        if !self.initialized {
            return Err(SurfaceError::NotReady);
        }

        let mut next: BTreeMap<String, SceneNode> = BTreeMap::new();
        for marker in &scene.markers {
            next.insert(marker.id.clone(), SceneNode::Marker(marker.clone()));
        }
        for circle in &scene.circles {
            next.insert(circle.id.clone(), SceneNode::Circle(circle.clone()));
        }

        // Retire stale handles first so the surface never holds two
        // entities for one id.
        let stale: Vec<String> = self
            .placed
            .keys()
            .filter(|id| !next.contains_key(*id))
            .cloned()
            .collect();
        for id in stale {
            if let Some((_, handle)) = self.placed.remove(&id) {
                self.surface.remove(handle);
            }
            if self.selected.as_deref() == Some(id.as_str()) {
                self.surface.clear_detail();
                self.selected = None;
            }
        }

        for (id, node) in next {
            let unchanged =
                matches!(self.placed.get(&id), Some((existing, _)) if *existing == node);
            if unchanged {
                continue;
            }

            if let Some((_, handle)) = self.placed.remove(&id) {
                self.surface.remove(handle);
            }
            let handle = self.place(&node)?;
            // A changed entity that is currently selected gets its popup
            // refreshed in place.
            if self.selected.as_deref() == Some(id.as_str()) {
                self.surface.show_detail(node.detail());
            }
            self.placed.insert(id, (node, handle));
        }

        Ok(())
    }

    /// Selects the rendered entity with the given id, surfacing its
    /// detail payload. Selecting a different entity replaces the shown
    /// payload; the two are never shown together.
    ///
    /// Returns `false` (with a logged warning) for ids not in the
    /// current scene.
    pub fn select(&mut self, id: &str) -> bool {
        match self.placed.get(id) {
            Some((node, _)) => {
                self.surface.show_detail(node.detail());
                self.selected = Some(id.to_string());
                true
            }
            None => {
                log::warn!("Ignoring selection of unknown entity id '{id}'");
                false
            }
        }
    }

    /// Dismisses the detail popup, if any.
    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            self.surface.clear_detail();
        }
    }

    /// Id of the currently selected entity.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Number of entities currently placed on the surface.
    #[must_use]
    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    /// Read access to the underlying surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the underlying surface, for surface-specific
    /// operations (e.g. a terminal surface redrawing its frame).
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    fn place(&mut self, node: &SceneNode) -> Result<SurfaceHandle, SurfaceError> {
        match node {
            SceneNode::Marker(marker) => self.surface.place_marker(marker),
            SceneNode::Circle(circle) => self.surface.place_circle(circle),
        }
    }
}
