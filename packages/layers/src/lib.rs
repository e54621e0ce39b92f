#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Active map layer state.
//!
//! Each layer is either active or inactive; transitions happen only
//! through [`LayerRegistry::toggle`]. The registry starts with every
//! layer active, matching the default "show everything" map experience.
//! String layer ids from UI controls go through [`LayerRegistry::toggle_id`],
//! which rejects ids outside the known universe with a logged warning
//! instead of an error.

use std::collections::BTreeSet;

use hazard_map_hazard_models::MapLayer;

/// Tracks which named map layers are currently active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerRegistry {
    active: BTreeSet<MapLayer>,
}

impl Default for LayerRegistry {
    /// All known layers start active.
    fn default() -> Self {
        Self {
            active: MapLayer::all().iter().copied().collect(),
        }
    }
}

impl LayerRegistry {
    /// Creates a registry with every layer active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips the active state of `layer`.
    ///
    /// Toggling twice restores the prior state. Returns the new active
    /// state of the layer.
    pub fn toggle(&mut self, layer: MapLayer) -> bool {
        if self.active.remove(&layer) {
            false
        } else {
            self.active.insert(layer);
            true
        }
    }

    /// Parses a string layer id and toggles the corresponding layer.
    ///
    /// Ids outside the known layer universe are logged as a warning and
    /// ignored; the registry state is unchanged.
    pub fn toggle_id(&mut self, layer_id: &str) {
        match layer_id.trim().parse::<MapLayer>() {
            Ok(layer) => {
                self.toggle(layer);
            }
            Err(_) => {
                log::warn!("Ignoring toggle for unknown layer id '{layer_id}'");
            }
        }
    }

    /// Returns whether `layer` is currently active.
    #[must_use]
    pub fn is_active(&self, layer: MapLayer) -> bool {
        self.active.contains(&layer)
    }

    /// Returns a read-only snapshot of the active layer set.
    ///
    /// The snapshot is a copy: mutating it does not affect the registry.
    #[must_use]
    pub fn active_set(&self) -> BTreeSet<MapLayer> {
        self.active.clone()
    }
}
