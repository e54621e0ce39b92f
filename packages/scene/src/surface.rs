//! The rendering surface boundary.
//!
//! [`MapSurface`] is the one seam where the engine touches a concrete
//! rendering technology (a map canvas, a terminal, a test double). Only
//! the renderer adapter calls it; every other component is pure.

use thiserror::Error;

use crate::payload::DetailPayload;
use crate::{HotspotCircle, ReportMarker};

/// Opaque handle to an entity placed on a surface.
///
/// Issued by the surface, retained by the renderer's arena, and passed
/// back for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceHandle(pub u64);

/// Errors from the rendering surface.
///
/// Surface failure is the engine's only fatal-looking condition, and it
/// is recoverable: a retryable init failure is surfaced to the user with
/// an explicit retry action rather than crashing the process.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The underlying canvas failed to initialize.
    #[error("map surface failed to initialize: {message}")]
    InitFailed {
        /// What went wrong, for display to the user.
        message: String,
        /// Whether a user-triggered retry can succeed.
        retryable: bool,
    },

    /// An operation was attempted before a successful init.
    #[error("map surface is not initialized")]
    NotReady,
}

impl SurfaceError {
    /// Whether a user-triggered retry may clear this error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::InitFailed { retryable, .. } => *retryable,
            Self::NotReady => true,
        }
    }
}

/// A rendering surface the adapter draws on.
///
/// Implementations own the actual drawing; the engine guarantees that
/// placements and removals arrive in a consistent order and that
/// `show_detail` replaces any previously shown payload.
pub trait MapSurface {
    /// Initializes the surface. Called once before the first render and
    /// again on user-triggered retry after a retryable failure.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::InitFailed`] if the underlying canvas
    /// cannot be brought up.
    fn init(&mut self) -> Result<(), SurfaceError>;

    /// Places a report marker, returning its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot place the marker.
    fn place_marker(&mut self, marker: &ReportMarker) -> Result<SurfaceHandle, SurfaceError>;

    /// Places a hotspot circle, returning its handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the surface cannot place the circle.
    fn place_circle(&mut self, circle: &HotspotCircle) -> Result<SurfaceHandle, SurfaceError>;

    /// Removes a previously placed entity. Unknown handles are a no-op.
    fn remove(&mut self, handle: SurfaceHandle);

    /// Shows a detail popup, replacing any currently shown one.
    fn show_detail(&mut self, payload: &DetailPayload);

    /// Dismisses the detail popup if one is shown.
    fn clear_detail(&mut self);
}
