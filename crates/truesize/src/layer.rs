//! Host-facing layer: holds the attached overlays and translates the
//! host's raw screen positions into geographic anchors through an
//! explicitly injected projection.

use std::fmt;

use indexmap::IndexMap;

use crate::geometry::{Feature, GeographicPoint};
use crate::overlay::ShapeOverlay;
use crate::{Result, TrueSizeError};

/// Raw pixel position as delivered by the host's input events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPosition {
    pub x: f64,
    pub y: f64,
}

impl ScreenPosition {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// The one capability the layer needs from the host map: resolving a
/// screen position to a geographic coordinate.
pub trait Projection {
    fn unproject(&self, position: ScreenPosition) -> GeographicPoint;
}

/// Handle to an attached overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(u64);

impl fmt::Display for OverlayId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of draggable true-size overlays over one host map. Overlays
/// iterate in attach order. All operations run synchronously to
/// completion; the layer never blocks or spawns.
pub struct TrueSizeLayer<P> {
    projection: P,
    overlays: IndexMap<OverlayId, ShapeOverlay>,
    next_id: u64,
}

impl<P: Projection> TrueSizeLayer<P> {
    pub fn new(projection: P) -> Self {
        Self {
            projection,
            overlays: IndexMap::new(),
            next_id: 0,
        }
    }

    /// Attaches a feature and returns its overlay handle. No overlay is
    /// registered when the geometry is rejected.
    pub fn attach(&mut self, feature: Feature) -> Result<OverlayId> {
        let overlay = ShapeOverlay::attach(feature)?;
        let id = OverlayId(self.next_id);
        self.next_id += 1;
        self.overlays.insert(id, overlay);
        log::debug!("overlay {} attached ({} total)", id, self.overlays.len());
        Ok(id)
    }

    /// Removes and returns the overlay. Its state is gone afterwards.
    pub fn detach(&mut self, id: OverlayId) -> Result<ShapeOverlay> {
        let overlay = self
            .overlays
            .shift_remove(&id)
            .ok_or(TrueSizeError::OverlayNotFound(id))?;
        log::debug!("overlay {} detached ({} total)", id, self.overlays.len());
        Ok(overlay)
    }

    pub fn overlay(&self, id: OverlayId) -> Result<&ShapeOverlay> {
        self.overlays
            .get(&id)
            .ok_or(TrueSizeError::OverlayNotFound(id))
    }

    fn overlay_mut(&mut self, id: OverlayId) -> Result<&mut ShapeOverlay> {
        self.overlays
            .get_mut(&id)
            .ok_or(TrueSizeError::OverlayNotFound(id))
    }

    /// Attached overlays in attach order.
    pub fn overlays(
        &self,
    ) -> impl Iterator<Item = (OverlayId, &ShapeOverlay)> {
        self.overlays.iter().map(|(id, overlay)| (*id, overlay))
    }

    pub fn len(&self) -> usize {
        self.overlays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overlays.is_empty()
    }

    /// Pointer-down: resolves the position and begins a gesture anchored
    /// there.
    pub fn drag_start(
        &mut self,
        id: OverlayId,
        position: ScreenPosition,
    ) -> Result<()> {
        let anchor = self.projection.unproject(position);
        self.overlay_mut(id)?.drag_start(anchor)
    }

    /// Pointer-move: reconstructs the overlay about the resolved position
    /// and returns the feature for the host to re-render.
    pub fn drag_move(
        &mut self,
        id: OverlayId,
        position: ScreenPosition,
    ) -> Result<Feature> {
        let anchor = self.projection.unproject(position);
        self.overlay_mut(id)?.drag_move(anchor)
    }

    /// Pointer-up: ends the overlay's gesture.
    pub fn drag_end(&mut self, id: OverlayId) -> Result<()> {
        self.overlay_mut(id)?.drag_end();
        Ok(())
    }

    /// Programmatic move to a geographic center, outside any gesture.
    pub fn set_center(
        &mut self,
        id: OverlayId,
        center: GeographicPoint,
    ) -> Result<Feature> {
        self.overlay_mut(id)?.set_center(center)
    }

    /// Programmatic move back to the overlay's attach-time center.
    pub fn reset(&mut self, id: OverlayId) -> Result<Feature> {
        self.overlay_mut(id)?.reset()
    }
}
