//! The per-shape overlay and its drag state machine. An overlay owns its
//! fingerprint and anchor exclusively; every update either succeeds as one
//! atomic replacement or leaves the overlay untouched.

use crate::fingerprint::ShapeFingerprint;
use crate::geometry::{Feature, GeographicPoint, Geometry, GeometryKind};
use crate::{Result, TrueSizeError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// One attached, draggable shape. Created by [`ShapeOverlay::attach`] and
/// dropped on detach; there is no persisted state.
#[derive(Debug, Clone)]
pub struct ShapeOverlay {
    /// The feature as handed in on attach. `properties` and `id` are
    /// carried into every reconstructed feature unchanged.
    original: Feature,
    /// Geometry at the shape's current position.
    geometry: Geometry,
    fingerprint: ShapeFingerprint,
    /// Reference point the current fingerprint is measured about.
    anchor: GeographicPoint,
    /// Bounding-box center at attach time, for [`ShapeOverlay::reset`].
    home_center: GeographicPoint,
    state: DragState,
}

impl ShapeOverlay {
    /// Fingerprints the feature's geometry about its bounding-box center.
    /// Fails with [`TrueSizeError::UnsupportedGeometry`] for kinds without
    /// a shape to preserve; no overlay exists afterwards in that case.
    pub fn attach(feature: Feature) -> Result<Self> {
        let center = feature.geometry.center().ok_or_else(|| {
            TrueSizeError::MalformedCoordinates(
                "geometry has no vertices".to_owned(),
            )
        })?;
        let fingerprint = ShapeFingerprint::capture(&feature.geometry, center)?;
        log::debug!(
            "attached {} overlay with {} vertices at {}",
            fingerprint.kind(),
            fingerprint.entries().len(),
            center
        );
        Ok(Self {
            geometry: feature.geometry.clone(),
            original: feature,
            fingerprint,
            anchor: center,
            home_center: center,
            state: DragState::Idle,
        })
    }

    pub fn kind(&self) -> GeometryKind {
        self.fingerprint.kind()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    /// Reference point of the current fingerprint.
    pub fn anchor(&self) -> GeographicPoint {
        self.anchor
    }

    /// Geometry at the shape's current position.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn properties(&self) -> &serde_json::Value {
        &self.original.properties
    }

    /// Begins a drag gesture. The fingerprint is replaced, anchored at the
    /// pointer-down coordinate, so every reconstruction of this gesture
    /// measures from the position immediately preceding it instead of
    /// compounding rounding error across gestures.
    pub fn drag_start(&mut self, anchor: GeographicPoint) -> Result<()> {
        let fingerprint = ShapeFingerprint::capture(&self.geometry, anchor)?;
        self.fingerprint = fingerprint;
        self.anchor = anchor;
        self.state = DragState::Dragging;
        Ok(())
    }

    /// Applies one drag sample: rebuilds the geometry about `anchor` from
    /// the gesture's fixed fingerprint and returns the feature to render.
    /// Rejected with [`TrueSizeError::DragNotStarted`] outside a gesture,
    /// which also keeps a stale fingerprint from ever being paired with a
    /// reference it predates.
    pub fn drag_move(&mut self, anchor: GeographicPoint) -> Result<Feature> {
        if self.state != DragState::Dragging {
            return Err(TrueSizeError::DragNotStarted);
        }
        let geometry = self.fingerprint.reconstruct(anchor)?;
        self.geometry = geometry;
        self.anchor = anchor;
        Ok(self.current_feature())
    }

    /// Ends the gesture. The anchor stays where the last sample put it, so
    /// the next gesture starts measuring from the post-drag position.
    pub fn drag_end(&mut self) {
        self.state = DragState::Idle;
    }

    /// Moves the shape so that it is measured about `center`, keeping every
    /// vertex's bearing and distance from the current fingerprint.
    pub fn set_center(&mut self, center: GeographicPoint) -> Result<Feature> {
        let geometry = self.fingerprint.reconstruct(center)?;
        self.geometry = geometry;
        self.anchor = center;
        Ok(self.current_feature())
    }

    /// Moves the shape back to its attach-time center.
    pub fn reset(&mut self) -> Result<Feature> {
        let home = self.home_center;
        self.set_center(home)
    }

    /// The feature at the current position, `properties`/`id` preserved
    /// from the original input. Always a fresh value, never a shared view
    /// into the overlay.
    pub fn current_feature(&self) -> Feature {
        let mut feature = self.original.clone();
        feature.geometry = self.geometry.clone();
        feature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn point(longitude: f64, latitude: f64) -> GeographicPoint {
        GeographicPoint::new(longitude, latitude)
    }

    fn square_feature() -> Feature {
        Feature::new(
            Geometry::Polygon(vec![vec![
                point(10.0, 50.0),
                point(12.0, 50.0),
                point(12.0, 52.0),
                point(10.0, 52.0),
                point(10.0, 50.0),
            ]]),
            json!({ "name": "square" }),
        )
        .with_id(json!("square-1"))
    }

    #[test]
    fn attach_fingerprints_about_center() {
        let overlay = ShapeOverlay::attach(square_feature()).unwrap();
        assert_eq!(overlay.state(), DragState::Idle);
        assert_eq!(overlay.kind(), GeometryKind::Polygon);
        let anchor = overlay.anchor();
        assert!((anchor.longitude - 11.0).abs() < 1e-12);
        assert!((anchor.latitude - 51.0).abs() < 1e-12);
    }

    #[test]
    fn attach_rejects_point_without_creating_overlay() {
        let feature = Feature::new(Geometry::Point(point(10.0, 50.0)), json!({}));
        assert_eq!(
            ShapeOverlay::attach(feature).unwrap_err(),
            TrueSizeError::UnsupportedGeometry("Point".to_owned())
        );
    }

    #[test]
    fn drag_lifecycle_moves_shape_and_preserves_properties() {
        let mut overlay = ShapeOverlay::attach(square_feature()).unwrap();

        // pointer goes down slightly off-center
        let grab = point(11.2, 51.1);
        overlay.drag_start(grab).unwrap();
        assert_eq!(overlay.state(), DragState::Dragging);

        let target = point(-3.0, 40.0);
        let feature = overlay.drag_move(target).unwrap();
        assert_eq!(feature.properties, json!({ "name": "square" }));
        assert_eq!(feature.id, Some(json!("square-1")));

        // per-vertex distances about the anchor survive the move
        for (entry, vertex) in overlay
            .fingerprint
            .entries()
            .iter()
            .zip(feature.geometry.vertices())
        {
            let distance = target.distance_km_to(vertex);
            assert!((distance - entry.distance_km).abs() < 1e-6);
        }

        overlay.drag_end();
        assert_eq!(overlay.state(), DragState::Idle);
        let anchor = overlay.anchor();
        assert!((anchor.longitude - target.longitude).abs() < 1e-12);
        assert!((anchor.latitude - target.latitude).abs() < 1e-12);
    }

    #[test]
    fn drag_move_without_gesture_is_rejected_without_mutation() {
        let mut overlay = ShapeOverlay::attach(square_feature()).unwrap();
        let before_geometry = overlay.geometry().clone();
        let before_anchor = overlay.anchor();

        assert_eq!(
            overlay.drag_move(point(0.0, 0.0)).unwrap_err(),
            TrueSizeError::DragNotStarted
        );
        assert_eq!(overlay.geometry(), &before_geometry);
        assert_eq!(overlay.anchor(), before_anchor);
        assert_eq!(overlay.state(), DragState::Idle);
    }

    #[test]
    fn successive_gestures_re_anchor_at_pointer_down() {
        let mut overlay = ShapeOverlay::attach(square_feature()).unwrap();

        overlay.drag_start(point(11.0, 51.0)).unwrap();
        overlay.drag_move(point(20.0, 45.0)).unwrap();
        overlay.drag_end();

        // second gesture grabs the moved shape at a fresh pointer-down
        // position; the fingerprint must be measured from there
        let grab = point(20.5, 45.2);
        overlay.drag_start(grab).unwrap();
        assert_eq!(overlay.anchor(), grab);

        let feature = overlay.drag_move(point(30.0, 50.0)).unwrap();
        match &feature.geometry {
            Geometry::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 5);
            }
            other => panic!("expected polygon, got {}", other.kind_name()),
        }
    }

    #[test]
    fn reset_returns_to_attach_center() {
        let mut overlay = ShapeOverlay::attach(square_feature()).unwrap();
        let home = overlay.anchor();

        overlay.drag_start(home).unwrap();
        overlay.drag_move(point(-60.0, -20.0)).unwrap();
        overlay.drag_end();

        let feature = overlay.reset().unwrap();
        assert_eq!(overlay.anchor(), home);
        let center = feature.geometry.center().unwrap();
        assert!((center.longitude - home.longitude).abs() < 1e-6);
        assert!((center.latitude - home.latitude).abs() < 1e-6);
    }
}
