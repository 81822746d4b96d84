//! Fingerprinting and reconstruction. A fingerprint captures every vertex
//! of a geometry as (bearing, distance) about a reference point, together
//! with the nesting layout of the coordinate arrays; reconstruction plays
//! the same sequence back from a different reference point.

use crate::geometry::{GeographicPoint, Geometry, GeometryKind};
use crate::{Result, TrueSizeError};

/// Distances below this are treated as coincident with the reference, so
/// the bearing from the atan2 formula is never trusted for them.
const COINCIDENT_DISTANCE_KM: f64 = 1e-9;

/// One vertex of a shape, as seen from the reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexFingerprint {
    /// Degrees in (-180, 180], 0 = north.
    pub bearing_deg: f64,
    /// Non-negative kilometers.
    pub distance_km: f64,
}

/// Nesting structure of the source coordinate arrays. Reconstruction
/// re-nests the flat vertex sequence from this, never by re-deriving
/// boundaries from the fingerprint values.
#[derive(Debug, Clone, PartialEq)]
enum ShapeLayout {
    LineString { vertex_count: usize },
    Polygon { ring_lengths: Vec<usize> },
    MultiPolygon { ring_lengths: Vec<Vec<usize>> },
}

impl ShapeLayout {
    fn kind(&self) -> GeometryKind {
        match self {
            ShapeLayout::LineString { .. } => GeometryKind::LineString,
            ShapeLayout::Polygon { .. } => GeometryKind::Polygon,
            ShapeLayout::MultiPolygon { .. } => GeometryKind::MultiPolygon,
        }
    }

    fn vertex_count(&self) -> usize {
        match self {
            ShapeLayout::LineString { vertex_count } => *vertex_count,
            ShapeLayout::Polygon { ring_lengths } => ring_lengths.iter().sum(),
            ShapeLayout::MultiPolygon { ring_lengths } => ring_lengths
                .iter()
                .map(|polygon| polygon.iter().sum::<usize>())
                .sum(),
        }
    }
}

/// A shape's position-independent form: per-vertex bearing/distance about
/// the reference it was captured with, plus the coordinate layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeFingerprint {
    layout: ShapeLayout,
    entries: Vec<VertexFingerprint>,
    reference: GeographicPoint,
}

impl ShapeFingerprint {
    /// Captures `geometry` about `reference`. Vertices are flattened in
    /// the order of [`Geometry::vertices`]; holes are measured against the
    /// same reference as the outer ring.
    pub fn capture(
        geometry: &Geometry,
        reference: GeographicPoint,
    ) -> Result<Self> {
        let layout = match geometry {
            Geometry::LineString(points) => ShapeLayout::LineString {
                vertex_count: points.len(),
            },
            Geometry::Polygon(rings) => ShapeLayout::Polygon {
                ring_lengths: rings.iter().map(Vec::len).collect(),
            },
            Geometry::MultiPolygon(polygons) => ShapeLayout::MultiPolygon {
                ring_lengths: polygons
                    .iter()
                    .map(|rings| rings.iter().map(Vec::len).collect())
                    .collect(),
            },
            other => {
                return Err(TrueSizeError::UnsupportedGeometry(
                    other.kind_name().to_owned(),
                ))
            }
        };

        let entries = geometry
            .vertices()
            .into_iter()
            .map(|vertex| measure(reference, vertex))
            .collect();

        Ok(Self {
            layout,
            entries,
            reference,
        })
    }

    pub fn kind(&self) -> GeometryKind {
        self.layout.kind()
    }

    /// The reference point this fingerprint was captured about.
    pub fn reference(&self) -> GeographicPoint {
        self.reference
    }

    pub fn entries(&self) -> &[VertexFingerprint] {
        &self.entries
    }

    /// Rebuilds the full geometry about `new_reference`, re-nested into
    /// the captured layout. Identical fingerprint entries reconstruct to
    /// identical points, so ring closure survives.
    pub fn reconstruct(
        &self,
        new_reference: GeographicPoint,
    ) -> Result<Geometry> {
        let expected = self.layout.vertex_count();
        if self.entries.len() != expected {
            return Err(TrueSizeError::MalformedCoordinates(format!(
                "fingerprint holds {} entries, layout expects {}",
                self.entries.len(),
                expected
            )));
        }

        let mut points = self.entries.iter().map(|entry| {
            new_reference.destination(entry.distance_km, entry.bearing_deg)
        });

        let geometry = match &self.layout {
            ShapeLayout::LineString { vertex_count } => {
                Geometry::LineString(points.by_ref().take(*vertex_count).collect())
            }
            ShapeLayout::Polygon { ring_lengths } => {
                let mut rings = Vec::with_capacity(ring_lengths.len());
                for length in ring_lengths {
                    rings.push(points.by_ref().take(*length).collect());
                }
                Geometry::Polygon(rings)
            }
            ShapeLayout::MultiPolygon { ring_lengths } => {
                let mut polygons = Vec::with_capacity(ring_lengths.len());
                for polygon in ring_lengths {
                    let mut rings = Vec::with_capacity(polygon.len());
                    for length in polygon {
                        rings.push(points.by_ref().take(*length).collect());
                    }
                    polygons.push(rings);
                }
                Geometry::MultiPolygon(polygons)
            }
        };

        Ok(geometry)
    }
}

fn measure(
    reference: GeographicPoint,
    vertex: GeographicPoint,
) -> VertexFingerprint {
    let distance_km = reference.distance_km_to(vertex);
    if distance_km < COINCIDENT_DISTANCE_KM {
        // the bearing between coincident points is arbitrary; a
        // zero-length travel lands on the reference either way
        return VertexFingerprint {
            bearing_deg: 0.0,
            distance_km: 0.0,
        };
    }
    VertexFingerprint {
        bearing_deg: reference.bearing_to(vertex),
        distance_km,
    }
}
