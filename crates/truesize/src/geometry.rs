//! GeoJSON-shaped data model. Positions are (longitude, latitude) in
//! decimal degrees and serialize as the usual `[lon, lat]` arrays;
//! geometries carry their kind in the `type` member and their nested
//! coordinate arrays in `coordinates`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A (longitude, latitude) pair in decimal degrees. Pure value type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct GeographicPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeographicPoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Initial great-circle bearing towards `other`, degrees in (-180, 180].
    pub fn bearing_to(self, other: GeographicPoint) -> f64 {
        geodesy::haversine::initial_bearing(
            self.longitude,
            self.latitude,
            other.longitude,
            other.latitude,
        )
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_km_to(self, other: GeographicPoint) -> f64 {
        geodesy::haversine::haversine_distance(
            self.longitude,
            self.latitude,
            other.longitude,
            other.latitude,
        )
    }

    /// Point reached by travelling `distance_km` along `bearing_deg`.
    pub fn destination(self, distance_km: f64, bearing_deg: f64) -> Self {
        let (longitude, latitude) = geodesy::haversine::destination(
            self.longitude,
            self.latitude,
            distance_km,
            bearing_deg,
        );
        Self {
            longitude,
            latitude,
        }
    }
}

impl From<[f64; 2]> for GeographicPoint {
    fn from(position: [f64; 2]) -> Self {
        Self::new(position[0], position[1])
    }
}

impl From<GeographicPoint> for [f64; 2] {
    fn from(point: GeographicPoint) -> Self {
        [point.longitude, point.latitude]
    }
}

impl fmt::Display for GeographicPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}, {}]", self.longitude, self.latitude)
    }
}

/// GeoJSON geometry. All coordinate-carrying kinds deserialize; the
/// engine itself only operates on [`GeometryKind`] shapes
/// (LineString/Polygon/MultiPolygon).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Point(GeographicPoint),
    MultiPoint(Vec<GeographicPoint>),
    LineString(Vec<GeographicPoint>),
    MultiLineString(Vec<Vec<GeographicPoint>>),
    Polygon(Vec<Vec<GeographicPoint>>),
    MultiPolygon(Vec<Vec<Vec<GeographicPoint>>>),
}

impl Geometry {
    pub fn kind_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    /// The engine-supported kind of this geometry, if any.
    pub fn supported_kind(&self) -> Option<GeometryKind> {
        match self {
            Geometry::LineString(_) => Some(GeometryKind::LineString),
            Geometry::Polygon(_) => Some(GeometryKind::Polygon),
            Geometry::MultiPolygon(_) => Some(GeometryKind::MultiPolygon),
            _ => None,
        }
    }

    /// All vertices in deterministic traversal order: line order for a
    /// LineString, outer ring before holes for a Polygon, polygon-major
    /// for a MultiPolygon.
    pub fn vertices(&self) -> Vec<GeographicPoint> {
        let mut vertices = Vec::new();
        match self {
            Geometry::Point(point) => vertices.push(*point),
            Geometry::MultiPoint(points) | Geometry::LineString(points) => {
                vertices.extend_from_slice(points);
            }
            Geometry::MultiLineString(lines) => {
                for line in lines {
                    vertices.extend_from_slice(line);
                }
            }
            Geometry::Polygon(rings) => {
                for ring in rings {
                    vertices.extend_from_slice(ring);
                }
            }
            Geometry::MultiPolygon(polygons) => {
                for rings in polygons {
                    for ring in rings {
                        vertices.extend_from_slice(ring);
                    }
                }
            }
        }
        vertices
    }

    /// Center of the geometry's bounding box, or `None` for an empty
    /// coordinate array.
    pub fn center(&self) -> Option<GeographicPoint> {
        let vertices = self.vertices();
        let first = vertices.first()?;

        let mut min_lon = first.longitude;
        let mut max_lon = first.longitude;
        let mut min_lat = first.latitude;
        let mut max_lat = first.latitude;
        for vertex in &vertices[1..] {
            min_lon = min_lon.min(vertex.longitude);
            max_lon = max_lon.max(vertex.longitude);
            min_lat = min_lat.min(vertex.latitude);
            max_lat = max_lat.max(vertex.latitude);
        }

        Some(GeographicPoint::new(
            (min_lon + max_lon) / 2.0,
            (min_lat + max_lat) / 2.0,
        ))
    }
}

/// Geometry kinds the fingerprint engine supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    LineString,
    Polygon,
    MultiPolygon,
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            GeometryKind::LineString => "LineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
enum FeatureMarker {
    Feature,
}

/// A GeoJSON feature. `properties` and `id` pass through the engine
/// untouched; only `geometry` is ever rewritten.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    marker: FeatureMarker,
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub properties: serde_json::Value,
    pub geometry: Geometry,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: serde_json::Value) -> Self {
        Self {
            marker: FeatureMarker::Feature,
            id: None,
            properties,
            geometry,
        }
    }

    pub fn with_id(mut self, id: serde_json::Value) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn close(a: GeographicPoint, b: GeographicPoint) -> bool {
        (a.longitude - b.longitude).abs() < 1e-12
            && (a.latitude - b.latitude).abs() < 1e-12
    }

    #[test]
    fn feature_parses_from_geojson() {
        let raw = r#"{
            "type": "Feature",
            "properties": { "name": "test" },
            "geometry": {
                "type": "Polygon",
                "coordinates": [[[1.0, 2.0], [3.0, 4.0], [5.0, 2.0], [1.0, 2.0]]]
            }
        }"#;
        let feature: Feature = serde_json::from_str(raw).unwrap();
        assert_eq!(feature.properties, json!({ "name": "test" }));
        assert_eq!(feature.id, None);
        match &feature.geometry {
            Geometry::Polygon(rings) => {
                assert_eq!(rings.len(), 1);
                assert_eq!(rings[0].len(), 4);
                assert!(close(rings[0][0], GeographicPoint::new(1.0, 2.0)));
            }
            other => panic!("expected polygon, got {}", other.kind_name()),
        }
    }

    #[test]
    fn feature_serializes_back_to_geojson() {
        let feature = Feature::new(
            Geometry::LineString(vec![
                GeographicPoint::new(1.0, 2.0),
                GeographicPoint::new(3.0, 4.0),
            ]),
            json!({ "name": "line" }),
        );
        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "Feature",
                "properties": { "name": "line" },
                "geometry": {
                    "type": "LineString",
                    "coordinates": [[1.0, 2.0], [3.0, 4.0]]
                }
            })
        );
    }

    #[test]
    fn point_parses_but_is_unsupported() {
        let raw = r#"{ "type": "Point", "coordinates": [10.0, 54.0] }"#;
        let geometry: Geometry = serde_json::from_str(raw).unwrap();
        assert_eq!(geometry.kind_name(), "Point");
        assert_eq!(geometry.supported_kind(), None);
    }

    #[test]
    fn vertices_flatten_in_ring_order() {
        let geometry = Geometry::Polygon(vec![
            vec![
                GeographicPoint::new(0.0, 0.0),
                GeographicPoint::new(4.0, 0.0),
                GeographicPoint::new(4.0, 4.0),
                GeographicPoint::new(0.0, 0.0),
            ],
            vec![
                GeographicPoint::new(1.0, 1.0),
                GeographicPoint::new(2.0, 1.0),
                GeographicPoint::new(1.0, 1.0),
            ],
        ]);
        let vertices = geometry.vertices();
        assert_eq!(vertices.len(), 7);
        // outer ring first, hole after
        assert!(close(vertices[0], GeographicPoint::new(0.0, 0.0)));
        assert!(close(vertices[4], GeographicPoint::new(1.0, 1.0)));
    }

    #[test]
    fn center_is_bounding_box_center() {
        let geometry = Geometry::LineString(vec![
            GeographicPoint::new(10.0, 50.0),
            GeographicPoint::new(14.0, 52.0),
            GeographicPoint::new(12.0, 51.0),
        ]);
        let center = geometry.center().unwrap();
        assert!(close(center, GeographicPoint::new(12.0, 51.0)));

        assert_eq!(Geometry::LineString(Vec::new()).center(), None);
    }
}
