//! Spherical-earth primitives: initial bearing, great-circle distance and
//! the direct (destination) formula. All angles are degrees at the public
//! boundary and radians internally; positions are (longitude, latitude)
//! in decimal degrees, distances in kilometers.

/// Mean earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0088;

fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / std::f64::consts::PI
}

/// Initial compass bearing of the great-circle path from point 1 to
/// point 2, in degrees within (-180, 180]. 0 is north, clockwise is
/// positive.
///
/// The result for coincident points is an arbitrary finite value, not an
/// error; callers that may pass coincident points have to guard on
/// distance first.
pub fn initial_bearing(
    longitude_1: f64,
    latitude_1: f64,
    longitude_2: f64,
    latitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);
    let dlon = to_radians(longitude_2 - longitude_1);

    let y = dlon.sin() * lat2_rad.cos();
    let x = lat1_rad.cos() * lat2_rad.sin()
        - lat1_rad.sin() * lat2_rad.cos() * dlon.cos();

    to_degrees(y.atan2(x))
}

/// Great-circle distance between two points in kilometers, via the
/// haversine formula. Non-negative; zero iff the points coincide up to
/// floating precision.
pub fn haversine_distance(
    longitude_1: f64,
    latitude_1: f64,
    longitude_2: f64,
    latitude_2: f64,
) -> f64 {
    let lat1_rad = to_radians(latitude_1);
    let lat2_rad = to_radians(latitude_2);

    let dlat = lat2_rad - lat1_rad;
    let dlon = to_radians(longitude_2 - longitude_1);

    let a = (dlat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Destination point reached by travelling `distance_km` from the origin
/// along the initial bearing `bearing_deg`, as (longitude, latitude).
///
/// This is the direct haversine formula and the exact inverse of
/// `initial_bearing` + `haversine_distance`: for any two points P, Q,
/// `destination(P, distance(P, Q), bearing(P, Q))` reproduces Q within
/// floating tolerance. Longitude wraps through atan2, no further
/// normalization is applied.
pub fn destination(
    longitude: f64,
    latitude: f64,
    distance_km: f64,
    bearing_deg: f64,
) -> (f64, f64) {
    let lon_rad = to_radians(longitude);
    let lat_rad = to_radians(latitude);
    let bearing_rad = to_radians(bearing_deg);
    let angular = distance_km / EARTH_RADIUS_KM;

    let dest_lat = (lat_rad.sin() * angular.cos()
        + lat_rad.cos() * angular.sin() * bearing_rad.cos())
    .asin();
    let dest_lon = lon_rad
        + (bearing_rad.sin() * angular.sin() * lat_rad.cos())
            .atan2(angular.cos() - lat_rad.sin() * dest_lat.sin());

    (to_degrees(dest_lon), to_degrees(dest_lat))
}
