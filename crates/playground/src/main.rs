use serde_json::json;
use truesize::{
    Feature, GeographicPoint, Geometry, Projection, ScreenPosition,
    TrueSizeLayer,
};

/// One pixel per degree, origin at the north-west corner of the world.
struct PlateCarree;

impl Projection for PlateCarree {
    fn unproject(&self, position: ScreenPosition) -> GeographicPoint {
        GeographicPoint::new(position.x - 180.0, 90.0 - position.y)
    }
}

fn to_screen(point: GeographicPoint) -> ScreenPosition {
    ScreenPosition::new(point.longitude + 180.0, 90.0 - point.latitude)
}

fn main() {
    env_logger::init();

    let feature = Feature::new(
        Geometry::Polygon(vec![vec![
            GeographicPoint::new(14.77, 50.99),
            GeographicPoint::new(13.36, 47.81),
            GeographicPoint::new(19.03, 49.15),
            GeographicPoint::new(24.13, 50.29),
            GeographicPoint::new(21.31, 54.88),
            GeographicPoint::new(14.50, 53.54),
            GeographicPoint::new(14.77, 50.99),
        ]]),
        json!({ "name": "square-ish polygon" }),
    );

    let mut layer = TrueSizeLayer::new(PlateCarree);
    let id = layer.attach(feature).unwrap();
    let grab = layer.overlay(id).unwrap().anchor();
    log::info!("attached overlay {} centered at {}", id, grab);

    // one drag gesture: grab the shape at its center, drop it further
    // north-west
    layer.drag_start(id, to_screen(grab)).unwrap();
    let moved = layer
        .drag_move(id, to_screen(GeographicPoint::new(13.4, 53.0)))
        .unwrap();
    layer.drag_end(id).unwrap();

    let json = serde_json::to_string_pretty(&moved).unwrap();
    println!("json: {}", json);
}
