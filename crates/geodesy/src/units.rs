//! Distance unit conversions. The engine works in kilometers throughout;
//! these factors only exist for callers that expose another unit at their
//! own boundary.

const KM_PER_MILE: f64 = 1.609344;
const KM_PER_NAUTICAL_MILE: f64 = 1.852;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
    Miles,
    NauticalMiles,
}

impl DistanceUnit {
    /// Converts a value in this unit to kilometers.
    pub fn to_kilometers(self, value: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value,
            DistanceUnit::Meters => value / 1000.0,
            DistanceUnit::Miles => value * KM_PER_MILE,
            DistanceUnit::NauticalMiles => value * KM_PER_NAUTICAL_MILE,
        }
    }

    /// Converts a value in kilometers to this unit.
    pub fn from_kilometers(self, value_km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => value_km,
            DistanceUnit::Meters => value_km * 1000.0,
            DistanceUnit::Miles => value_km / KM_PER_MILE,
            DistanceUnit::NauticalMiles => value_km / KM_PER_NAUTICAL_MILE,
        }
    }
}
