pub mod haversine;
pub mod units;
