//! Place lookups and straight-line travel estimates.
//!
//! Geocoding goes through the Kakao Local API; travel time is a rough
//! estimate from the great-circle distance between the two points.

pub mod distance;
pub mod error;
pub mod geocode;
pub mod transit;

pub use distance::{haversine_km, Coordinates};
pub use error::MapsError;
pub use geocode::KakaoGeocoder;
pub use transit::TransitService;
