use serde::{Deserialize, Serialize};

/// A geographic coordinate in decimal degrees.
///
/// Stored as `f32` so the whole membership test stays in single precision
/// (~1.1 m at the equator, plenty for GPS geofencing). No range checks or
/// normalization are performed; keeping lat within [-90, 90] and lon within
/// [-180, 180] is up to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub lat: f32,
    pub lon: f32,
}

impl GeoCoordinate {
    pub const fn new(lat: f32, lon: f32) -> Self {
        Self { lat, lon }
    }
}

impl From<(f32, f32)> for GeoCoordinate {
    fn from((lat, lon): (f32, f32)) -> Self {
        Self { lat, lon }
    }
}

// geo uses x = longitude, y = latitude
impl From<GeoCoordinate> for geo::Coord<f32> {
    fn from(c: GeoCoordinate) -> Self {
        geo::coord! { x: c.lon, y: c.lat }
    }
}

impl From<geo::Coord<f32>> for GeoCoordinate {
    fn from(c: geo::Coord<f32>) -> Self {
        Self { lat: c.y, lon: c.x }
    }
}
