use crate::domain::GeoCoordinate;

/// Axis-aligned bounding box in decimal degrees
///
/// The default value (all zeros) is what an invalid boundary reports.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min_lat: f32,
    pub max_lat: f32,
    pub min_lon: f32,
    pub max_lon: f32,
}

impl Bounds {
    /// Create bounds from a set of vertices in a single pass
    ///
    /// All four bounds start at vertex 0. Latitude and longitude are updated
    /// independently for every following vertex.
    pub fn from_vertices(vertices: &[GeoCoordinate]) -> Option<Self> {
        let first = vertices.first()?;

        let mut bounds = Self {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };

        for v in &vertices[1..] {
            if v.lat < bounds.min_lat {
                bounds.min_lat = v.lat;
            } else if v.lat > bounds.max_lat {
                bounds.max_lat = v.lat;
            }

            if v.lon < bounds.min_lon {
                bounds.min_lon = v.lon;
            } else if v.lon > bounds.max_lon {
                bounds.max_lon = v.lon;
            }
        }

        Some(bounds)
    }

    /// Inclusive containment: only points strictly outside on an axis are rejected
    #[inline]
    pub fn contains(&self, point: GeoCoordinate) -> bool {
        !(point.lat < self.min_lat
            || point.lat > self.max_lat
            || point.lon < self.min_lon
            || point.lon > self.max_lon)
    }

    /// Longitude span in degrees
    pub fn width(&self) -> f32 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees
    pub fn height(&self) -> f32 {
        self.max_lat - self.min_lat
    }
}
