//! Closed polygon boundary and the even-odd membership test
//!
//! A [`Boundary`] borrows its vertex ring from the caller: nothing is copied
//! and nothing is allocated, so the same vertex table can back many queries
//! on a constrained target. The bounding box is computed once in the
//! constructor and used as a cheap rejection test before the edge scan.
//!
//! Points lying exactly on an edge or vertex resolve deterministically through
//! the `>` straddle test and the `<` crossing test: points on the southern and
//! western sides of the ring (minimum latitude or longitude) come out inside,
//! points on the northern and eastern sides come out outside. Exact hits are
//! rare for GPS fixes with metres of error, so this is left as is.

use geo::{LineString, Polygon};
use thiserror::Error;

use super::Bounds;
use crate::domain::GeoCoordinate;

/// Smallest ring that encloses an area
pub const MIN_VERTICES: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundaryError {
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },
}

/// An implicitly closed ring of coordinates used as a geofence
///
/// The last vertex connects back to the first; do not repeat the first vertex
/// at the end. An invalid boundary (absent ring or fewer than three vertices)
/// is still constructible and answers every query with "outside".
#[derive(Debug, Clone, Copy)]
pub struct Boundary<'a> {
    vertices: Option<&'a [GeoCoordinate]>,
    count: usize,
    bounds: Bounds,
}

impl<'a> Boundary<'a> {
    /// Create a boundary over every vertex of the slice
    pub fn new(vertices: &'a [GeoCoordinate]) -> Self {
        Self::with_count(Some(vertices), vertices.len())
    }

    /// Create a boundary over the first `count` vertices of an optional ring
    ///
    /// The boundary is invalid when `vertices` is `None`, when `count` is below
    /// three, or when `count` runs past the end of the slice. `vertex_count`
    /// always reports `count` as given.
    pub fn with_count(vertices: Option<&'a [GeoCoordinate]>, count: usize) -> Self {
        let ring = vertices
            .filter(|_| count >= MIN_VERTICES)
            .and_then(|v| v.get(..count));

        let bounds = ring.and_then(Bounds::from_vertices).unwrap_or_default();

        Self {
            vertices: ring,
            count,
            bounds,
        }
    }

    /// Create a boundary, refusing rings that cannot enclose an area
    pub fn try_new(vertices: &'a [GeoCoordinate]) -> Result<Self, BoundaryError> {
        if vertices.len() < MIN_VERTICES {
            return Err(BoundaryError::TooFewVertices {
                count: vertices.len(),
            });
        }
        Ok(Self::new(vertices))
    }

    /// Test whether a point lies inside the boundary
    ///
    /// Casts a ray from the point towards increasing longitude and toggles on
    /// every edge it crosses. Runs in O(n) with no allocation.
    pub fn contains(&self, point: GeoCoordinate) -> bool {
        let Some(vertices) = self.vertices else {
            return false;
        };

        if !self.bounds.contains(point) {
            return false;
        }

        let mut inside = false;
        let mut j = vertices.len() - 1;

        for (i, vi) in vertices.iter().enumerate() {
            let vj = &vertices[j];

            // Edge must straddle the point's latitude. The two endpoint
            // latitudes differ here, so the division below is never by zero.
            if (vi.lat > point.lat) != (vj.lat > point.lat) {
                let lon_at_crossing =
                    vi.lon + (point.lat - vi.lat) * (vj.lon - vi.lon) / (vj.lat - vi.lat);

                if point.lon < lon_at_crossing {
                    inside = !inside;
                }
            }

            j = i;
        }

        inside
    }

    pub fn is_valid(&self) -> bool {
        self.vertices.is_some()
    }

    pub fn vertex_count(&self) -> usize {
        self.count
    }

    /// The borrowed ring, or `None` for an invalid boundary
    pub fn vertices(&self) -> Option<&'a [GeoCoordinate]> {
        self.vertices
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn min_lat(&self) -> f32 {
        self.bounds.min_lat
    }

    pub fn max_lat(&self) -> f32 {
        self.bounds.max_lat
    }

    pub fn min_lon(&self) -> f32 {
        self.bounds.min_lon
    }

    pub fn max_lon(&self) -> f32 {
        self.bounds.max_lon
    }

    /// Convert to a `geo` polygon (x = lon, y = lat) for use with other geo algorithms
    pub fn to_polygon(&self) -> Option<Polygon<f32>> {
        let vertices = self.vertices?;
        let exterior: LineString<f32> = vertices.iter().map(|&v| geo::Coord::from(v)).collect();
        Some(Polygon::new(exterior, vec![]))
    }
}

/// One-shot membership test without keeping a [`Boundary`] around
///
/// Identical to `Boundary::new(vertices).contains(point)`, including the
/// treatment of points on an edge or vertex (inside).
pub fn point_in_polygon(point: GeoCoordinate, vertices: &[GeoCoordinate]) -> bool {
    Boundary::new(vertices).contains(point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Contains, Point};

    fn c(lat: f32, lon: f32) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon)
    }

    // Bounding box: lat [40.7120, 40.7130], lon [-74.0070, -74.0060]
    fn square() -> Vec<GeoCoordinate> {
        vec![
            c(40.7120, -74.0070),
            c(40.7120, -74.0060),
            c(40.7130, -74.0060),
            c(40.7130, -74.0070),
        ]
    }

    // "U" opening to the north; the notch is lat 40.7110..40.7120, lon -74.0070..-74.0060
    fn u_shape() -> Vec<GeoCoordinate> {
        vec![
            c(40.7100, -74.0080),
            c(40.7100, -74.0040),
            c(40.7120, -74.0040),
            c(40.7120, -74.0060),
            c(40.7110, -74.0060),
            c(40.7110, -74.0070),
            c(40.7120, -74.0070),
            c(40.7120, -74.0080),
        ]
    }

    fn triangle() -> Vec<GeoCoordinate> {
        vec![
            c(40.7120, -74.0070),
            c(40.7130, -74.0060),
            c(40.7130, -74.0080),
        ]
    }

    #[test]
    fn test_point_inside_square() {
        let ring = square();
        let fence = Boundary::new(&ring);
        assert!(fence.contains(c(40.7125, -74.0065)));
    }

    #[test]
    fn test_point_outside_square() {
        let ring = square();
        let fence = Boundary::new(&ring);

        assert!(!fence.contains(c(40.7140, -74.0065)));
        assert!(!fence.contains(c(40.7125, -74.0080)));
        assert!(!fence.contains(c(40.7110, -74.0065)));
        assert!(!fence.contains(c(40.7200, -74.0000)));
    }

    #[test]
    fn test_point_near_edges() {
        let ring = square();
        let fence = Boundary::new(&ring);

        assert!(fence.contains(c(40.7125, -74.0069)));
        assert!(!fence.contains(c(40.7125, -74.0071)));
    }

    #[test]
    fn test_point_on_edge_is_inside() {
        let ring = square();
        let fence = Boundary::new(&ring);
        assert!(fence.contains(c(40.7120, -74.0065)));
    }

    #[test]
    fn test_point_on_vertex_is_inside() {
        let ring = square();
        let fence = Boundary::new(&ring);
        assert!(fence.contains(c(40.7120, -74.0070)));
    }

    #[test]
    fn test_upper_and_east_edges_are_outside() {
        let ring = square();
        let fence = Boundary::new(&ring);

        assert!(fence.contains(c(40.7125, -74.0070)));
        assert!(!fence.contains(c(40.7130, -74.0065)));
        assert!(!fence.contains(c(40.7125, -74.0060)));
    }

    #[test]
    fn test_concave_body_and_notch() {
        let ring = u_shape();
        let fence = Boundary::new(&ring);

        assert!(fence.contains(c(40.7105, -74.0060)));
        assert!(fence.contains(c(40.7115, -74.0075)));
        assert!(fence.contains(c(40.7115, -74.0050)));

        // inside the bounding box but in the notch of the "U"
        let notch = c(40.7115, -74.0065);
        assert!(fence.bounds().contains(notch));
        assert!(!fence.contains(notch));
    }

    #[test]
    fn test_triangle() {
        let ring = triangle();
        let fence = Boundary::new(&ring);

        assert!(fence.contains(c(40.7125, -74.0068)));
        assert!(!fence.contains(c(40.7125, -74.0050)));
    }

    #[test]
    fn test_accessors() {
        let ring = square();
        let fence = Boundary::new(&ring);

        assert!(fence.is_valid());
        assert_eq!(fence.vertex_count(), 4);
        assert_eq!(fence.min_lat(), 40.7120);
        assert_eq!(fence.max_lat(), 40.7130);
        assert_eq!(fence.min_lon(), -74.0070);
        assert_eq!(fence.max_lon(), -74.0060);
        assert_eq!(fence.vertices().map(<[_]>::len), Some(4));
    }

    #[test]
    fn test_absent_vertices() {
        let fence = Boundary::with_count(None, 4);

        assert!(!fence.is_valid());
        assert_eq!(fence.vertex_count(), 4);
        assert_eq!(fence.bounds(), Bounds::default());
        assert!(!fence.contains(c(40.7125, -74.0065)));
        assert!(!fence.contains(c(0.0, 0.0)));
    }

    #[test]
    fn test_too_few_vertices() {
        let ring = vec![c(40.7120, -74.0070), c(40.7120, -74.0060)];
        let fence = Boundary::new(&ring);

        assert!(!fence.is_valid());
        assert_eq!(fence.vertex_count(), 2);
        assert_eq!(fence.min_lat(), 0.0);
        assert_eq!(fence.max_lon(), 0.0);
        assert!(!fence.contains(c(40.7120, -74.0065)));
    }

    #[test]
    fn test_count_past_end_is_invalid() {
        let ring = square();
        let fence = Boundary::with_count(Some(&ring), 5);

        assert!(!fence.is_valid());
        assert_eq!(fence.vertex_count(), 5);
        assert!(!fence.contains(c(40.7125, -74.0065)));
    }

    #[test]
    fn test_count_uses_prefix() {
        // first three vertices of the square form its south-east half
        let ring = square();
        let fence = Boundary::with_count(Some(&ring), 3);

        assert!(fence.is_valid());
        assert!(fence.contains(c(40.7122, -74.0061)));
        assert!(!fence.contains(c(40.7128, -74.0069)));
    }

    #[test]
    fn test_try_new() {
        let ring = square();
        assert!(Boundary::try_new(&ring).is_ok());

        let err = Boundary::try_new(&ring[..2]).unwrap_err();
        assert_eq!(err, BoundaryError::TooFewVertices { count: 2 });
        assert_eq!(err.to_string(), "polygon needs at least 3 vertices, got 2");
    }

    #[test]
    fn test_point_in_polygon_matches_boundary() {
        let ring = square();

        assert!(point_in_polygon(c(40.7125, -74.0065), &ring));
        assert!(!point_in_polygon(c(40.7140, -74.0065), &ring));
        // same on-boundary policy as Boundary::contains
        assert!(point_in_polygon(c(40.7120, -74.0065), &ring));
        assert!(point_in_polygon(c(40.7120, -74.0070), &ring));
        assert!(!point_in_polygon(c(40.7125, -74.0065), &ring[..2]));
    }

    #[test]
    fn test_outside_bounding_box_never_inside() {
        let ring = u_shape();
        let fence = Boundary::new(&ring);

        for point in [
            c(40.7099, -74.0060),
            c(40.7121, -74.0075),
            c(40.7105, -74.0081),
            c(40.7105, -74.0039),
            c(41.0, -75.0),
        ] {
            assert!(!fence.bounds().contains(point));
            assert!(!fence.contains(point));
        }
    }

    #[test]
    fn test_agrees_with_geo_away_from_edges() {
        // Small integer coordinates keep f32 exact; samples sit on quarter
        // offsets so none of them touch an edge.
        let ring = vec![
            c(0.0, 0.0),
            c(0.0, 8.0),
            c(4.0, 8.0),
            c(4.0, 6.0),
            c(2.0, 6.0),
            c(2.0, 2.0),
            c(4.0, 2.0),
            c(4.0, 0.0),
        ];
        let fence = Boundary::new(&ring);
        let polygon = fence.to_polygon().unwrap();

        for lat_step in 0..20 {
            for lon_step in 0..36 {
                let lat = -0.75 + lat_step as f32 * 0.25;
                let lon = -0.75 + lon_step as f32 * 0.25;
                if lat.fract() == 0.0 || lon.fract() == 0.0 {
                    continue;
                }
                let expected = polygon.contains(&Point::new(lon, lat));
                assert_eq!(fence.contains(c(lat, lon)), expected, "({lat}, {lon})");
            }
        }
    }

    #[test]
    fn test_to_polygon_invalid() {
        assert!(Boundary::with_count(None, 3).to_polygon().is_none());
    }
}
