use geo::{LineString, Simplify};

use crate::domain::GeoCoordinate;

/// Reduce the vertex count of a closed ring with Ramer-Douglas-Peucker
///
/// `epsilon` is in degrees. The ring is closed before simplifying and the
/// closing vertex is dropped again afterwards, so the result is ready for
/// [`Boundary`](super::Boundary). Rings too small to simplify, or results that
/// would collapse below a triangle, come back unchanged.
pub fn simplify_ring(ring: &[GeoCoordinate], epsilon: f32) -> Vec<GeoCoordinate> {
    if ring.len() < 5 {
        return ring.to_vec();
    }

    let line: LineString<f32> = ring
        .iter()
        .chain(ring.first())
        .map(|&c| geo::Coord::from(c))
        .collect();

    let mut simplified: Vec<GeoCoordinate> = line
        .simplify(&epsilon)
        .0
        .into_iter()
        .map(GeoCoordinate::from)
        .collect();

    if simplified.len() > 1 && simplified.first() == simplified.last() {
        simplified.pop();
    }

    if simplified.len() < 3 {
        return ring.to_vec();
    }

    simplified
}
