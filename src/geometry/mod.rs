pub mod boundary;
pub mod bounds;
pub mod simplify;

pub use boundary::{Boundary, BoundaryError, MIN_VERTICES, point_in_polygon};
pub use bounds::Bounds;
pub use simplify::simplify_ring;
