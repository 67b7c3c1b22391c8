//! geofence - Point-in-polygon geofencing for GPS fixes

pub mod config;
pub mod domain;
pub mod geometry;
pub mod tracking;

pub use domain::GeoCoordinate;
pub use geometry::{Boundary, BoundaryError, Bounds, point_in_polygon};
