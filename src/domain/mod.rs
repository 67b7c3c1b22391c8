pub mod coordinate;

pub use coordinate::GeoCoordinate;
