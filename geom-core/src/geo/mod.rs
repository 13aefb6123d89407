//! Geometries in geographic coordinates (see [`GeoPoint`]) and distances measured on the surface of the Earth
//! (see [`geodesic`]).

mod datum;
pub mod geodesic;
mod point;

pub use datum::Datum;
pub use geodesic::{
    great_circle_distance, haversine_distance, vincenty_distance, VINCENTY_ITERATION_LIMIT,
};
pub use point::GeoPoint;
