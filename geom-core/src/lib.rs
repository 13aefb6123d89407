//! Vector geometry model with planar and geodesic measurement algorithms.
//!
//! The crate provides seven geometry types: [`Point`], [`LineString`], [`Polygon`], [`MultiPoint`],
//! [`MultiLineString`], [`MultiPolygon`] and [`GeometryCollection`]. All of them implement the [`Geometry`] trait
//! with the operations that make sense for every type, and can be stored in the [`Geom`] enum when the type is
//! only known at runtime.
//!
//! ```
//! use geom_core::{Geometry, LineString, Point};
//!
//! let track = LineString::new(vec![
//!     Point::new_3d(0.0, 47.0, 400.0),
//!     Point::new_3d(10.0, 47.0, 650.0),
//! ])?;
//!
//! assert_eq!(track.centroid(), Point::new(5.0, 47.0));
//! assert_eq!(track.elevation_gain(None), 250.0);
//! assert!(track.vincenty_length().is_some());
//! # Ok::<(), geom_core::GeometryError>(())
//! ```
//!
//! Geometries are validated when constructed: a line string never has a single point, polygon rings are always
//! closed etc. Since components are never exposed mutably, a geometry that was constructed successfully stays
//! valid. The only in-place modifications are [`Geometry::flatten`] and [`Geometry::invert_xy`], which cannot
//! break any of the invariants.
//!
//! Geometries are exchanged with codecs through the nested [`CoordArray`] representation. With the `geo-types`
//! feature enabled, they can also be converted to and from the geometries of the `geo-types` crate.
//!
//! Coordinates are planar for all the operations except the geodesic lengths, that read `x` as longitude and `y`
//! as latitude in degrees. See the [`geo`] module.

mod array;
pub use array::CoordArray;

mod collection;
pub use collection::Collection;

mod distance;
pub use distance::Primitive;

mod error;
pub use error::{GeometryError, Result};

pub mod geo;

#[cfg(feature = "geo-types")]
mod geo_types;

mod geometry;
pub use geometry::{Geom, Geometry};

mod geometry_collection;
pub use geometry_collection::GeometryCollection;

pub mod geometry_type;
pub use geometry_type::GeometryType;

mod line_string;
pub use line_string::LineString;

mod multi_line_string;
pub use multi_line_string::MultiLineString;

mod multi_point;
pub use multi_point::MultiPoint;

mod multi_polygon;
pub use multi_polygon::MultiPolygon;

pub mod orient;

mod point;
pub use point::{Point, EQUALITY_EPSILON};

mod polygon;
pub use polygon::Polygon;

mod rect;
pub use rect::Rect;

mod segment;
pub use segment::Segment;
