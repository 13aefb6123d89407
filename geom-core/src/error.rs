//! Error type used by the crate.

use thiserror::Error;

use crate::geometry_type::GeometryType;

/// Result alias used by all fallible constructors of the crate.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Invalid geometry error.
///
/// Every variant is raised by a constructor before the geometry value exists, so a failed call never leaves a
/// partially built geometry behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A coordinate value is not a real number.
    #[error("invalid coordinate value: {0}")]
    NonNumericCoordinate(String),
    /// Components were not supplied as an ordered list.
    #[error("component geometries must be passed as a list: {0}")]
    MalformedComponents(String),
    /// An empty geometry was placed where only non-empty components are allowed.
    #[error("cannot create a collection of empty {kind}s ({index}. component)")]
    EmptyComponent {
        /// Type of the empty component.
        kind: GeometryType,
        /// 1-based position of the component.
        index: usize,
    },
    /// A component does not have the type required by the collection.
    #[error("cannot create a collection of {found} components, expected type is {expected}")]
    WrongComponentType {
        /// Type of the rejected component.
        found: GeometryType,
        /// Type the collection accepts.
        expected: GeometryType,
    },
    /// A non-empty line string must have at least two points.
    #[error("cannot construct a LineString with a single point")]
    SinglePointLineString,
    /// A polygon ring has fewer than four points.
    #[error("cannot create Polygon: ring {index} has {found} points, expected at least 4")]
    TooFewRingPoints {
        /// 1-based position of the ring.
        index: usize,
        /// Number of points in the ring.
        found: usize,
    },
    /// The first and the last points of a polygon ring differ.
    #[error("cannot create Polygon: ring {index} is not closed")]
    UnclosedRing {
        /// 1-based position of the ring.
        index: usize,
    },
    /// Geometry cannot be represented in the target geometry model.
    #[error("invalid input geometry: {0}")]
    Conversion(String),
}
