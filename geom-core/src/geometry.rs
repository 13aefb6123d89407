use serde::{Deserialize, Serialize};

use crate::array::CoordArray;
use crate::collection::Collection;
use crate::distance::{self, Primitive};
use crate::error::{GeometryError, Result};
use crate::geo::Datum;
use crate::geometry_collection::GeometryCollection;
use crate::geometry_type::GeometryType;
use crate::line_string::LineString;
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::point::{Point, EQUALITY_EPSILON};
use crate::polygon::Polygon;
use crate::rect::Rect;
use crate::segment::Segment;

/// Operations shared by all geometry types.
///
/// Operations that have no meaning for some geometry type return neutral values for it: lengths and areas are `0`,
/// and [`Geometry::segments`] is `None`.
pub trait Geometry {
    /// Variant tag of the geometry.
    fn geometry_type(&self) -> GeometryType;

    /// Topological dimension: `0` for points, `1` for curves, `2` for surfaces. A geometry collection has the
    /// largest dimension of its components.
    fn dimension(&self) -> usize;

    /// Iterates over all points of the geometry in depth-first order.
    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_>;

    /// Iterates mutably over all points of the geometry in depth-first order.
    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_>;

    /// Center of mass of the geometry in planar coordinates. An empty geometry has an empty centroid.
    fn centroid(&self) -> Point;

    /// Nested array representation. See [`CoordArray`].
    fn as_array(&self) -> CoordArray;

    /// Segments between consecutive points of every curve of the geometry.
    ///
    /// Returns `None` for point geometries, that have no segments at all.
    fn segments(&self) -> Option<Vec<Segment<'_>>>;

    /// Planar length in (x, y).
    fn length(&self) -> f64;

    /// Planar length in (x, y, z). Missing elevation counts as `0`.
    fn length_3d(&self) -> f64;

    /// Great circle length on a sphere of the given radius.
    fn great_circle_length_with(&self, radius: f64) -> f64;

    /// Haversine length on a sphere of the given radius.
    fn haversine_length_with(&self, radius: f64) -> f64;

    /// Length on the given ellipsoid calculated with Vincenty's formula. `None` if any of the segments does not
    /// converge.
    fn vincenty_length_with(&self, datum: &Datum) -> Option<f64>;

    /// Planar area.
    fn area(&self) -> f64;

    /// Returns true if the geometry has no anomalous points, e.g. self-crossings.
    fn is_simple(&self) -> bool;

    /// Topological boundary of the geometry.
    fn boundary(&self) -> Geom;

    /// Decomposes the geometry into the primitives the distance search works on.
    fn primitives(&self) -> Vec<Primitive<'_>>;

    /// Great circle length on the WGS84 sphere. See [`great_circle_distance`](crate::geo::great_circle_distance).
    fn great_circle_length(&self) -> f64 {
        self.great_circle_length_with(Datum::WGS84.semimajor())
    }

    /// Haversine length on the WGS84 sphere. See [`haversine_distance`](crate::geo::haversine_distance).
    fn haversine_length(&self) -> f64 {
        self.haversine_length_with(Datum::WGS84.semimajor())
    }

    /// Length on the WGS84 ellipsoid. See [`vincenty_distance`](crate::geo::vincenty_distance).
    fn vincenty_length(&self) -> Option<f64> {
        self.vincenty_length_with(&Datum::WGS84)
    }

    /// Returns true if the geometry has no points, or all of its points are empty.
    fn is_empty(&self) -> bool {
        self.iter_points().all(|p| p.is_empty())
    }

    /// Returns true if any point of the geometry has elevation.
    fn is_3d(&self) -> bool {
        self.iter_points().any(|p| p.z().is_some())
    }

    /// Returns true if any point of the geometry has a measure.
    fn is_measured(&self) -> bool {
        self.iter_points().any(|p| p.m().is_some())
    }

    /// Number of points in the geometry, including empty ones.
    fn num_points(&self) -> usize {
        self.iter_points().count()
    }

    /// Bounding box in (x, y). `None` for an empty geometry.
    fn bbox(&self) -> Option<Rect> {
        Rect::from_points(self.iter_points())
    }

    /// Smallest elevation of the points.
    fn minimum_z(&self) -> Option<f64> {
        self.iter_points().filter_map(Point::z).reduce(f64::min)
    }

    /// Largest elevation of the points.
    fn maximum_z(&self) -> Option<f64> {
        self.iter_points().filter_map(Point::z).reduce(f64::max)
    }

    /// Smallest measure of the points.
    fn minimum_m(&self) -> Option<f64> {
        self.iter_points().filter_map(Point::m).reduce(f64::min)
    }

    /// Largest measure of the points.
    fn maximum_m(&self) -> Option<f64> {
        self.iter_points().filter_map(Point::m).reduce(f64::max)
    }

    /// Drops elevation and measure of all points.
    fn flatten(&mut self) {
        for point in self.iter_points_mut() {
            point.flatten();
        }
    }

    /// Swaps x and y of all points.
    fn invert_xy(&mut self) {
        for point in self.iter_points_mut() {
            point.invert_xy();
        }
    }

    /// Splits the geometry into two-point line strings, one for every segment.
    fn explode(&self) -> Option<Vec<LineString>> {
        Some(
            self.segments()?
                .into_iter()
                .map(LineString::from_segment)
                .collect(),
        )
    }

    /// Shortest planar distance between the geometries. `None` if any of them is empty.
    fn distance(&self, other: &Geom) -> Option<f64> {
        if self.is_empty() || other.is_empty() {
            return None;
        }

        distance::nearest(&self.primitives(), &other.primitives())
    }

    /// Returns true if the geometries have the same type and shape, and all their coordinates are equal with
    /// tolerance of [`EQUALITY_EPSILON`].
    fn equals(&self, other: &Geom) -> bool {
        self.geometry_type() == other.geometry_type()
            && self
                .as_array()
                .approx_eq(&other.as_array(), EQUALITY_EPSILON)
    }
}

/// Geometry of any type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geom {
    /// Point.
    Point(Point),
    /// Line string.
    LineString(LineString),
    /// Polygon.
    Polygon(Polygon),
    /// Multipoint.
    MultiPoint(MultiPoint),
    /// Multi line string.
    MultiLineString(MultiLineString),
    /// Multipolygon.
    MultiPolygon(MultiPolygon),
    /// Heterogeneous collection.
    GeometryCollection(GeometryCollection),
}

macro_rules! dispatch {
    ($geom:expr, $g:ident => $body:expr) => {
        match $geom {
            Geom::Point($g) => $body,
            Geom::LineString($g) => $body,
            Geom::Polygon($g) => $body,
            Geom::MultiPoint($g) => $body,
            Geom::MultiLineString($g) => $body,
            Geom::MultiPolygon($g) => $body,
            Geom::GeometryCollection($g) => $body,
        }
    };
}

impl Geometry for Geom {
    fn geometry_type(&self) -> GeometryType {
        dispatch!(self, g => g.geometry_type())
    }

    fn dimension(&self) -> usize {
        dispatch!(self, g => g.dimension())
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        dispatch!(self, g => g.iter_points())
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        dispatch!(self, g => g.iter_points_mut())
    }

    fn centroid(&self) -> Point {
        dispatch!(self, g => g.centroid())
    }

    fn as_array(&self) -> CoordArray {
        dispatch!(self, g => g.as_array())
    }

    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        dispatch!(self, g => g.segments())
    }

    fn length(&self) -> f64 {
        dispatch!(self, g => g.length())
    }

    fn length_3d(&self) -> f64 {
        dispatch!(self, g => g.length_3d())
    }

    fn great_circle_length_with(&self, radius: f64) -> f64 {
        dispatch!(self, g => g.great_circle_length_with(radius))
    }

    fn haversine_length_with(&self, radius: f64) -> f64 {
        dispatch!(self, g => g.haversine_length_with(radius))
    }

    fn vincenty_length_with(&self, datum: &Datum) -> Option<f64> {
        dispatch!(self, g => g.vincenty_length_with(datum))
    }

    fn area(&self) -> f64 {
        dispatch!(self, g => g.area())
    }

    fn is_simple(&self) -> bool {
        dispatch!(self, g => g.is_simple())
    }

    fn boundary(&self) -> Geom {
        dispatch!(self, g => g.boundary())
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        dispatch!(self, g => g.primitives())
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, g => g.is_empty())
    }

    fn equals(&self, other: &Geom) -> bool {
        dispatch!(self, g => g.equals(other))
    }
}

impl Geom {
    /// Builds a geometry of the given type from its array representation.
    pub fn from_array(geometry_type: GeometryType, array: &CoordArray) -> Result<Self> {
        Ok(match geometry_type {
            GeometryType::Point => Point::from_array(array)?.into(),
            GeometryType::LineString => LineString::from_array(array)?.into(),
            GeometryType::Polygon => Polygon::from_array(array)?.into(),
            GeometryType::MultiPoint => MultiPoint::from_array(array)?.into(),
            GeometryType::MultiLineString => MultiLineString::from_array(array)?.into(),
            GeometryType::MultiPolygon => MultiPolygon::from_array(array)?.into(),
            GeometryType::GeometryCollection => GeometryCollection::from_array(array)?.into(),
        })
    }

    /// `n`-th point of a line string. See [`LineString::point_n`].
    pub fn point_n(&self, n: isize) -> Option<&Point> {
        match self {
            Geom::LineString(v) => v.point_n(n),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// First point of a line string.
    pub fn start_point(&self) -> Option<&Point> {
        match self {
            Geom::LineString(v) => v.start_point(),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Last point of a line string.
    pub fn end_point(&self) -> Option<&Point> {
        match self {
            Geom::LineString(v) => v.end_point(),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Whether a line string, or all line strings of a multi line string, are closed.
    pub fn is_closed(&self) -> Option<bool> {
        match self {
            Geom::LineString(v) => Some(v.is_closed()),
            Geom::MultiLineString(v) => Some(v.is_closed()),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Whether a line string is closed and simple.
    pub fn is_ring(&self) -> Option<bool> {
        match self {
            Geom::LineString(v) => Some(v.is_ring()),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Elevation difference between the endpoints of a line string.
    pub fn z_difference(&self) -> Option<f64> {
        match self {
            Geom::LineString(v) => v.z_difference(),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Total climb along a curve. See [`LineString::elevation_gain`].
    pub fn elevation_gain(&self, tolerance: Option<f64>) -> Option<f64> {
        match self {
            Geom::LineString(v) => Some(v.elevation_gain(tolerance)),
            Geom::MultiLineString(v) => Some(v.elevation_gain(tolerance)),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Total descent along a curve. See [`LineString::elevation_loss`].
    pub fn elevation_loss(&self, tolerance: Option<f64>) -> Option<f64> {
        match self {
            Geom::LineString(v) => Some(v.elevation_loss(tolerance)),
            Geom::MultiLineString(v) => Some(v.elevation_loss(tolerance)),
            Geom::Point(_)
            | Geom::Polygon(_)
            | Geom::MultiPoint(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Number of components of a multi geometry or a geometry collection.
    pub fn num_geometries(&self) -> Option<usize> {
        match self {
            Geom::MultiPoint(v) => Some(v.num_components()),
            Geom::MultiLineString(v) => Some(v.num_components()),
            Geom::MultiPolygon(v) => Some(v.num_components()),
            Geom::GeometryCollection(v) => Some(v.num_components()),
            Geom::Point(_) | Geom::LineString(_) | Geom::Polygon(_) => None,
        }
    }

    /// Copy of the `n`-th (1-based) component of a multi geometry or a geometry collection.
    pub fn geometry_n(&self, n: usize) -> Option<Geom> {
        match self {
            Geom::MultiPoint(v) => v.component_n(n).map(|c| Geom::from(*c)),
            Geom::MultiLineString(v) => v.component_n(n).map(|c| Geom::from(c.clone())),
            Geom::MultiPolygon(v) => v.component_n(n).map(|c| Geom::from(c.clone())),
            Geom::GeometryCollection(v) => v.component_n(n).cloned(),
            Geom::Point(_) | Geom::LineString(_) | Geom::Polygon(_) => None,
        }
    }

    /// Exterior ring of a polygon.
    pub fn exterior_ring(&self) -> Option<&LineString> {
        match self {
            Geom::Polygon(v) => v.exterior_ring(),
            Geom::Point(_)
            | Geom::LineString(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// Number of holes of a polygon.
    pub fn num_interior_rings(&self) -> Option<usize> {
        match self {
            Geom::Polygon(v) => Some(v.num_interior_rings()),
            Geom::Point(_)
            | Geom::LineString(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }

    /// `n`-th (1-based) hole of a polygon.
    pub fn interior_ring_n(&self, n: usize) -> Option<&LineString> {
        match self {
            Geom::Polygon(v) => v.interior_ring_n(n),
            Geom::Point(_)
            | Geom::LineString(_)
            | Geom::MultiPoint(_)
            | Geom::MultiLineString(_)
            | Geom::MultiPolygon(_)
            | Geom::GeometryCollection(_) => None,
        }
    }
}

macro_rules! impl_geom_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Geom {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }

            impl TryFrom<Geom> for $variant {
                type Error = GeometryError;

                fn try_from(value: Geom) -> Result<Self> {
                    match value {
                        Geom::$variant(v) => Ok(v),
                        other => Err(GeometryError::WrongComponentType {
                            found: other.geometry_type(),
                            expected: GeometryType::$variant,
                        }),
                    }
                }
            }
        )*
    };
}

impl_geom_variant!(
    Point,
    LineString,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection
);
