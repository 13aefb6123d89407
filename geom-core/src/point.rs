use approx::AbsDiffEq;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::array::CoordArray;
use crate::distance::Primitive;
use crate::error::{GeometryError, Result};
use crate::geo::{Datum, GeoPoint};
use crate::geometry::{Geom, Geometry};
use crate::geometry_collection::GeometryCollection;
use crate::geometry_type::GeometryType;
use crate::segment::Segment;

/// Absolute tolerance used when comparing coordinates for equality.
///
/// Two coordinates are equal if they differ by strictly less than this value.
pub const EQUALITY_EPSILON: f64 = 1e-9;

/// A single position with optional elevation (`z`) and measure (`m`).
///
/// The planar coordinates `x` and `y` are either both present or both absent. A point without them is *empty*,
/// and an empty point never carries `z` or `m`.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    coord: Option<Point2<f64>>,
    z: Option<f64>,
    m: Option<f64>,
}

impl Point {
    /// Creates a 2d point.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            coord: Some(Point2::new(x, y)),
            z: None,
            m: None,
        }
    }

    /// Creates a point with elevation.
    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::new(x, y)
        }
    }

    /// Creates a point with a measure but without elevation.
    pub fn new_measured(x: f64, y: f64, m: f64) -> Self {
        Self {
            m: Some(m),
            ..Self::new(x, y)
        }
    }

    /// Creates a point with both elevation and measure.
    pub fn new_4d(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            coord: Some(Point2::new(x, y)),
            z: Some(z),
            m: Some(m),
        }
    }

    /// Creates an empty point.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a point from optional coordinates.
    ///
    /// NaN values are treated as absent coordinates. If `x` or `y` is absent, the point is empty and `z`, `m` are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NonNumericCoordinate`] if any given coordinate is infinite.
    pub fn from_coords(
        x: Option<f64>,
        y: Option<f64>,
        z: Option<f64>,
        m: Option<f64>,
    ) -> Result<Self> {
        let [x, y, z, m] = [x, y, z, m].map(|v| v.filter(|v| !v.is_nan()));
        if let Some(v) = [x, y, z, m].into_iter().flatten().find(|v| v.is_infinite()) {
            return Err(GeometryError::NonNumericCoordinate(v.to_string()));
        }

        match (x, y) {
            (Some(x), Some(y)) => Ok(Self {
                coord: Some(Point2::new(x, y)),
                z,
                m,
            }),
            _ => Ok(Self::empty()),
        }
    }

    /// Creates a point from its array representation `[x, y, z, m]`.
    ///
    /// Arrays shorter than two elements produce an empty point.
    pub fn from_array(array: &CoordArray) -> Result<Self> {
        let values = array.as_coords()?;
        if values.len() > 4 {
            return Err(GeometryError::MalformedComponents(format!(
                "a point has at most 4 coordinates, found {}",
                values.len()
            )));
        }

        let value = |i: usize| values.get(i).copied().flatten();
        Self::from_coords(value(0), value(1), value(2), value(3))
    }

    /// X coordinate.
    pub fn x(&self) -> Option<f64> {
        self.coord.map(|c| c.x)
    }

    /// Y coordinate.
    pub fn y(&self) -> Option<f64> {
        self.coord.map(|c| c.y)
    }

    /// Elevation.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Measure.
    pub fn m(&self) -> Option<f64> {
        self.m
    }

    /// Planar coordinates of the point, `None` for an empty point.
    pub fn coord(&self) -> Option<Point2<f64>> {
        self.coord
    }

    /// Planar coordinates with NaN standing in for an empty point.
    pub(crate) fn planar(&self) -> Point2<f64> {
        self.coord.unwrap_or(Point2::new(f64::NAN, f64::NAN))
    }

    /// Returns true if both points are empty, or if every coordinate of them differs by less than
    /// [`EQUALITY_EPSILON`]. `z` and `m` must be present in both points or absent in both.
    pub fn coincides(&self, other: &Point) -> bool {
        fn close(a: Option<f64>, b: Option<f64>) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => (a - b).abs() < EQUALITY_EPSILON,
                _ => false,
            }
        }

        close(self.x(), other.x())
            && close(self.y(), other.y())
            && close(self.z, other.z)
            && close(self.m, other.m)
    }
}

impl Geometry for Point {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Point
    }

    fn dimension(&self) -> usize {
        0
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        Box::new(std::iter::once(self))
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        Box::new(std::iter::once(self))
    }

    fn is_empty(&self) -> bool {
        self.coord.is_none()
    }

    fn centroid(&self) -> Point {
        *self
    }

    fn as_array(&self) -> CoordArray {
        let Some(coord) = self.coord else {
            return CoordArray::coords([f64::NAN, f64::NAN]);
        };

        let mut values = vec![Some(coord.x), Some(coord.y)];
        match (self.z, self.m) {
            (None, None) => {}
            (z, None) => values.push(z),
            (z, m) => values.extend([z, m]),
        }

        CoordArray::Coords(values)
    }

    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        None
    }

    fn length(&self) -> f64 {
        0.0
    }

    fn length_3d(&self) -> f64 {
        0.0
    }

    fn great_circle_length_with(&self, _radius: f64) -> f64 {
        0.0
    }

    fn haversine_length_with(&self, _radius: f64) -> f64 {
        0.0
    }

    fn vincenty_length_with(&self, _datum: &Datum) -> Option<f64> {
        Some(0.0)
    }

    fn area(&self) -> f64 {
        0.0
    }

    fn is_simple(&self) -> bool {
        true
    }

    fn boundary(&self) -> Geom {
        GeometryCollection::empty().into()
    }

    fn flatten(&mut self) {
        self.z = None;
        self.m = None;
    }

    fn invert_xy(&mut self) {
        if let Some(coord) = &mut self.coord {
            *coord = Point2::new(coord.y, coord.x);
        }
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        if self.is_empty() {
            vec![]
        } else {
            vec![Primitive::Point(self)]
        }
    }

    fn equals(&self, other: &Geom) -> bool {
        match other {
            Geom::Point(other) => self.coincides(other),
            _ => false,
        }
    }
}

impl GeoPoint for Point {
    /// Latitude in degrees, NaN for an empty point.
    fn lat(&self) -> f64 {
        self.planar().y
    }

    /// Longitude in degrees, NaN for an empty point.
    fn lon(&self) -> f64 {
        self.planar().x
    }

    fn elevation(&self) -> Option<f64> {
        self.z
    }
}

impl AbsDiffEq for Point {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        EQUALITY_EPSILON
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
        fn close(a: Option<f64>, b: Option<f64>, epsilon: f64) -> bool {
            match (a, b) {
                (None, None) => true,
                (Some(a), Some(b)) => a.abs_diff_eq(&b, epsilon),
                _ => false,
            }
        }

        close(self.x(), other.x(), epsilon)
            && close(self.y(), other.y(), epsilon)
            && close(self.z, other.z, epsilon)
            && close(self.m, other.m, epsilon)
    }
}
