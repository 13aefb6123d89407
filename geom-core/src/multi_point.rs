use serde::{Deserialize, Serialize};

use crate::array::CoordArray;
use crate::collection::{self, Collection};
use crate::distance::Primitive;
use crate::error::{GeometryError, Result};
use crate::geo::Datum;
use crate::geometry::{Geom, Geometry};
use crate::geometry_collection::GeometryCollection;
use crate::geometry_type::GeometryType;
use crate::point::Point;
use crate::segment::Segment;

/// Set of points. Unlike in a line string, the points may be empty.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPoint {
    points: Vec<Point>,
}

impl MultiPoint {
    /// Creates a new multipoint.
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Creates an empty multipoint.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a multipoint from the list of its point arrays.
    pub fn from_array(array: &CoordArray) -> Result<Self> {
        Ok(Self::new(collection::components_from_array(
            array,
            Point::from_array,
        )?))
    }

    /// Points of the multipoint.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl Collection for MultiPoint {
    type Component = Point;

    fn components(&self) -> &[Point] {
        &self.points
    }
}

impl TryFrom<Vec<Geom>> for MultiPoint {
    type Error = GeometryError;

    fn try_from(components: Vec<Geom>) -> Result<Self> {
        Ok(Self::new(collection::downcast_components(components)?))
    }
}

impl Geometry for MultiPoint {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPoint
    }

    fn dimension(&self) -> usize {
        0
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        Box::new(self.points.iter())
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        Box::new(self.points.iter_mut())
    }

    fn centroid(&self) -> Point {
        collection::mean_centroid(&self.points)
    }

    fn as_array(&self) -> CoordArray {
        collection::components_array(&self.points)
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

    /// A multipoint is simple if no two of its non-empty points are equal.
    fn is_simple(&self) -> bool {
        let points: Vec<_> = self.points.iter().filter(|p| !p.is_empty()).collect();
        points
            .iter()
            .enumerate()
            .all(|(i, a)| points[i + 1..].iter().all(|b| !a.coincides(b)))
    }

    fn boundary(&self) -> Geom {
        GeometryCollection::empty().into()
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        self.points
            .iter()
            .filter(|p| !p.is_empty())
            .map(Primitive::Point)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::line_string::LineString;

    fn multi_point(coords: &[[f64; 2]]) -> MultiPoint {
        MultiPoint::new(coords.iter().map(|c| Point::new(c[0], c[1])).collect())
    }

    #[test]
    fn accepts_empty_points() {
        let multi_point = MultiPoint::new(vec![Point::empty(), Point::new(1.0, 2.0)]);
        assert_eq!(multi_point.num_points(), 2);
        assert!(!multi_point.is_empty());

        assert!(MultiPoint::new(vec![Point::empty(), Point::empty()]).is_empty());
        assert!(MultiPoint::empty().is_empty());
    }

    #[test]
    fn try_from_components() {
        let multi_point =
            MultiPoint::try_from(vec![Geom::from(Point::new(1.0, 2.0)), Point::empty().into()])
                .unwrap();
        assert_eq!(multi_point.num_components(), 2);

        assert_matches!(
            MultiPoint::try_from(vec![Geom::from(LineString::empty())]),
            Err(GeometryError::WrongComponentType {
                found: GeometryType::LineString,
                expected: GeometryType::Point
            })
        );
    }

    #[test]
    fn centroid() {
        assert_eq!(
            multi_point(&[[0.0, 0.0], [2.0, 0.0], [2.0, 2.0], [0.0, 2.0]]).centroid(),
            Point::new(1.0, 1.0)
        );
        assert_eq!(
            multi_point(&[[0.0, 0.0], [0.0, 10.0]]).centroid(),
            Point::new(0.0, 5.0)
        );
        assert_eq!(
            MultiPoint::new(vec![Point::empty(), Point::new(4.0, 2.0)]).centroid(),
            Point::new(4.0, 2.0)
        );
        assert!(MultiPoint::empty().centroid().is_empty());
    }

    #[test]
    fn is_simple() {
        let cases = [
            (multi_point(&[[0.0, 0.0], [1.0, 1.0], [0.0, 1.0]]), true),
            (multi_point(&[[0.0, 0.0], [0.0, 10.0]]), true),
            (
                multi_point(&[[1.0, 1.0], [2.0, 2.0], [1.0, 3.0], [1.0, 2.0], [2.0, 1.0]]),
                true,
            ),
            (multi_point(&[[0.0, 10.0], [0.0, 10.0]]), false),
            (multi_point(&[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]), false),
            (
                MultiPoint::new(vec![Point::new(0.0, 0.0), Point::empty(), Point::empty()]),
                true,
            ),
            (MultiPoint::empty(), true),
        ];

        for (multi_point, simple) in cases {
            assert_eq!(multi_point.is_simple(), simple, "{multi_point:?}");
        }
    }

    #[test]
    fn trivial_methods() {
        let multi_point = multi_point(&[[0.0, 0.0], [1.0, 1.0]]);

        assert_eq!(multi_point.dimension(), 0);
        assert_eq!(multi_point.length(), 0.0);
        assert_eq!(multi_point.area(), 0.0);
        assert_eq!(multi_point.segments(), None);
        assert_eq!(multi_point.explode(), None);
        assert_eq!(multi_point.boundary(), Geom::from(GeometryCollection::empty()));
    }

    #[test]
    fn as_array_and_back() {
        let multi_point = MultiPoint::new(vec![Point::new_3d(1.0, 2.0, 3.0), Point::empty()]);
        let array = multi_point.as_array();
        let rebuilt = MultiPoint::from_array(&array).unwrap();

        assert_eq!(rebuilt, multi_point);
        assert!(rebuilt.equals(&multi_point.into()));
    }
}
