use serde::{Deserialize, Serialize};

use crate::array::CoordArray;
use crate::collection::{self, Collection};
use crate::distance::Primitive;
use crate::error::{GeometryError, Result};
use crate::geo::Datum;
use crate::geometry::{Geom, Geometry};
use crate::geometry_type::GeometryType;
use crate::line_string::LineString;
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::segment::Segment;

/// Heterogeneous collection of geometries of any type.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryCollection {
    geometries: Vec<Geom>,
}

impl GeometryCollection {
    /// Creates a new geometry collection. Components may be empty.
    pub fn new(geometries: Vec<Geom>) -> Self {
        Self { geometries }
    }

    /// Creates an empty geometry collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a geometry collection from the list of its component arrays.
    ///
    /// Since the array does not carry geometry types, the type of each component is chosen by its nesting depth:
    /// plain coordinates are a point, a list of points is a line string or, if it is not a valid line string, a
    /// multipoint. A list of point lists is a polygon or a multi line string, and the next level is a multipolygon.
    pub fn from_array(array: &CoordArray) -> Result<Self> {
        Ok(Self::new(collection::components_from_array(
            array,
            component_from_array,
        )?))
    }

    /// Components of the collection.
    pub fn geometries(&self) -> &[Geom] {
        &self.geometries
    }
}

fn component_from_array(array: &CoordArray) -> Result<Geom> {
    match array.depth() {
        0 => Point::from_array(array).map(Geom::from),
        1 => LineString::from_array(array).map(Geom::from).or_else(|err| {
            MultiPoint::from_array(array)
                .map(Geom::from)
                .map_err(|_| err)
        }),
        2 => Polygon::from_array(array).map(Geom::from).or_else(|err| {
            MultiLineString::from_array(array)
                .map(Geom::from)
                .map_err(|_| err)
        }),
        3 => MultiPolygon::from_array(array).map(Geom::from),
        depth => Err(GeometryError::MalformedComponents(format!(
            "no geometry type has nesting depth {depth}"
        ))),
    }
}

impl Collection for GeometryCollection {
    type Component = Geom;

    fn components(&self) -> &[Geom] {
        &self.geometries
    }
}

impl From<Vec<Geom>> for GeometryCollection {
    fn from(geometries: Vec<Geom>) -> Self {
        Self::new(geometries)
    }
}

impl Geometry for GeometryCollection {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::GeometryCollection
    }

    fn dimension(&self) -> usize {
        self.geometries
            .iter()
            .map(Geometry::dimension)
            .max()
            .unwrap_or(0)
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        Box::new(self.geometries.iter().flat_map(|g| g.iter_points()))
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        Box::new(self.geometries.iter_mut().flat_map(|g| g.iter_points_mut()))
    }

    fn centroid(&self) -> Point {
        collection::mean_centroid(&self.geometries)
    }

    fn as_array(&self) -> CoordArray {
        collection::components_array(&self.geometries)
    }

    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        Some(
            self.geometries
                .iter()
                .filter_map(Geometry::segments)
                .flatten()
                .collect(),
        )
    }

    fn length(&self) -> f64 {
        self.geometries.iter().map(Geometry::length).sum()
    }

    fn length_3d(&self) -> f64 {
        self.geometries.iter().map(Geometry::length_3d).sum()
    }

    fn great_circle_length_with(&self, radius: f64) -> f64 {
        self.geometries
            .iter()
            .map(|g| g.great_circle_length_with(radius))
            .sum()
    }

    fn haversine_length_with(&self, radius: f64) -> f64 {
        self.geometries
            .iter()
            .map(|g| g.haversine_length_with(radius))
            .sum()
    }

    fn vincenty_length_with(&self, datum: &Datum) -> Option<f64> {
        self.geometries
            .iter()
            .map(|g| g.vincenty_length_with(datum))
            .sum()
    }

    fn area(&self) -> f64 {
        self.geometries.iter().map(Geometry::area).sum()
    }

    fn is_simple(&self) -> bool {
        self.geometries.iter().all(Geometry::is_simple)
    }

    /// Collection of the boundaries of the components. Empty boundaries are left out.
    fn boundary(&self) -> Geom {
        GeometryCollection::new(
            self.geometries
                .iter()
                .map(Geometry::boundary)
                .filter(|b| !b.is_empty())
                .collect(),
        )
        .into()
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        self.geometries
            .iter()
            .flat_map(Geometry::primitives)
            .collect()
    }

    /// Collections are equal if they have the same number of components and the components are pairwise equal.
    fn equals(&self, other: &Geom) -> bool {
        let Geom::GeometryCollection(other) = other else {
            return false;
        };

        self.geometries.len() == other.geometries.len()
            && self
                .geometries
                .iter()
                .zip(&other.geometries)
                .all(|(a, b)| a.equals(b))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn collection(points: Vec<Point>) -> GeometryCollection {
        GeometryCollection::new(points.into_iter().map(Geom::from).collect())
    }

    #[test]
    fn is_3d() {
        let cases = [
            (vec![Point::new(1.0, 2.0)], false),
            (vec![Point::new_3d(1.0, 2.0, 3.0)], true),
            (vec![Point::new_3d(1.0, 2.0, 3.0), Point::new(1.0, 2.0)], true),
        ];

        for (points, expected) in cases {
            assert_eq!(collection(points).is_3d(), expected);
        }
    }

    #[test]
    fn is_measured() {
        let cases = [
            (vec![Point::empty()], false),
            (vec![Point::new(1.0, 2.0)], false),
            (vec![Point::new_3d(1.0, 2.0, 3.0)], false),
            (vec![Point::new_4d(1.0, 2.0, 3.0, 4.0)], true),
            (vec![Point::new_4d(1.0, 2.0, 3.0, 4.0), Point::new(1.0, 2.0)], true),
        ];

        for (points, expected) in cases {
            assert_eq!(collection(points).is_measured(), expected);
        }
    }

    #[test]
    fn is_empty() {
        assert!(collection(vec![]).is_empty());
        assert!(collection(vec![Point::empty()]).is_empty());
        assert!(!collection(vec![Point::new(1.0, 2.0)]).is_empty());
    }

    #[test]
    fn as_array() {
        let collection = GeometryCollection::new(vec![
            Point::new(1.0, 2.0).into(),
            LineString::empty().into(),
        ]);

        assert_eq!(
            collection.as_array(),
            CoordArray::List(vec![CoordArray::coords([1.0, 2.0]), CoordArray::empty()])
        );
    }

    #[test]
    fn from_array_infers_component_types() {
        let source = GeometryCollection::new(vec![
            Point::new(1.0, 2.0).into(),
            LineString::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)])
                .unwrap()
                .into(),
            Polygon::new(vec![LineString::new(vec![
                Point::new(0.0, 0.0),
                Point::new(1.0, 0.0),
                Point::new(1.0, 1.0),
                Point::new(0.0, 0.0),
            ])
            .unwrap()])
            .unwrap()
            .into(),
        ]);

        let rebuilt = GeometryCollection::from_array(&source.as_array()).unwrap();
        assert_eq!(rebuilt, source);

        let too_deep = CoordArray::List(vec![CoordArray::List(vec![CoordArray::List(vec![
            CoordArray::List(vec![CoordArray::List(vec![CoordArray::coords([1.0, 2.0])])]),
        ])])]);
        assert_matches!(
            GeometryCollection::from_array(&too_deep),
            Err(GeometryError::MalformedComponents(_))
        );
    }

    #[test]
    fn from_array_falls_back_to_multi_geometries() {
        let source = GeometryCollection::new(vec![
            MultiPoint::new(vec![Point::new(1.0, 2.0)]).into(),
            MultiPoint::new(vec![Point::new(1.0, 2.0), Point::empty()]).into(),
            MultiLineString::new(vec![LineString::new(vec![
                Point::new(0.0, 0.0),
                Point::new(5.0, 0.0),
            ])
            .unwrap()])
            .into(),
        ]);

        let rebuilt = GeometryCollection::from_array(&source.as_array()).unwrap();
        assert_eq!(rebuilt, source);
        assert!(rebuilt.equals(&source.into()));
    }

    #[test]
    fn from_array_keeps_line_string_error() {
        let array = CoordArray::List(vec![CoordArray::List(vec![
            CoordArray::coords([1.0, 2.0]),
            CoordArray::coords([f64::INFINITY, 2.0]),
        ])]);
        assert_matches!(
            GeometryCollection::from_array(&array),
            Err(GeometryError::NonNumericCoordinate(_))
        );
    }

    #[test]
    fn flatten() {
        let mut collection = GeometryCollection::new(vec![
            Point::new_4d(1.0, 2.0, 3.0, 4.0).into(),
            Point::new_4d(5.0, 6.0, 7.0, 8.0).into(),
            LineString::new(vec![
                Point::new_4d(1.0, 2.0, 3.0, 4.0),
                Point::new_4d(5.0, 6.0, 7.0, 8.0),
            ])
            .unwrap()
            .into(),
        ]);

        collection.flatten();

        assert!(!collection.is_3d());
        assert!(!collection.is_measured());
        assert_eq!(collection.iter_points().next(), Some(&Point::new(1.0, 2.0)));
    }

    #[test]
    fn explode() {
        let points = vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
            Point::new(5.0, 6.0),
            Point::new(1.0, 2.0),
        ];
        let collection = GeometryCollection::new(vec![Polygon::new(vec![LineString::new(
            points.clone(),
        )
        .unwrap()])
        .unwrap()
        .into()]);

        let segments = collection.explode().unwrap();
        assert_eq!(segments.len(), points.len() - 1);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(segment.num_points(), 2);
            assert_eq!(segment.start_point(), Some(&points[i]));
            assert_eq!(segment.end_point(), Some(&points[i + 1]));
        }
    }

    #[test]
    fn dimension_is_max_of_components() {
        assert_eq!(GeometryCollection::empty().dimension(), 0);
        assert_eq!(collection(vec![Point::new(1.0, 2.0)]).dimension(), 0);

        let mixed = GeometryCollection::new(vec![
            Point::new(1.0, 2.0).into(),
            LineString::empty().into(),
        ]);
        assert_eq!(mixed.dimension(), 1);
    }

    #[test]
    fn centroid_skips_empty_components() {
        let collection = GeometryCollection::new(vec![
            Point::new(0.0, 0.0).into(),
            Point::empty().into(),
            MultiPoint::new(vec![Point::new(4.0, 0.0), Point::new(4.0, 4.0)]).into(),
        ]);
        assert_eq!(collection.centroid(), Point::new(2.0, 1.0));
    }

    #[test]
    fn equals_compares_components() {
        let a = collection(vec![Point::new(1.0, 2.0), Point::empty()]);
        assert!(a.equals(&collection(vec![Point::new(1.0, 2.0), Point::empty()]).into()));
        assert!(!a.equals(&collection(vec![Point::new(1.0, 2.0)]).into()));
        assert!(!a.equals(&MultiPoint::new(vec![Point::new(1.0, 2.0), Point::empty()]).into()));

        let with_multi_point = GeometryCollection::new(vec![MultiPoint::new(vec![Point::new(1.0, 2.0)]).into()]);
        let with_line = GeometryCollection::new(vec![LineString::new(vec![
            Point::new(1.0, 2.0),
            Point::new(3.0, 4.0),
        ])
        .unwrap()
        .into()]);
        assert!(!with_multi_point.equals(&with_line.into()));
    }

    #[test]
    fn boundary_leaves_out_empty_boundaries() {
        let line = LineString::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0)]).unwrap();
        let collection = GeometryCollection::new(vec![Point::new(5.0, 5.0).into(), line.clone().into()]);

        assert_eq!(
            collection.boundary(),
            Geom::from(GeometryCollection::new(vec![line.boundary()]))
        );
    }
}
