use serde::{Deserialize, Serialize};

use crate::array::CoordArray;
use crate::collection::{self, Collection};
use crate::distance::Primitive;
use crate::error::{GeometryError, Result};
use crate::geo::Datum;
use crate::geometry::{Geom, Geometry};
use crate::geometry_type::GeometryType;
use crate::multi_line_string::MultiLineString;
use crate::point::Point;
use crate::polygon::Polygon;
use crate::segment::Segment;

/// Set of polygons.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
}

impl MultiPolygon {
    /// Creates a new multipolygon. Components may be empty.
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    /// Creates an empty multipolygon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a multipolygon from the list of its polygon arrays.
    pub fn from_array(array: &CoordArray) -> Result<Self> {
        Ok(Self::new(collection::components_from_array(
            array,
            Polygon::from_array,
        )?))
    }

    /// Polygons of the collection.
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    /// Returns true if the `point` lies inside one of the polygons or on its boundary.
    pub fn contains_point(&self, point: &Point) -> bool {
        self.polygons.iter().any(|p| p.contains_point(point))
    }
}

impl Collection for MultiPolygon {
    type Component = Polygon;

    fn components(&self) -> &[Polygon] {
        &self.polygons
    }
}

impl TryFrom<Vec<Geom>> for MultiPolygon {
    type Error = GeometryError;

    fn try_from(components: Vec<Geom>) -> Result<Self> {
        Ok(Self::new(collection::downcast_components(components)?))
    }
}

impl Geometry for MultiPolygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiPolygon
    }

    fn dimension(&self) -> usize {
        2
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        Box::new(self.polygons.iter().flat_map(|p| p.iter_points()))
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        Box::new(self.polygons.iter_mut().flat_map(|p| p.iter_points_mut()))
    }

    fn centroid(&self) -> Point {
        collection::mean_centroid(&self.polygons)
    }

    fn as_array(&self) -> CoordArray {
        collection::components_array(&self.polygons)
    }

    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        Some(
            self.polygons
                .iter()
                .filter_map(Geometry::segments)
                .flatten()
                .collect(),
        )
    }

    fn length(&self) -> f64 {
        self.polygons.iter().map(Geometry::length).sum()
    }

    fn length_3d(&self) -> f64 {
        self.polygons.iter().map(Geometry::length_3d).sum()
    }

    fn great_circle_length_with(&self, radius: f64) -> f64 {
        self.polygons
            .iter()
            .map(|p| p.great_circle_length_with(radius))
            .sum()
    }

    fn haversine_length_with(&self, radius: f64) -> f64 {
        self.polygons
            .iter()
            .map(|p| p.haversine_length_with(radius))
            .sum()
    }

    fn vincenty_length_with(&self, datum: &Datum) -> Option<f64> {
        self.polygons
            .iter()
            .map(|p| p.vincenty_length_with(datum))
            .sum()
    }

    fn area(&self) -> f64 {
        self.polygons.iter().map(Geometry::area).sum()
    }

    fn is_simple(&self) -> bool {
        self.polygons.iter().all(Geometry::is_simple)
    }

    /// All rings of all polygons.
    fn boundary(&self) -> Geom {
        MultiLineString::new(
            self.polygons
                .iter()
                .flat_map(|p| p.rings().iter().cloned())
                .collect(),
        )
        .into()
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        self.polygons.iter().flat_map(Geometry::primitives).collect()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::line_string::LineString;

    fn square(x: f64, y: f64, size: f64) -> Polygon {
        let coords = [
            [x, y],
            [x + size, y],
            [x + size, y + size],
            [x, y + size],
            [x, y],
        ];
        Polygon::new(vec![LineString::new(
            coords.iter().map(|c| Point::new(c[0], c[1])).collect(),
        )
        .unwrap()])
        .unwrap()
    }

    #[test]
    fn area_and_length() {
        let multi_polygon = MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 1.0)]);
        assert_eq!(multi_polygon.area(), 5.0);
        assert_eq!(multi_polygon.length(), 12.0);
        assert_eq!(multi_polygon.dimension(), 2);
    }

    #[test]
    fn centroid_is_mean_of_components() {
        let multi_polygon = MultiPolygon::new(vec![
            square(0.0, 0.0, 2.0),
            Polygon::empty(),
            square(10.0, 10.0, 2.0),
        ]);
        assert_abs_diff_eq!(multi_polygon.centroid(), Point::new(6.0, 6.0), epsilon = 1e-12);
        assert!(MultiPolygon::empty().centroid().is_empty());
    }

    #[test]
    fn contains_point() {
        let multi_polygon = MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 2.0)]);
        assert!(multi_polygon.contains_point(&Point::new(11.0, 11.0)));
        assert!(!multi_polygon.contains_point(&Point::new(5.0, 5.0)));
    }

    #[test]
    fn boundary_contains_all_rings() {
        let multi_polygon = MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 2.0)]);
        let Geom::MultiLineString(boundary) = multi_polygon.boundary() else {
            panic!("boundary of a multipolygon must be a multi line string");
        };
        assert_eq!(boundary.num_components(), 2);
        assert!(boundary.is_closed());
    }

    #[test]
    fn distance() {
        let multi_polygon: Geom =
            MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 2.0)]).into();
        assert_eq!(multi_polygon.distance(&Point::new(11.0, 11.0).into()), Some(0.0));
        assert_eq!(multi_polygon.distance(&Point::new(5.0, 1.0).into()), Some(3.0));
    }
}
