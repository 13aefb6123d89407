use serde::{Deserialize, Serialize};

use crate::array::CoordArray;
use crate::collection::{self, Collection};
use crate::distance::Primitive;
use crate::error::{GeometryError, Result};
use crate::geo::Datum;
use crate::geometry::{Geom, Geometry};
use crate::geometry_type::GeometryType;
use crate::line_string::LineString;
use crate::multi_point::MultiPoint;
use crate::point::Point;
use crate::segment::Segment;

/// Set of line strings.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLineString {
    lines: Vec<LineString>,
}

impl MultiLineString {
    /// Creates a new multi line string. Components may be empty.
    pub fn new(lines: Vec<LineString>) -> Self {
        Self { lines }
    }

    /// Creates an empty multi line string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a multi line string from the list of its line string arrays.
    pub fn from_array(array: &CoordArray) -> Result<Self> {
        Ok(Self::new(collection::components_from_array(
            array,
            LineString::from_array,
        )?))
    }

    /// Line strings of the collection.
    pub fn lines(&self) -> &[LineString] {
        &self.lines
    }

    /// Returns true if every non-empty line string is closed.
    pub fn is_closed(&self) -> bool {
        self.lines
            .iter()
            .filter(|line| !line.is_empty())
            .all(LineString::is_closed)
    }

    /// Sum of elevation gains of the line strings. See [`LineString::elevation_gain`].
    pub fn elevation_gain(&self, tolerance: Option<f64>) -> f64 {
        self.lines
            .iter()
            .map(|line| line.elevation_gain(tolerance))
            .sum()
    }

    /// Sum of elevation losses of the line strings. See [`LineString::elevation_loss`].
    pub fn elevation_loss(&self, tolerance: Option<f64>) -> f64 {
        self.lines
            .iter()
            .map(|line| line.elevation_loss(tolerance))
            .sum()
    }
}

impl Collection for MultiLineString {
    type Component = LineString;

    fn components(&self) -> &[LineString] {
        &self.lines
    }
}

impl TryFrom<Vec<Geom>> for MultiLineString {
    type Error = GeometryError;

    fn try_from(components: Vec<Geom>) -> Result<Self> {
        Ok(Self::new(collection::downcast_components(components)?))
    }
}

impl Geometry for MultiLineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::MultiLineString
    }

    fn dimension(&self) -> usize {
        1
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        Box::new(self.lines.iter().flat_map(|line| line.iter_points()))
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        Box::new(self.lines.iter_mut().flat_map(|line| line.iter_points_mut()))
    }

    fn centroid(&self) -> Point {
        collection::mean_centroid(&self.lines)
    }

    fn as_array(&self) -> CoordArray {
        collection::components_array(&self.lines)
    }

    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        Some(self.lines.iter().flat_map(LineString::iter_segments).collect())
    }

    fn length(&self) -> f64 {
        self.lines.iter().map(Geometry::length).sum()
    }

    fn length_3d(&self) -> f64 {
        self.lines.iter().map(Geometry::length_3d).sum()
    }

    fn great_circle_length_with(&self, radius: f64) -> f64 {
        self.lines
            .iter()
            .map(|line| line.great_circle_length_with(radius))
            .sum()
    }

    fn haversine_length_with(&self, radius: f64) -> f64 {
        self.lines
            .iter()
            .map(|line| line.haversine_length_with(radius))
            .sum()
    }

    fn vincenty_length_with(&self, datum: &Datum) -> Option<f64> {
        self.lines
            .iter()
            .map(|line| line.vincenty_length_with(datum))
            .sum()
    }

    fn area(&self) -> f64 {
        0.0
    }

    /// Simple if all line strings are simple and segments of different line strings do not cross.
    fn is_simple(&self) -> bool {
        if !self.lines.iter().all(Geometry::is_simple) {
            return false;
        }

        self.lines.iter().enumerate().all(|(i, a)| {
            self.lines[i + 1..].iter().all(|b| {
                a.iter_segments()
                    .all(|sa| b.iter_segments().all(|sb| !sa.crosses(&sb)))
            })
        })
    }

    /// Endpoints that are shared by an odd number of line string ends (mod-2 rule).
    fn boundary(&self) -> Geom {
        let endpoints: Vec<&Point> = self
            .lines
            .iter()
            .flat_map(|line| line.start_point().into_iter().chain(line.end_point()))
            .collect();

        let mut boundary: Vec<Point> = vec![];
        for point in &endpoints {
            let occurrences = endpoints.iter().filter(|p| p.coincides(point)).count();
            if occurrences % 2 == 1 && !boundary.iter().any(|p| p.coincides(point)) {
                boundary.push(**point);
            }
        }

        MultiPoint::new(boundary).into()
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        self.lines
            .iter()
            .flat_map(LineString::iter_segments)
            .map(Primitive::Segment)
            .collect()
    }
}
