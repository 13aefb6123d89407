use serde::{Deserialize, Serialize};

use crate::array::CoordArray;
use crate::collection::{self, Collection};
use crate::distance::Primitive;
use crate::error::{GeometryError, Result};
use crate::geo::{self, Datum};
use crate::geometry::{Geom, Geometry};
use crate::geometry_type::GeometryType;
use crate::multi_point::MultiPoint;
use crate::point::Point;
use crate::segment::Segment;

/// Curve made of straight segments between consecutive points.
///
/// A line string is either empty or has at least two points, none of which is empty.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineString {
    points: Vec<Point>,
}

impl LineString {
    /// Creates a new line string.
    ///
    /// # Errors
    ///
    /// * [`GeometryError::EmptyComponent`] if any of the points is empty
    /// * [`GeometryError::SinglePointLineString`] if exactly one point is given
    pub fn new(points: Vec<Point>) -> Result<Self> {
        collection::ensure_not_empty(&points)?;
        if points.len() == 1 {
            log::debug!("Rejected line string with a single point");
            return Err(GeometryError::SinglePointLineString);
        }

        Ok(Self { points })
    }

    /// Creates an empty line string.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a line string from the list of its point arrays.
    pub fn from_array(array: &CoordArray) -> Result<Self> {
        Self::new(collection::components_from_array(array, Point::from_array)?)
    }

    pub(crate) fn from_segment(segment: Segment<'_>) -> Self {
        Self {
            points: vec![*segment.start(), *segment.end()],
        }
    }

    /// Points of the line string.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Iterates over the segments between consecutive points.
    pub fn iter_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.points.windows(2).map(|pair| Segment(&pair[0], &pair[1]))
    }

    /// Returns the `n`-th point. Positive `n` counts from the start (`1` is the first point), negative `n` counts
    /// from the end (`-1` is the last point). `0` and out-of-range indices give `None`.
    pub fn point_n(&self, n: isize) -> Option<&Point> {
        let index = match n {
            0 => return None,
            n if n > 0 => n - 1,
            n => self.points.len() as isize + n,
        };

        usize::try_from(index)
            .ok()
            .and_then(|index| self.points.get(index))
    }

    /// First point.
    pub fn start_point(&self) -> Option<&Point> {
        self.points.first()
    }

    /// Last point.
    pub fn end_point(&self) -> Option<&Point> {
        self.points.last()
    }

    /// Returns true if the line string is not empty and its first and last points are equal.
    pub fn is_closed(&self) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) => start.coincides(end),
            _ => false,
        }
    }

    /// Returns true if the line string is closed and simple.
    pub fn is_ring(&self) -> bool {
        self.is_closed() && self.is_simple()
    }

    /// Absolute elevation difference between the first and the last point.
    pub fn z_difference(&self) -> Option<f64> {
        let start = self.start_point()?.z()?;
        let end = self.end_point()?.z()?;
        Some((start - end).abs())
    }

    /// Total climb along the line string.
    ///
    /// Elevation changes smaller than `tolerance` are accumulated until they exceed it, which filters out the
    /// noise of measured elevation profiles. `None` tolerance counts every change.
    pub fn elevation_gain(&self, tolerance: Option<f64>) -> f64 {
        self.elevation_changes(tolerance).0
    }

    /// Total descent along the line string as a positive number. See [`LineString::elevation_gain`].
    pub fn elevation_loss(&self, tolerance: Option<f64>) -> f64 {
        self.elevation_changes(tolerance).1
    }

    /// Direction reversals are confirmed only after the profile retreats from the last extreme by more than
    /// `tolerance`. A confirmed leg from the previous turning point to the extreme is counted as gain or loss, and
    /// the open leg is closed at the last elevation.
    fn elevation_changes(&self, tolerance: Option<f64>) -> (f64, f64) {
        let tolerance = tolerance.unwrap_or(0.0);
        let mut elevations = self.points.iter().filter_map(Point::z);
        let Some(first) = elevations.next() else {
            return (0.0, 0.0);
        };

        let (mut gain, mut loss) = (0.0, 0.0);
        let (mut turn, mut extreme, mut last) = (first, first, first);
        let mut direction = Direction::Undetermined;
        for z in elevations {
            last = z;
            match direction {
                Direction::Up if z > extreme => extreme = z,
                Direction::Up if extreme - z > tolerance => {
                    gain += extreme - turn;
                    (turn, extreme, direction) = (extreme, z, Direction::Down);
                }
                Direction::Down if z < extreme => extreme = z,
                Direction::Down if z - extreme > tolerance => {
                    loss += turn - extreme;
                    (turn, extreme, direction) = (extreme, z, Direction::Up);
                }
                Direction::Undetermined if z - turn > tolerance => {
                    (extreme, direction) = (z, Direction::Up);
                }
                Direction::Undetermined if turn - z > tolerance => {
                    (extreme, direction) = (z, Direction::Down);
                }
                _ => {}
            }
        }

        if last > turn {
            gain += last - turn;
        } else {
            loss += turn - last;
        }

        (gain, loss)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Undetermined,
    Up,
    Down,
}

impl Collection for LineString {
    type Component = Point;

    fn components(&self) -> &[Point] {
        &self.points
    }
}

impl TryFrom<Vec<Geom>> for LineString {
    type Error = GeometryError;

    fn try_from(components: Vec<Geom>) -> Result<Self> {
        Self::new(collection::downcast_components(components)?)
    }
}

impl Geometry for LineString {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::LineString
    }

    fn dimension(&self) -> usize {
        1
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        Box::new(self.points.iter())
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        Box::new(self.points.iter_mut())
    }

    /// Length weighted mean of the segment midpoints. A line string of zero length has the mean of its points as
    /// the centroid.
    fn centroid(&self) -> Point {
        let (mut x, mut y, mut total) = (0.0, 0.0, 0.0);
        for segment in self.iter_segments() {
            let length = segment.length();
            let midpoint = segment.midpoint();
            x += midpoint.x * length;
            y += midpoint.y * length;
            total += length;
        }

        if total == 0.0 {
            return collection::mean_point(self.points.iter().filter_map(Point::coord));
        }

        Point::new(x / total, y / total)
    }

    fn as_array(&self) -> CoordArray {
        collection::components_array(&self.points)
    }

    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        Some(self.iter_segments().collect())
    }

    fn length(&self) -> f64 {
        self.iter_segments().map(|s| s.length()).sum()
    }

    fn length_3d(&self) -> f64 {
        self.iter_segments().map(|s| s.length_3d()).sum()
    }

    fn great_circle_length_with(&self, radius: f64) -> f64 {
        self.iter_segments()
            .map(|s| geo::great_circle_distance(s.start(), s.end(), radius))
            .sum()
    }

    fn haversine_length_with(&self, radius: f64) -> f64 {
        self.iter_segments()
            .map(|s| geo::haversine_distance(s.start(), s.end(), radius))
            .sum()
    }

    fn vincenty_length_with(&self, datum: &Datum) -> Option<f64> {
        self.iter_segments()
            .map(|s| geo::vincenty_distance(s.start(), s.end(), datum))
            .sum()
    }

    fn area(&self) -> f64 {
        0.0
    }

    /// A line string is simple if none of its segments cross each other.
    ///
    /// Only proper crossings are detected: segments touching at an endpoint or overlapping collinearly are not
    /// reported.
    fn is_simple(&self) -> bool {
        let segments: Vec<_> = self.iter_segments().collect();
        segments.iter().enumerate().all(|(i, a)| {
            segments[i + 1..]
                .iter()
                .all(|b| !a.crosses(b))
        })
    }

    fn boundary(&self) -> Geom {
        match (self.start_point(), self.end_point()) {
            (Some(start), Some(end)) if !self.is_closed() => {
                MultiPoint::new(vec![*start, *end]).into()
            }
            _ => MultiPoint::empty().into(),
        }
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        self.iter_segments().map(Primitive::Segment).collect()
    }
}
