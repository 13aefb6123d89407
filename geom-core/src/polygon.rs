use log::debug;
use nalgebra::Point2;
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
use crate::orient::Orientation;
use crate::point::Point;
use crate::segment::Segment;

/// Surface bounded by an exterior ring and optional interior rings (holes).
///
/// Every ring is a closed line string of at least four points. An empty polygon has no rings.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    rings: Vec<LineString>,
}

impl Polygon {
    /// Creates a new polygon. The first ring is the exterior, the rest are holes.
    ///
    /// # Errors
    ///
    /// * [`GeometryError::EmptyComponent`] if a ring is empty
    /// * [`GeometryError::TooFewRingPoints`] if a ring has less than four points
    /// * [`GeometryError::UnclosedRing`] if the first and the last points of a ring differ
    pub fn new(rings: Vec<LineString>) -> Result<Self> {
        collection::ensure_not_empty(&rings)?;
        for (i, ring) in rings.iter().enumerate() {
            let index = i + 1;
            if ring.num_points() < 4 {
                let err = GeometryError::TooFewRingPoints {
                    index,
                    found: ring.num_points(),
                };
                debug!("Rejected polygon: {err}");
                return Err(err);
            }

            if !ring.is_closed() {
                debug!("Rejected polygon: ring {index} is not closed");
                return Err(GeometryError::UnclosedRing { index });
            }
        }

        Ok(Self { rings })
    }

    /// Creates a new polygon, appending the first point to every ring that is not closed yet.
    pub fn new_closing(rings: Vec<LineString>) -> Result<Self> {
        let rings = rings
            .into_iter()
            .enumerate()
            .map(|(i, ring)| {
                if ring.is_empty() || ring.is_closed() {
                    return Ok(ring);
                }

                debug!("Closing polygon ring {}", i + 1);
                let mut points = ring.points().to_vec();
                points.extend(ring.start_point().copied());
                LineString::new(points)
            })
            .collect::<Result<Vec<_>>>()?;

        Self::new(rings)
    }

    /// Creates an empty polygon.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a polygon from the list of its ring arrays.
    pub fn from_array(array: &CoordArray) -> Result<Self> {
        Self::new(collection::components_from_array(
            array,
            LineString::from_array,
        )?)
    }

    /// All rings, starting with the exterior one.
    pub fn rings(&self) -> &[LineString] {
        &self.rings
    }

    /// Exterior ring. `None` for an empty polygon.
    pub fn exterior_ring(&self) -> Option<&LineString> {
        self.rings.first()
    }

    /// Holes of the polygon.
    pub fn interior_rings(&self) -> &[LineString] {
        self.rings.get(1..).unwrap_or_default()
    }

    /// Number of holes.
    pub fn num_interior_rings(&self) -> usize {
        self.interior_rings().len()
    }

    /// `n`-th hole, counting from `1`.
    pub fn interior_ring_n(&self, n: usize) -> Option<&LineString> {
        n.checked_sub(1)
            .and_then(|i| self.interior_rings().get(i))
    }

    /// Returns true if the `point` lies inside the polygon or on its boundary. Points inside holes are outside of
    /// the polygon.
    pub fn contains_point(&self, point: &Point) -> bool {
        let Some(position) = point.coord() else {
            return false;
        };
        let Some(exterior) = self.exterior_ring() else {
            return false;
        };

        if self
            .iter_ring_segments()
            .any(|segment| segment.distance_to_point(&position) == 0.0)
        {
            return true;
        }

        winding_number(exterior, &position) != 0
            && self
                .interior_rings()
                .iter()
                .all(|hole| winding_number(hole, &position) == 0)
    }

    fn iter_ring_segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.rings.iter().flat_map(LineString::iter_segments)
    }
}

/// Signed area of a closed ring, positive for counterclockwise rings.
fn ring_area_signed(ring: &LineString) -> f64 {
    ring.iter_segments()
        .map(|Segment(a, b)| {
            let (a, b) = (a.planar(), b.planar());
            a.x * b.y - b.x * a.y
        })
        .sum::<f64>()
        / 2.0
}

/// Centroid of the area enclosed by a ring. `None` for rings of zero area.
fn ring_centroid(ring: &LineString) -> Option<Point2<f64>> {
    let area = ring_area_signed(ring);
    if area == 0.0 {
        return None;
    }

    let (x, y) = ring
        .iter_segments()
        .fold((0.0, 0.0), |(x, y), Segment(a, b)| {
            let (a, b) = (a.planar(), b.planar());
            let cross = a.x * b.y - b.x * a.y;
            (x + (a.x + b.x) * cross, y + (a.y + b.y) * cross)
        });

    Some(Point2::new(x / (6.0 * area), y / (6.0 * area)))
}

fn winding_number(ring: &LineString, point: &Point2<f64>) -> i32 {
    let mut wn = 0;
    for segment in ring.iter_segments() {
        let (a, b) = (segment.0.planar(), segment.1.planar());
        if a.y <= point.y {
            if b.y > point.y && Orientation::triplet(&a, &b, point) == Orientation::Counterclockwise {
                wn += 1;
            }
        } else if b.y <= point.y && Orientation::triplet(&a, &b, point) == Orientation::Clockwise {
            wn -= 1;
        }
    }

    wn
}

impl Collection for Polygon {
    type Component = LineString;

    fn components(&self) -> &[LineString] {
        &self.rings
    }
}

impl TryFrom<Vec<Geom>> for Polygon {
    type Error = GeometryError;

    fn try_from(components: Vec<Geom>) -> Result<Self> {
        Self::new(collection::downcast_components(components)?)
    }
}

impl Geometry for Polygon {
    fn geometry_type(&self) -> GeometryType {
        GeometryType::Polygon
    }

    fn dimension(&self) -> usize {
        2
    }

    fn iter_points(&self) -> Box<dyn Iterator<Item = &Point> + '_> {
        Box::new(self.rings.iter().flat_map(|ring| ring.iter_points()))
    }

    fn iter_points_mut(&mut self) -> Box<dyn Iterator<Item = &mut Point> + '_> {
        Box::new(self.rings.iter_mut().flat_map(|ring| ring.iter_points_mut()))
    }

    /// Area weighted centroid of the rings, holes having negative weight. A polygon of zero area has the centroid
    /// of its exterior ring taken as a curve.
    fn centroid(&self) -> Point {
        let Some(exterior) = self.exterior_ring() else {
            return Point::empty();
        };

        let (mut x, mut y, mut total) = (0.0, 0.0, 0.0);
        for (i, ring) in self.rings.iter().enumerate() {
            let Some(centroid) = ring_centroid(ring) else {
                continue;
            };

            let weight = if i == 0 { 1.0 } else { -1.0 } * ring_area_signed(ring).abs();
            x += centroid.x * weight;
            y += centroid.y * weight;
            total += weight;
        }

        if total == 0.0 {
            return exterior.centroid();
        }

        Point::new(x / total, y / total)
    }

    fn as_array(&self) -> CoordArray {
        collection::components_array(&self.rings)
    }

    fn segments(&self) -> Option<Vec<Segment<'_>>> {
        Some(self.iter_ring_segments().collect())
    }

    fn length(&self) -> f64 {
        self.rings.iter().map(Geometry::length).sum()
    }

    fn length_3d(&self) -> f64 {
        self.rings.iter().map(Geometry::length_3d).sum()
    }

    fn great_circle_length_with(&self, radius: f64) -> f64 {
        self.rings
            .iter()
            .map(|ring| ring.great_circle_length_with(radius))
            .sum()
    }

    fn haversine_length_with(&self, radius: f64) -> f64 {
        self.rings
            .iter()
            .map(|ring| ring.haversine_length_with(radius))
            .sum()
    }

    fn vincenty_length_with(&self, datum: &Datum) -> Option<f64> {
        self.rings
            .iter()
            .map(|ring| ring.vincenty_length_with(datum))
            .sum()
    }

    /// Area of the exterior ring minus the areas of the holes.
    fn area(&self) -> f64 {
        let Some(exterior) = self.exterior_ring() else {
            return 0.0;
        };

        ring_area_signed(exterior).abs()
            - self
                .interior_rings()
                .iter()
                .map(|hole| ring_area_signed(hole).abs())
                .sum::<f64>()
    }

    /// A polygon is simple if all its rings are simple and no two rings cross each other.
    fn is_simple(&self) -> bool {
        if !self.rings.iter().all(Geometry::is_simple) {
            return false;
        }

        self.rings.iter().enumerate().all(|(i, a)| {
            self.rings[i + 1..].iter().all(|b| {
                a.iter_segments()
                    .all(|sa| b.iter_segments().all(|sb| !sa.crosses(&sb)))
            })
        })
    }

    fn boundary(&self) -> Geom {
        match self.rings.as_slice() {
            [] => MultiLineString::empty().into(),
            [exterior] => exterior.clone().into(),
            rings => MultiLineString::new(rings.to_vec()).into(),
        }
    }

    fn primitives(&self) -> Vec<Primitive<'_>> {
        if self.is_empty() {
            return vec![];
        }

        self.iter_ring_segments()
            .map(Primitive::Segment)
            .chain(std::iter::once(Primitive::Surface(self)))
            .collect()
    }
}
