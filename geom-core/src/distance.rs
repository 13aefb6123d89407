//! Shortest distance search between geometries.
//!
//! Every geometry is decomposed into [`Primitive`]s: separate points, segments of curves and polygon interiors.
//! The distance between two geometries is then the smallest distance between any pair of their primitives.

use crate::point::Point;
use crate::polygon::Polygon;
use crate::segment::Segment;

/// Elementary part of a geometry used in distance calculation.
#[derive(Debug, Clone, Copy)]
pub enum Primitive<'a> {
    /// Separate point. Never empty.
    Point(&'a Point),
    /// Segment of a curve or a polygon ring.
    Segment(Segment<'a>),
    /// Interior of a polygon. Its rings are always given as separate segments too, so the surface only needs to
    /// answer whether something lies inside it.
    Surface(&'a Polygon),
}

impl Primitive<'_> {
    /// Shortest planar distance between two primitives.
    ///
    /// Distance to a surface is `0` for anything inside the polygon, and infinite otherwise, since the distance to
    /// the polygon rings is then given by their segments.
    pub fn distance(&self, other: &Primitive) -> f64 {
        match (self, other) {
            (Primitive::Point(a), Primitive::Point(b)) => (a.planar() - b.planar()).norm(),
            (Primitive::Point(p), Primitive::Segment(s))
            | (Primitive::Segment(s), Primitive::Point(p)) => s.distance_to_point(&p.planar()),
            (Primitive::Segment(a), Primitive::Segment(b)) => a.distance_to_segment(b),
            (Primitive::Surface(polygon), Primitive::Point(p))
            | (Primitive::Point(p), Primitive::Surface(polygon)) => inside(polygon, [*p]),
            (Primitive::Surface(polygon), Primitive::Segment(s))
            | (Primitive::Segment(s), Primitive::Surface(polygon)) => {
                inside(polygon, [s.start(), s.end()])
            }
            (Primitive::Surface(a), Primitive::Surface(b)) => {
                inside(a, first_point(b)).min(inside(b, first_point(a)))
            }
        }
    }
}

fn inside<'a>(polygon: &Polygon, points: impl IntoIterator<Item = &'a Point>) -> f64 {
    if points.into_iter().any(|p| polygon.contains_point(p)) {
        0.0
    } else {
        f64::INFINITY
    }
}

fn first_point(polygon: &Polygon) -> Option<&Point> {
    polygon.exterior_ring().and_then(|ring| ring.start_point())
}

/// Smallest distance between any primitive of `a` and any primitive of `b`. `None` if any of the lists is empty.
pub(crate) fn nearest(a: &[Primitive], b: &[Primitive]) -> Option<f64> {
    if a.is_empty() || b.is_empty() {
        return None;
    }

    let mut min = f64::INFINITY;
    for pa in a {
        for pb in b {
            min = min.min(pa.distance(pb));
            if min == 0.0 {
                return Some(0.0);
            }
        }
    }

    Some(min)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::geometry::Geometry;
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
    fn point_to_point() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert_eq!(Primitive::Point(&a).distance(&Primitive::Point(&b)), 5.0);
    }

    #[test]
    fn point_to_segment_is_symmetric() {
        let p = Point::new(5.0, 3.0);
        let (s0, s1) = (Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        let point = Primitive::Point(&p);
        let segment = Primitive::Segment(Segment(&s0, &s1));

        assert_eq!(point.distance(&segment), 3.0);
        assert_eq!(segment.distance(&point), 3.0);
    }

    #[test]
    fn surface_distance() {
        let polygon = square(0.0, 0.0, 10.0);
        let surface = Primitive::Surface(&polygon);

        let inner = Point::new(5.0, 5.0);
        let outer = Point::new(15.0, 5.0);
        assert_eq!(surface.distance(&Primitive::Point(&inner)), 0.0);
        assert_eq!(surface.distance(&Primitive::Point(&outer)), f64::INFINITY);
        assert_eq!(
            Primitive::Segment(Segment(&outer, &inner)).distance(&surface),
            0.0
        );

        let nested = square(2.0, 2.0, 1.0);
        let far = square(20.0, 20.0, 1.0);
        assert_eq!(surface.distance(&Primitive::Surface(&nested)), 0.0);
        assert_eq!(Primitive::Surface(&nested).distance(&surface), 0.0);
        assert_eq!(surface.distance(&Primitive::Surface(&far)), f64::INFINITY);
    }

    #[test]
    fn nearest_pair() {
        let points = [Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(4.0, 4.0)];
        let a: Vec<_> = points[..2].iter().map(Primitive::Point).collect();
        let b = [Primitive::Point(&points[2])];

        assert_abs_diff_eq!(nearest(&a, &b).unwrap(), 32f64.sqrt(), epsilon = 1e-12);
        assert_eq!(nearest(&a, &[]), None);
        assert_eq!(nearest(&[], &b), None);
    }

    #[test]
    fn nested_polygons_are_at_zero_distance() {
        let outer = square(0.0, 0.0, 10.0);
        let inner = square(4.0, 4.0, 2.0);

        assert_eq!(nearest(&outer.primitives(), &inner.primitives()), Some(0.0));
        assert_eq!(
            nearest(&outer.primitives(), &square(13.0, 0.0, 2.0).primitives()),
            Some(3.0)
        );
    }
}
