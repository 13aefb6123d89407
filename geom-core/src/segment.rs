use nalgebra::Point2;

use crate::orient::Orientation;
use crate::point::Point;

/// A straight line segment between two points of a geometry.
///
/// Segments borrow their endpoints from the geometry they were taken from. Both endpoints are expected to be
/// non-empty, which holds for every segment produced by [`Geometry::segments`](crate::Geometry::segments).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Segment<'a>(pub &'a Point, pub &'a Point);

impl<'a> Segment<'a> {
    /// Start point.
    pub fn start(&self) -> &'a Point {
        self.0
    }

    /// End point.
    pub fn end(&self) -> &'a Point {
        self.1
    }

    /// Planar length of the segment.
    pub fn length(&self) -> f64 {
        (self.1.planar() - self.0.planar()).norm()
    }

    /// Length of the segment in (x, y, z). A missing elevation counts as `0`.
    pub fn length_3d(&self) -> f64 {
        let dz = self.1.z().unwrap_or(0.0) - self.0.z().unwrap_or(0.0);
        let d = self.1.planar() - self.0.planar();
        (d.norm_squared() + dz * dz).sqrt()
    }

    /// Planar middle point of the segment.
    pub fn midpoint(&self) -> Point2<f64> {
        nalgebra::center(&self.0.planar(), &self.1.planar())
    }

    /// Shortest euclidean distance between a point and the segment:
    ///
    /// * if the normal from the point to the segment ends inside the segment, the returned value is the length of
    ///   the normal
    /// * otherwise the returned value is the distance to the closer endpoint
    ///
    /// A degenerate segment is treated as its start point.
    pub fn distance_to_point(&self, point: &Point2<f64>) -> f64 {
        let start = self.0.planar();
        let ds = self.1.planar() - start;
        let dp = point - start;
        let ds_len = ds.norm_squared();
        if ds_len == 0.0 {
            return dp.norm();
        }

        let r = (dp.dot(&ds) / ds_len).clamp(0.0, 1.0);
        (dp - ds * r).norm()
    }

    /// Returns true, if the segment has at least one common point with the `other` segment. Touching endpoints
    /// and collinear overlaps count as intersection.
    pub fn intersects(&self, other: &Segment) -> bool {
        fn on_segment(p: &Point2<f64>, q: &Point2<f64>, r: &Point2<f64>) -> bool {
            q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
        }

        let (p1, q1) = (self.0.planar(), self.1.planar());
        let (p2, q2) = (other.0.planar(), other.1.planar());

        let o1 = Orientation::triplet(&p1, &q1, &p2);
        let o2 = Orientation::triplet(&p1, &q1, &q2);
        let o3 = Orientation::triplet(&p2, &q2, &p1);
        let o4 = Orientation::triplet(&p2, &q2, &q1);

        if o1 != o2 && o3 != o4 {
            return true;
        }

        (o1 == Orientation::Collinear && on_segment(&p1, &p2, &q1))
            || (o2 == Orientation::Collinear && on_segment(&p1, &q2, &q1))
            || (o3 == Orientation::Collinear && on_segment(&p2, &p1, &q2))
            || (o4 == Orientation::Collinear && on_segment(&p2, &q1, &q2))
    }

    /// Returns true if the segments cross at a point lying strictly inside both of them.
    ///
    /// Touching at an endpoint is not a crossing. Parallel and collinear segments never cross, even when they
    /// overlap.
    pub fn crosses(&self, other: &Segment) -> bool {
        let (p0, p1) = (self.0.planar(), self.1.planar());
        let (p2, p3) = (other.0.planar(), other.1.planar());
        let s1 = p1 - p0;
        let s2 = p3 - p2;

        let denominator = -s2.x * s1.y + s1.x * s2.y;
        if denominator == 0.0 {
            return false;
        }

        let s = (-s1.y * (p0.x - p2.x) + s1.x * (p0.y - p2.y)) / denominator;
        let t = (s2.x * (p0.y - p2.y) - s2.y * (p0.x - p2.x)) / denominator;

        s > 0.0 && s < 1.0 && t > 0.0 && t < 1.0
    }

    /// Shortest planar distance between two segments, `0` if they intersect.
    pub fn distance_to_segment(&self, other: &Segment) -> f64 {
        if self.intersects(other) {
            return 0.0;
        }

        self.distance_to_point(&other.0.planar())
            .min(self.distance_to_point(&other.1.planar()))
            .min(other.distance_to_point(&self.0.planar()))
            .min(other.distance_to_point(&self.1.planar()))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn length() {
        let a = Point::new_3d(0.0, 0.0, 0.0);
        let b = Point::new_3d(3.0, 4.0, 12.0);
        let segment = Segment(&a, &b);

        assert_eq!(segment.length(), 5.0);
        assert_eq!(segment.length_3d(), 13.0);
        assert_eq!(segment.midpoint(), Point2::new(1.5, 2.0));

        let c = Point::new(3.0, 4.0);
        assert_eq!(Segment(&a, &c).length_3d(), 5.0);
    }

    #[test]
    fn distance_to_point() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        let segment = Segment(&a, &b);

        assert_eq!(segment.distance_to_point(&Point2::new(5.0, 3.0)), 3.0);
        assert_eq!(segment.distance_to_point(&Point2::new(-3.0, 4.0)), 5.0);
        assert_eq!(segment.distance_to_point(&Point2::new(13.0, -4.0)), 5.0);
        assert_eq!(segment.distance_to_point(&Point2::new(7.0, 0.0)), 0.0);

        let diagonal = (Point::new(-10.0, -10.0), Point::new(10.0, 10.0));
        assert_eq!(
            Segment(&diagonal.0, &diagonal.1).distance_to_point(&Point2::new(0.0, 0.0)),
            0.0
        );
    }

    #[test]
    fn distance_to_degenerate_segment() {
        let a = Point::new(1.0, 1.0);
        let segment = Segment(&a, &a);
        assert_abs_diff_eq!(
            segment.distance_to_point(&Point2::new(4.0, 5.0)),
            5.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn intersects() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 3.0),
            Point::new(5.0, 5.0),
            Point::new(1.0, 3.0),
        ];
        let diagonal = Segment(&points[0], &points[1]);

        assert!(diagonal.intersects(&Segment(&points[2], &points[3])));
        assert!(diagonal.intersects(&Segment(&points[1], &points[4])));
        assert!(!diagonal.intersects(&Segment(&points[4], &points[5])));
        assert!(!diagonal.intersects(&Segment(&points[2], &points[6])));

        let inner = (Point::new(0.5, 0.5), Point::new(1.5, 1.5));
        assert!(diagonal.intersects(&Segment(&inner.0, &inner.1)));
    }

    #[test]
    fn crosses_only_in_interior() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, -10.0),
            Point::new(20.0, 0.0),
        ];

        let base = Segment(&points[0], &points[1]);
        assert!(base.crosses(&Segment(&points[2], &points[3])));
        assert!(!base.crosses(&Segment(&points[1], &points[2])));
        assert!(!Segment(&points[1], &points[2]).crosses(&base));

        let overlapping = Segment(&points[0], &points[4]);
        assert!(!base.crosses(&overlapping));
        assert!(base.intersects(&overlapping));
    }

    #[test]
    fn distance_to_segment() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 3.0),
            Point::new(5.0, 10.0),
            Point::new(5.0, -1.0),
        ];
        let base = Segment(&points[0], &points[1]);

        assert_eq!(base.distance_to_segment(&Segment(&points[2], &points[3])), 3.0);
        assert_eq!(base.distance_to_segment(&Segment(&points[2], &points[4])), 0.0);
        assert_eq!(
            Segment(&points[2], &points[3]).distance_to_segment(&base),
            3.0
        );
    }
}
