use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Orientation of a triplet of points.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Clockwise
    Clockwise,
    /// Counterclockwise
    Counterclockwise,
    /// Collinear
    Collinear,
}

impl Orientation {
    /// Determines orientation of a triplet of points.
    ///
    /// Triplets containing NaN coordinates are reported as collinear.
    pub fn triplet(p: &Point2<f64>, q: &Point2<f64>, r: &Point2<f64>) -> Self {
        let cross = (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y);
        if cross > 0.0 {
            Self::Clockwise
        } else if cross < 0.0 {
            Self::Counterclockwise
        } else {
            Self::Collinear
        }
    }
}
