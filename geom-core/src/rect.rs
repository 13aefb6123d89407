use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::point::Point;

/// Axis-aligned bounding box of a geometry in (x, y).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Minimum x.
    pub x_min: f64,
    /// Minimum y.
    pub y_min: f64,
    /// Maximum x.
    pub x_max: f64,
    /// Maximum y.
    pub y_max: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Minimum x.
    pub fn x_min(&self) -> f64 {
        self.x_min
    }

    /// Maximum x.
    pub fn x_max(&self) -> f64 {
        self.x_max
    }

    /// Minimum y.
    pub fn y_min(&self) -> f64 {
        self.y_min
    }

    /// Maximum y.
    pub fn y_max(&self) -> f64 {
        self.y_max
    }

    /// Size of the rectangle along x.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Size of the rectangle along y.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Center of the rectangle.
    pub fn center(&self) -> Point2<f64> {
        Point2::new(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
        )
    }

    /// Smallest rectangle containing both `self` and `other`.
    pub fn merge(&self, other: Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Degenerate rectangle of a single point. Returns `None` for an empty point.
    pub fn from_point(p: &Point) -> Option<Self> {
        let c = p.coord()?;
        Some(Self {
            x_min: c.x,
            x_max: c.x,
            y_min: c.y,
            y_max: c.y,
        })
    }

    /// Bounding rectangle of the given points. Empty points are skipped, and `None` is returned if no non-empty
    /// point is left.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        points
            .into_iter()
            .filter_map(Self::from_point)
            .reduce(|acc, rect| acc.merge(rect))
    }

    /// Returns true if the point lies inside the rectangle or on its border.
    pub fn contains(&self, point: &Point2<f64>) -> bool {
        self.x_min <= point.x
            && self.x_max >= point.x
            && self.y_min <= point.y
            && self.y_max >= point.y
    }
}
