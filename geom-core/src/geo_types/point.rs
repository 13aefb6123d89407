use geo_types::{coord, Coord};

use crate::error::{GeometryError, Result};
use crate::geo::GeoPoint;
use crate::point::Point;

impl GeoPoint for Coord<f64> {
    fn lat(&self) -> f64 {
        self.y
    }

    fn lon(&self) -> f64 {
        self.x
    }
}

impl GeoPoint for geo_types::Point<f64> {
    fn lat(&self) -> f64 {
        self.y()
    }

    fn lon(&self) -> f64 {
        self.x()
    }
}

impl TryFrom<Coord<f64>> for Point {
    type Error = GeometryError;

    fn try_from(value: Coord<f64>) -> Result<Self> {
        Point::from_coords(Some(value.x), Some(value.y), None, None)
    }
}

impl TryFrom<geo_types::Point<f64>> for Point {
    type Error = GeometryError;

    fn try_from(value: geo_types::Point<f64>) -> Result<Self> {
        value.0.try_into()
    }
}

impl TryFrom<&Point> for Coord<f64> {
    type Error = GeometryError;

    fn try_from(value: &Point) -> Result<Self> {
        let position = value
            .coord()
            .ok_or_else(|| GeometryError::Conversion("empty point has no coordinates".into()))?;
        Ok(coord!(x: position.x, y: position.y))
    }
}

impl TryFrom<&Point> for geo_types::Point<f64> {
    type Error = GeometryError;

    fn try_from(value: &Point) -> Result<Self> {
        Coord::try_from(value).map(geo_types::Point)
    }
}
