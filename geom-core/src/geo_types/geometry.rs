use geo_types::Coord;

use crate::error::{GeometryError, Result};
use crate::geometry::Geom;
use crate::geometry_collection::GeometryCollection;
use crate::line_string::LineString;
use crate::multi_line_string::MultiLineString;
use crate::multi_point::MultiPoint;
use crate::multi_polygon::MultiPolygon;
use crate::point::Point;
use crate::polygon::Polygon;

fn points_from_coords<'a>(coords: impl IntoIterator<Item = &'a Coord<f64>>) -> Result<Vec<Point>> {
    coords.into_iter().map(|c| Point::try_from(*c)).collect()
}

fn coords_from_points(points: &[Point]) -> Result<Vec<Coord<f64>>> {
    points.iter().map(Coord::try_from).collect()
}

impl TryFrom<&geo_types::LineString<f64>> for LineString {
    type Error = GeometryError;

    fn try_from(value: &geo_types::LineString<f64>) -> Result<Self> {
        LineString::new(points_from_coords(value.coords())?)
    }
}

impl TryFrom<&geo_types::Line<f64>> for LineString {
    type Error = GeometryError;

    fn try_from(value: &geo_types::Line<f64>) -> Result<Self> {
        LineString::new(points_from_coords([&value.start, &value.end])?)
    }
}

impl TryFrom<&geo_types::Polygon<f64>> for Polygon {
    type Error = GeometryError;

    /// Rings that are not closed get closed. A polygon with an empty exterior is converted into an empty polygon.
    fn try_from(value: &geo_types::Polygon<f64>) -> Result<Self> {
        if value.exterior().0.is_empty() {
            return Ok(Polygon::empty());
        }

        let rings = std::iter::once(value.exterior())
            .chain(value.interiors())
            .map(LineString::try_from)
            .collect::<Result<Vec<_>>>()?;
        Polygon::new_closing(rings)
    }
}

impl TryFrom<&geo_types::MultiPoint<f64>> for MultiPoint {
    type Error = GeometryError;

    fn try_from(value: &geo_types::MultiPoint<f64>) -> Result<Self> {
        Ok(MultiPoint::new(
            value
                .iter()
                .map(|p| Point::try_from(*p))
                .collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&geo_types::MultiLineString<f64>> for MultiLineString {
    type Error = GeometryError;

    fn try_from(value: &geo_types::MultiLineString<f64>) -> Result<Self> {
        Ok(MultiLineString::new(
            value
                .iter()
                .map(LineString::try_from)
                .collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&geo_types::MultiPolygon<f64>> for MultiPolygon {
    type Error = GeometryError;

    fn try_from(value: &geo_types::MultiPolygon<f64>) -> Result<Self> {
        Ok(MultiPolygon::new(
            value.iter().map(Polygon::try_from).collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&geo_types::GeometryCollection<f64>> for GeometryCollection {
    type Error = GeometryError;

    fn try_from(value: &geo_types::GeometryCollection<f64>) -> Result<Self> {
        Ok(GeometryCollection::new(
            value.iter().map(Geom::try_from).collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&geo_types::Geometry<f64>> for Geom {
    type Error = GeometryError;

    /// Lines become two-point line strings, rectangles and triangles become polygons.
    fn try_from(value: &geo_types::Geometry<f64>) -> Result<Self> {
        use geo_types::Geometry as G;

        Ok(match value {
            G::Point(v) => Point::try_from(*v)?.into(),
            G::Line(v) => LineString::try_from(v)?.into(),
            G::LineString(v) => LineString::try_from(v)?.into(),
            G::Polygon(v) => Polygon::try_from(v)?.into(),
            G::MultiPoint(v) => MultiPoint::try_from(v)?.into(),
            G::MultiLineString(v) => MultiLineString::try_from(v)?.into(),
            G::MultiPolygon(v) => MultiPolygon::try_from(v)?.into(),
            G::GeometryCollection(v) => GeometryCollection::try_from(v)?.into(),
            G::Rect(v) => Polygon::try_from(&v.to_polygon())?.into(),
            G::Triangle(v) => Polygon::try_from(&v.to_polygon())?.into(),
        })
    }
}

impl TryFrom<geo_types::Geometry<f64>> for Geom {
    type Error = GeometryError;

    fn try_from(value: geo_types::Geometry<f64>) -> Result<Self> {
        Geom::try_from(&value)
    }
}

impl TryFrom<&LineString> for geo_types::LineString<f64> {
    type Error = GeometryError;

    fn try_from(value: &LineString) -> Result<Self> {
        Ok(geo_types::LineString::new(coords_from_points(
            value.points(),
        )?))
    }
}

impl TryFrom<&Polygon> for geo_types::Polygon<f64> {
    type Error = GeometryError;

    fn try_from(value: &Polygon) -> Result<Self> {
        let exterior = match value.exterior_ring() {
            Some(ring) => ring.try_into()?,
            None => geo_types::LineString::new(vec![]),
        };
        let interiors = value
            .interior_rings()
            .iter()
            .map(geo_types::LineString::try_from)
            .collect::<Result<_>>()?;

        Ok(geo_types::Polygon::new(exterior, interiors))
    }
}

impl TryFrom<&MultiPoint> for geo_types::MultiPoint<f64> {
    type Error = GeometryError;

    /// Fails if any of the points is empty.
    fn try_from(value: &MultiPoint) -> Result<Self> {
        Ok(geo_types::MultiPoint::new(
            value
                .points()
                .iter()
                .map(geo_types::Point::try_from)
                .collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&MultiLineString> for geo_types::MultiLineString<f64> {
    type Error = GeometryError;

    fn try_from(value: &MultiLineString) -> Result<Self> {
        Ok(geo_types::MultiLineString::new(
            value
                .lines()
                .iter()
                .map(geo_types::LineString::try_from)
                .collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&MultiPolygon> for geo_types::MultiPolygon<f64> {
    type Error = GeometryError;

    fn try_from(value: &MultiPolygon) -> Result<Self> {
        Ok(geo_types::MultiPolygon::new(
            value
                .polygons()
                .iter()
                .map(geo_types::Polygon::try_from)
                .collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&GeometryCollection> for geo_types::GeometryCollection<f64> {
    type Error = GeometryError;

    fn try_from(value: &GeometryCollection) -> Result<Self> {
        Ok(geo_types::GeometryCollection::new_from(
            value
                .geometries()
                .iter()
                .map(geo_types::Geometry::try_from)
                .collect::<Result<_>>()?,
        ))
    }
}

impl TryFrom<&Geom> for geo_types::Geometry<f64> {
    type Error = GeometryError;

    /// Elevation and measure are dropped. Fails if an empty point cannot be represented.
    fn try_from(value: &Geom) -> Result<Self> {
        use geo_types::Geometry as G;

        Ok(match value {
            Geom::Point(v) => G::Point(v.try_into()?),
            Geom::LineString(v) => G::LineString(v.try_into()?),
            Geom::Polygon(v) => G::Polygon(v.try_into()?),
            Geom::MultiPoint(v) => G::MultiPoint(v.try_into()?),
            Geom::MultiLineString(v) => G::MultiLineString(v.try_into()?),
            Geom::MultiPolygon(v) => G::MultiPolygon(v.try_into()?),
            Geom::GeometryCollection(v) => G::GeometryCollection(v.try_into()?),
        })
    }
}
