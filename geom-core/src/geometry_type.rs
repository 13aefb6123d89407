//! See documentation for [`GeometryType`].
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Variant tag of a geometry.
///
/// Every value of [`Geom`](crate::Geom) has exactly one of these types, and the type never changes during the
/// lifetime of the value.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum GeometryType {
    /// Single position.
    Point,
    /// Connected sequence of points.
    LineString,
    /// Surface bounded by closed rings.
    Polygon,
    /// Set of points.
    MultiPoint,
    /// Set of line strings.
    MultiLineString,
    /// Set of polygons.
    MultiPolygon,
    /// Heterogeneous set of geometries.
    GeometryCollection,
}

impl GeometryType {
    /// Topological dimension of geometries of this type.
    ///
    /// Returns `None` for [`GeometryType::GeometryCollection`], since its dimension depends on its content.
    pub fn dimension(&self) -> Option<usize> {
        match self {
            Self::Point | Self::MultiPoint => Some(0),
            Self::LineString | Self::MultiLineString => Some(1),
            Self::Polygon | Self::MultiPolygon => Some(2),
            Self::GeometryCollection => None,
        }
    }

    /// Returns the name used by the OGC Simple Features standard.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Point => "Point",
            Self::LineString => "LineString",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::MultiLineString => "MultiLineString",
            Self::MultiPolygon => "MultiPolygon",
            Self::GeometryCollection => "GeometryCollection",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_ogc_names() {
        assert_eq!(GeometryType::MultiLineString.to_string(), "MultiLineString");
        assert_eq!(
            format!("{}s", GeometryType::Point),
            "Points".to_string()
        );
    }

    #[test]
    fn dimension() {
        assert_eq!(GeometryType::MultiPoint.dimension(), Some(0));
        assert_eq!(GeometryType::LineString.dimension(), Some(1));
        assert_eq!(GeometryType::MultiPolygon.dimension(), Some(2));
        assert_eq!(GeometryType::GeometryCollection.dimension(), None);
    }
}
