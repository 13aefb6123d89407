//! Machinery shared by the geometries made of ordered components.

use log::debug;
use nalgebra::Point2;

use crate::array::CoordArray;
use crate::error::{GeometryError, Result};
use crate::geometry::{Geom, Geometry};
use crate::point::Point;

/// Geometry consisting of an ordered list of components.
///
/// Components are exposed read-only. Invariants checked on construction therefore hold for the whole lifetime of
/// the value.
pub trait Collection {
    /// Type of the components.
    type Component: Geometry;

    /// Components in order.
    fn components(&self) -> &[Self::Component];

    /// Number of components.
    fn num_components(&self) -> usize {
        self.components().len()
    }

    /// `n`-th component, counting from `1`.
    fn component_n(&self, n: usize) -> Option<&Self::Component> {
        n.checked_sub(1).and_then(|i| self.components().get(i))
    }
}

/// Array representation of a list of components.
pub(crate) fn components_array<G: Geometry>(components: &[G]) -> CoordArray {
    CoordArray::List(components.iter().map(Geometry::as_array).collect())
}

/// Builds components from the items of a list array.
pub(crate) fn components_from_array<G>(
    array: &CoordArray,
    build: impl Fn(&CoordArray) -> Result<G>,
) -> Result<Vec<G>> {
    array.as_list()?.iter().map(build).collect()
}

/// Converts dynamically typed components into the component type of a collection.
pub(crate) fn downcast_components<G>(components: Vec<Geom>) -> Result<Vec<G>>
where
    G: TryFrom<Geom, Error = GeometryError>,
{
    components
        .into_iter()
        .map(G::try_from)
        .collect::<Result<_>>()
        .inspect_err(|err| debug!("Rejected collection components: {err}"))
}

/// Fails with [`GeometryError::EmptyComponent`] on the first empty component.
pub(crate) fn ensure_not_empty<G: Geometry>(components: &[G]) -> Result<()> {
    match components.iter().position(Geometry::is_empty) {
        Some(index) => {
            let err = GeometryError::EmptyComponent {
                kind: components[index].geometry_type(),
                index: index + 1,
            };
            debug!("Rejected collection components: {err}");
            Err(err)
        }
        None => Ok(()),
    }
}

/// Arithmetic mean of the given positions. Empty point if there are none.
pub(crate) fn mean_point(points: impl IntoIterator<Item = Point2<f64>>) -> Point {
    let (sum_x, sum_y, count) = points
        .into_iter()
        .fold((0.0, 0.0, 0usize), |(x, y, count), p| {
            (x + p.x, y + p.y, count + 1)
        });

    if count == 0 {
        Point::empty()
    } else {
        Point::new(sum_x / count as f64, sum_y / count as f64)
    }
}

/// Unweighted mean of the centroids of non-empty components.
pub(crate) fn mean_centroid<G: Geometry>(components: &[G]) -> Point {
    mean_point(
        components
            .iter()
            .filter_map(|component| component.centroid().coord()),
    )
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::geometry_type::GeometryType;
    use crate::multi_point::MultiPoint;

    #[test]
    fn component_n_is_one_based() {
        let multi_point = MultiPoint::new(vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);

        assert_eq!(multi_point.num_components(), 2);
        assert_eq!(multi_point.component_n(0), None);
        assert_eq!(multi_point.component_n(1), Some(&Point::new(1.0, 1.0)));
        assert_eq!(multi_point.component_n(2), Some(&Point::new(2.0, 2.0)));
        assert_eq!(multi_point.component_n(3), None);
    }

    #[test]
    fn ensure_not_empty_reports_position() {
        let points = [Point::new(1.0, 1.0), Point::empty()];
        assert_eq!(
            ensure_not_empty(&points),
            Err(GeometryError::EmptyComponent {
                kind: GeometryType::Point,
                index: 2
            })
        );
        assert_eq!(ensure_not_empty(&points[..1]), Ok(()));
    }

    #[test]
    fn downcast_rejects_foreign_types() {
        let components = vec![Geom::from(Point::new(1.0, 1.0)), Geom::from(MultiPoint::new(vec![]))];
        assert_matches!(
            downcast_components::<Point>(components),
            Err(GeometryError::WrongComponentType {
                found: GeometryType::MultiPoint,
                expected: GeometryType::Point
            })
        );
    }

    #[test]
    fn mean_point_of_nothing_is_empty() {
        assert!(mean_point([]).is_empty());
        assert_eq!(
            mean_point([Point2::new(0.0, 0.0), Point2::new(2.0, 4.0)]),
            Point::new(1.0, 2.0)
        );
    }
}
