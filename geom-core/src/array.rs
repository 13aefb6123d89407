//! Nested numeric array representation of geometries.
//!
//! This is the shape format codecs exchange with the crate: [`Geometry::as_array`](crate::Geometry::as_array)
//! produces it, and every geometry type has a `from_array` constructor consuming it. A point is a flat list of
//! up to four coordinates `[x, y, z, m]` (`z` is `null` when only `m` is present), and every other geometry is a
//! list of the arrays of its components.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{GeometryError, Result};

/// Nested numeric array. See module documentation for details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordArray {
    /// Ordered list of component arrays.
    List(Vec<CoordArray>),
    /// Coordinates of a single point. `None` marks an absent coordinate in the middle of the tuple.
    Coords(Vec<Option<f64>>),
}

impl CoordArray {
    /// Empty list. Represents any empty collection.
    pub fn empty() -> Self {
        Self::List(vec![])
    }

    /// Coordinates of a point given as a list of numbers.
    pub fn coords(values: impl IntoIterator<Item = f64>) -> Self {
        Self::Coords(values.into_iter().map(Some).collect())
    }

    /// Nesting depth: `0` for point coordinates, `1` for a list of points etc.
    ///
    /// An empty list has depth `1`.
    pub fn depth(&self) -> usize {
        match self {
            Self::Coords(_) => 0,
            Self::List(items) => 1 + items.iter().map(Self::depth).max().unwrap_or(0),
        }
    }

    /// Returns the components of a list array. Empty coordinates are accepted as an empty list.
    pub fn as_list(&self) -> Result<&[CoordArray]> {
        match self {
            Self::List(items) => Ok(items),
            Self::Coords(values) if values.is_empty() => Ok(&[]),
            Self::Coords(values) => Err(GeometryError::MalformedComponents(format!(
                "expected a list of components, found coordinates {values:?}"
            ))),
        }
    }

    /// Returns the coordinates of a point array. An empty list is accepted as empty coordinates.
    pub fn as_coords(&self) -> Result<&[Option<f64>]> {
        match self {
            Self::Coords(values) => Ok(values),
            Self::List(items) if items.is_empty() => Ok(&[]),
            Self::List(_) => Err(GeometryError::MalformedComponents(
                "expected point coordinates, found a list of components".into(),
            )),
        }
    }

    /// Compares two arrays allowing every pair of coordinates to differ by less than `epsilon`.
    ///
    /// Shapes must match exactly, absent coordinates match only absent ones and NaN matches NaN.
    pub fn approx_eq(&self, other: &Self, epsilon: f64) -> bool {
        match (self, other) {
            (Self::List(a), Self::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(a, b)| a.approx_eq(b, epsilon))
            }
            (Self::Coords(a), Self::Coords(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(a, b)| match (a, b) {
                        (None, None) => true,
                        (Some(a), Some(b)) if a.is_nan() && b.is_nan() => true,
                        (Some(a), Some(b)) => (a - b).abs() < epsilon,
                        _ => false,
                    })
            }
            (Self::List(a), Self::Coords(b)) | (Self::Coords(b), Self::List(a)) => {
                a.is_empty() && b.is_empty()
            }
        }
    }
}

impl TryFrom<&Value> for CoordArray {
    type Error = GeometryError;

    fn try_from(value: &Value) -> Result<Self> {
        let Value::Array(items) = value else {
            return Err(GeometryError::MalformedComponents(format!(
                "expected a list, found {value}"
            )));
        };

        if items.iter().all(|v| matches!(v, Value::Array(_))) {
            return Ok(Self::List(
                items
                    .iter()
                    .map(CoordArray::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ));
        }

        let coords = items
            .iter()
            .map(|item| match item {
                Value::Null => Ok(None),
                Value::Number(n) => n
                    .as_f64()
                    .map(Some)
                    .ok_or_else(|| GeometryError::NonNumericCoordinate(n.to_string())),
                Value::Bool(_) | Value::String(_) => {
                    Err(GeometryError::NonNumericCoordinate(item.to_string()))
                }
                Value::Array(_) | Value::Object(_) => Err(GeometryError::MalformedComponents(
                    format!("coordinates mixed with nested values: {value}"),
                )),
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self::Coords(coords))
    }
}

impl From<&CoordArray> for Value {
    fn from(array: &CoordArray) -> Self {
        match array {
            CoordArray::List(items) => Value::Array(items.iter().map(Value::from).collect()),
            CoordArray::Coords(values) => Value::Array(
                values
                    .iter()
                    .map(|v| {
                        v.and_then(serde_json::Number::from_f64)
                            .map_or(Value::Null, Value::Number)
                    })
                    .collect(),
            ),
        }
    }
}
