//! Conversions between the geometries of this crate and the [`geo_types`] geometries.
//!
//! Converting into `geo_types` drops elevation and measure, and fails if an empty point would have to be placed
//! into a coordinate sequence. Converting from `geo_types` validates the geometry the same way the constructors
//! of this crate do.

mod geometry;
mod point;
