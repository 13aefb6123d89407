//! Distances between two points on the surface of the Earth.
//!
//! All functions read point coordinates as degrees of latitude and longitude. Longitudes are not unwrapped, so a
//! segment always goes the way its coordinate difference points to.

use log::{debug, trace};

use crate::geo::{Datum, GeoPoint};

/// Maximum number of iterations of Vincenty's inverse formula before the calculation is considered divergent.
pub const VINCENTY_ITERATION_LIMIT: usize = 100;

const VINCENTY_THRESHOLD: f64 = 1e-12;

/// Great circle distance on a sphere of the given `radius`.
///
/// Uses the `atan2` form of the central angle, which stays accurate for both very short and nearly antipodal
/// segments. If both points have elevation, the elevation difference is added as the second cathetus:
/// `sqrt(d² + Δz²)`.
pub fn great_circle_distance(from: &impl GeoPoint, to: &impl GeoPoint, radius: f64) -> f64 {
    let (lat1, lat2) = (from.lat_rad(), to.lat_rad());
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_lat2, cos_lat2) = lat2.sin_cos();
    let (sin_dlon, cos_dlon) = (to.lon_rad() - from.lon_rad()).sin_cos();

    let y = ((cos_lat2 * sin_dlon).powi(2)
        + (cos_lat1 * sin_lat2 - sin_lat1 * cos_lat2 * cos_dlon).powi(2))
    .sqrt();
    let x = sin_lat1 * sin_lat2 + cos_lat1 * cos_lat2 * cos_dlon;
    let distance = radius * y.atan2(x);

    match (from.elevation(), to.elevation()) {
        (Some(z1), Some(z2)) => {
            let dz = z2 - z1;
            (distance * distance + dz * dz).sqrt()
        }
        _ => distance,
    }
}

/// Great circle distance on a sphere of the given `radius` calculated with the haversine formula. Elevation is
/// ignored.
pub fn haversine_distance(from: &impl GeoPoint, to: &impl GeoPoint, radius: f64) -> f64 {
    let (lat1, lat2) = (from.lat_rad(), to.lat_rad());
    let dlat = lat2 - lat1;
    let dlon = to.lon_rad() - from.lon_rad();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    2.0 * radius * a.min(1.0).sqrt().asin()
}

/// Distance on the surface of the `datum` ellipsoid calculated with Vincenty's inverse formula.
///
/// Coincident points are at distance `0`. Returns `None` if the iteration does not converge within
/// [`VINCENTY_ITERATION_LIMIT`] steps, which happens for nearly antipodal points.
pub fn vincenty_distance(from: &impl GeoPoint, to: &impl GeoPoint, datum: &Datum) -> Option<f64> {
    let a = datum.semimajor();
    let b = datum.semiminor();
    let f = datum.flattening();

    let l = to.lon_rad() - from.lon_rad();
    let (sin_u1, cos_u1) = ((1.0 - f) * from.lat_rad().tan()).atan().sin_cos();
    let (sin_u2, cos_u2) = ((1.0 - f) * to.lat_rad().tan()).atan().sin_cos();

    let mut lambda = l;
    let mut iterations = 0;
    let (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m) = loop {
        let (sin_lambda, cos_lambda) = lambda.sin_cos();
        let sin_sigma = ((cos_u2 * sin_lambda).powi(2)
            + (cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda).powi(2))
        .sqrt();
        if sin_sigma == 0.0 {
            return Some(0.0);
        }

        let cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_lambda;
        let sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_lambda / sin_sigma;
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;

        // Both points on the equator.
        let cos_2sigma_m = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos_sq_alpha
        };

        let c = f / 16.0 * cos_sq_alpha * (4.0 + f * (4.0 - 3.0 * cos_sq_alpha));
        let previous = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma
                        * (cos_2sigma_m + c * cos_sigma * (-1.0 + 2.0 * cos_2sigma_m * cos_2sigma_m)));
        iterations += 1;

        if (lambda - previous).abs() <= VINCENTY_THRESHOLD {
            trace!("Vincenty formula converged after {iterations} iterations");
            break (sin_sigma, cos_sigma, sigma, cos_sq_alpha, cos_2sigma_m);
        }

        if iterations >= VINCENTY_ITERATION_LIMIT {
            debug!(
                "Vincenty formula failed to converge between ({}, {}) and ({}, {})",
                from.lon(),
                from.lat(),
                to.lon(),
                to.lat()
            );
            return None;
        }
    };

    let u_sq = cos_sq_alpha * (a * a - b * b) / (b * b);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sigma_m
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sigma_m.powi(2))
                    - big_b / 6.0
                        * cos_2sigma_m
                        * (-3.0 + 4.0 * sin_sigma.powi(2))
                        * (-3.0 + 4.0 * cos_2sigma_m.powi(2))));

    Some(b * big_a * (sigma - delta_sigma))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::point::Point;

    const RADIUS: f64 = 6_378_137.0;

    #[test]
    fn great_circle() {
        let origin = Point::new(0.0, 0.0);
        assert_abs_diff_eq!(
            great_circle_distance(&origin, &Point::new(10.0, 0.0), RADIUS),
            1113194.9079327357,
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            great_circle_distance(&Point::new(0.0, 47.0), &Point::new(10.0, 47.0), RADIUS),
            758681.06593496865,
            epsilon = 1e-8
        );
        assert_eq!(great_circle_distance(&origin, &origin, RADIUS), 0.0);
    }

    #[test]
    fn great_circle_adds_elevation_difference() {
        assert_abs_diff_eq!(
            great_circle_distance(
                &Point::new_3d(0.0, 0.0, 0.0),
                &Point::new_3d(10.0, 0.0, 5000.0),
                RADIUS
            ),
            1113206.136817154,
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            great_circle_distance(
                &Point::new(0.0, 0.0),
                &Point::new_3d(10.0, 0.0, 5000.0),
                RADIUS
            ),
            1113194.9079327357,
            epsilon = 1e-8
        );
    }

    #[test]
    fn haversine() {
        assert_abs_diff_eq!(
            haversine_distance(&Point::new(0.0, 0.0), &Point::new(10.0, 0.0), RADIUS),
            1113194.9079327371,
            epsilon = 1e-7
        );
        assert_abs_diff_eq!(
            haversine_distance(
                &Point::new_3d(0.0, 47.0, 0.0),
                &Point::new_3d(10.0, 47.0, 1000.0),
                RADIUS
            ),
            758681.06593497901,
            epsilon = 1e-7
        );
    }

    #[test]
    fn vincenty() {
        let datum = Datum::WGS84;
        assert_abs_diff_eq!(
            vincenty_distance(&Point::new(0.0, 0.0), &Point::new(10.0, 0.0), &datum).unwrap(),
            1113194.9079322326,
            epsilon = 1e-8
        );
        assert_abs_diff_eq!(
            vincenty_distance(&Point::new(0.0, 47.0), &Point::new(10.0, 47.0), &datum).unwrap(),
            760043.0186457854,
            epsilon = 1e-8
        );
    }

    #[test]
    fn vincenty_of_coincident_points_is_zero() {
        let point = Point::new(19.0, 47.0);
        assert_eq!(vincenty_distance(&point, &point, &Datum::WGS84), Some(0.0));
    }

    #[test]
    fn vincenty_fails_for_nearly_antipodal_points() {
        assert_eq!(
            vincenty_distance(
                &Point::new(-89.7, 0.0),
                &Point::new(89.7, 0.0),
                &Datum::WGS84
            ),
            None
        );
    }

    #[test]
    fn nearly_antipodal_points_on_a_sphere() {
        let (from, to) = (Point::new(-89.7, 0.0), Point::new(89.7, 0.0));
        assert_abs_diff_eq!(
            great_circle_distance(&from, &to, RADIUS),
            19970716.64831328,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            haversine_distance(&from, &to, RADIUS),
            great_circle_distance(&from, &to, RADIUS),
            epsilon = 1e-6
        );
    }
}
