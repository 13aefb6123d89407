/// Reference ellipsoid used by geodesic calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Datum {
    semimajor: f64,
    semiminor: f64,
    inv_flattening: f64,
}

impl Datum {
    /// WGS84 ellipsoid.
    pub const WGS84: Self = Datum {
        semimajor: 6_378_137.0,
        semiminor: 6_356_752.314245,
        inv_flattening: 298.257223563,
    };

    /// Creates a new ellipsoid from its semi-major axis (in meters) and inverse flattening.
    pub fn new(semimajor: f64, inv_flattening: f64) -> Self {
        Self {
            semimajor,
            semiminor: semimajor * (1.0 - 1.0 / inv_flattening),
            inv_flattening,
        }
    }

    /// Equatorial radius in meters.
    pub fn semimajor(&self) -> f64 {
        self.semimajor
    }

    /// Polar radius in meters.
    pub fn semiminor(&self) -> f64 {
        self.semiminor
    }

    /// Inverse flattening.
    pub fn inv_flattening(&self) -> f64 {
        self.inv_flattening
    }

    /// Flattening `(a - b) / a`.
    pub fn flattening(&self) -> f64 {
        1.0 / self.inv_flattening
    }
}

impl Default for Datum {
    fn default() -> Self {
        Self::WGS84
    }
}
