mod constants;
mod geocart;

pub use geocart::GEOCENTRIC_TOLERANCE;
pub use geocart::MAX_GEOCENTRIC_ITERATIONS;

use crate::math::series::taylor::horner;
use crate::Error;
use std::f64::consts::FRAC_PI_2;

/// An ellipsoid of revolution.
///
/// The defining parameters are validated once, at construction, and the
/// derived shape parameters are computed and cached right away, so all
/// accessors are plain field reads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
    b: f64,
    es: f64,
    e: f64,
    eps: f64,
    n: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::derive(6_378_137.0, 1. / 298.257_222_100_882_7)
    }
}

/// Constructors for `Ellipsoid`
impl Ellipsoid {
    /// User defined ellipsoid, from semimajor axis and reciprocal flattening.
    /// Fails if the semimajor axis is not positive, or the reciprocal
    /// flattening does not exceed 1 (i.e. the flattening is not in (0, 1)).
    pub fn new(semimajor_axis: f64, inverse_flattening: f64) -> Result<Ellipsoid, Error> {
        if !semimajor_axis.is_finite() || semimajor_axis <= 0. {
            return Err(Error::InvalidEllipsoid(format!(
                "semimajor axis must be positive, got {semimajor_axis}"
            )));
        }
        if !inverse_flattening.is_finite() || inverse_flattening <= 1. {
            return Err(Error::InvalidEllipsoid(format!(
                "inverse flattening must exceed 1, got {inverse_flattening}"
            )));
        }
        Ok(Ellipsoid::derive(semimajor_axis, 1. / inverse_flattening))
    }

    /// Predefined ellipsoid; built-in, or given as a string formatted
    /// (a, rf) tuple, e.g. "6378137, 298.25"
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        // Is it one of the few builtins?
        if let Some(e) = constants::ELLIPSOID_LIST
            .iter()
            .find(|ellps| ellps.0.eq_ignore_ascii_case(name))
        {
            return Ellipsoid::new(e.1, e.2);
        }

        // Remove optional parenthesis
        let mut name = name.trim();
        if let Some(stripped) = name.strip_prefix('(').and_then(|n| n.strip_suffix(')')) {
            name = stripped;
        }

        // The "semimajor, reciproque-flattening" form, e.g. "6378137, 298.3"
        let a_and_rf = name.split(',').collect::<Vec<_>>();
        if a_and_rf.len() == 2_usize {
            if let (Ok(a), Ok(rf)) = (
                a_and_rf[0].trim().parse::<f64>(),
                a_and_rf[1].trim().parse::<f64>(),
            ) {
                return Ellipsoid::new(a, rf);
            }
        }

        Err(Error::NotFound(
            String::from(name),
            String::from(" (Ellipsoid::named)"),
        ))
    }

    /// Names of the built-in ellipsoids
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        constants::ELLIPSOID_LIST.iter().map(|e| e.0)
    }

    // Unchecked: only for parameters known to be valid
    fn derive(a: f64, f: f64) -> Ellipsoid {
        let es = f * (2. - f);
        Ellipsoid {
            a,
            f,
            b: a * (1. - f),
            es,
            e: es.sqrt(),
            eps: es / (1. - es),
            n: f / (2. - f),
        }
    }
}

impl Ellipsoid {
    // ----- Size ------------------------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b = a(1 - f)*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.b
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    #[must_use]
    pub fn inverse_flattening(&self) -> f64 {
        1. / self.f
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.n
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a² = f(2 - f)*
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.es
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.e
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        self.eps
    }

    // ----- Curvatures and meridians ----------------------------------------------

    /// The radius of curvature in the prime vertical, *N*. Latitude in radians.
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        self.a / (1.0 - latitude.sin().powi(2) * self.es).sqrt()
    }

    /// The Normalized Meridian Arc Unit, *Qn*, is the mean length of one radian
    /// of the meridian, in units of the semimajor axis.
    /// [Karney 2011](crate::Bibliography::Kar11) eq. (14)
    #[must_use]
    pub fn normalized_meridian_arc_unit(&self) -> f64 {
        let n = self.n;
        horner(n * n, &constants::MERIDIAN_ARC_COEFFICIENTS) / (1. + n)
    }

    /// The rectifying radius, *A*: the radius of a sphere having the same
    /// meridian length as the ellipsoid
    #[must_use]
    pub fn rectifying_radius(&self) -> f64 {
        self.a * self.normalized_meridian_arc_unit()
    }

    /// The Meridian Quadrant, *Qm*, is the distance from the equator to one of the poles.
    #[must_use]
    pub fn meridian_quadrant(&self) -> f64 {
        FRAC_PI_2 * self.rectifying_radius()
    }
}

// ----- Tests ---------------------------------------------------------------------
