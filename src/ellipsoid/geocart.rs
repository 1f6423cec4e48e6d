use super::*;
use crate::coordinate::{CartesianPoint, GeographicPoint};
use log::trace;

/// Convergence criterion (radians) for the latitude iteration of
/// [`Ellipsoid::geographic`]
pub const GEOCENTRIC_TOLERANCE: f64 = 1e-10;

/// Safety bound on the latitude iteration of [`Ellipsoid::geographic`].
/// Points within a few thousand km of the surface converge in less than 10.
pub const MAX_GEOCENTRIC_ITERATIONS: usize = 32;

/// Geographic <--> Cartesian conversion
impl Ellipsoid {
    /// Geographic (degrees, metres) to geocentric cartesian conversion.
    ///
    /// Closed form, no iteration.
    #[allow(non_snake_case)] // make it possible to mimic math notation
    pub fn cartesian(&self, geographic: &GeographicPoint) -> Result<CartesianPoint, Error> {
        let lat = geographic.latitude;
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidLatitude(lat));
        }
        if !geographic.longitude.is_finite() {
            return Err(Error::InvalidLongitude(geographic.longitude));
        }

        let (phi, lam) = geographic.to_radians();
        let h = geographic.height;

        // Exactly a on the equator: Spare the division
        let N = if phi == 0. {
            self.a
        } else {
            self.prime_vertical_radius_of_curvature(phi)
        };

        let (sinphi, cosphi) = phi.sin_cos();
        let (sinlam, coslam) = lam.sin_cos();
        let bb_aa = (self.b * self.b) / (self.a * self.a);

        let X = (N + h) * cosphi * coslam;
        let Y = (N + h) * cosphi * sinlam;
        let Z = (bb_aa * N + h) * sinphi;

        Ok(CartesianPoint::new(X, Y, Z))
    }

    /// Geocentric cartesian to geographic (degrees, metres) conversion.
    ///
    /// The latitude is found by fixed-point iteration on the radius of
    /// curvature in the prime vertical, in the spirit of
    /// [Bowring (1976)](crate::Bibliography::Bow76), until two consecutive
    /// iterates differ by at most [`GEOCENTRIC_TOLERANCE`] radians.
    #[allow(non_snake_case)] // make it possible to mimic math notation
    pub fn geographic(&self, cartesian: &CartesianPoint) -> Result<GeographicPoint, Error> {
        if !cartesian.is_finite() {
            return Err(Error::InvalidCartesian(format!("{cartesian:?}")));
        }
        let (X, Y, Z) = (cartesian.x, cartesian.y, cartesian.z);

        // The longitude is straightforward: Plain geometry in the equatoreal plane
        let lam = Y.atan2(X);

        // The perpendicular distance from the point coordinate to the Z-axis
        let p = X.hypot(Y);

        // For p < 1 picometer, we simplify things to avoid numerical havoc.
        if p < 1.0e-12 {
            // The sign of Z determines the hemisphere
            let phi = FRAC_PI_2.copysign(Z);
            // We have forced phi to one of the poles, so the height is |Z| - b
            let h = Z.abs() - self.b;
            return Ok(GeographicPoint::with_height(
                phi.to_degrees(),
                lam.to_degrees(),
                h,
            ));
        }

        // Exact for points on the ellipsoid surface
        let mut phi = (Z * (1. + self.eps) / p).atan();
        let mut step = f64::INFINITY;
        let mut iterations = 0;
        while step > GEOCENTRIC_TOLERANCE {
            if iterations == MAX_GEOCENTRIC_ITERATIONS {
                return Err(Error::NonConvergence {
                    iterations,
                    residual: step,
                });
            }
            let sinphi = phi.sin();
            let N = self.a / (1. - self.es * sinphi * sinphi).sqrt();
            let next = ((Z + N * self.es * sinphi) / p).atan();
            step = (next - phi).abs();
            phi = next;
            iterations += 1;
        }
        trace!("geographic: latitude converged after {iterations} iterations");

        // One more step, with N from the converged latitude
        let sinphi = phi.sin();
        let N = self.a / (1. - self.es * sinphi * sinphi).sqrt();
        phi = ((Z + N * self.es * sinphi) / p).atan();

        // Equal to p / cos(phi) - N, but well conditioned all the way to the poles
        let N = self.prime_vertical_radius_of_curvature(phi);
        let (sinphi, cosphi) = phi.sin_cos();
        let h = p * cosphi + Z * sinphi - self.a * self.a / N;

        Ok(GeographicPoint::with_height(
            phi.to_degrees(),
            lam.to_degrees(),
            h,
        ))
    }
}

// ----- Tests ---------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn geo_to_cart() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        // Roundtrip geographic <-> cartesian
        let geo = GeographicPoint::with_height(55., 12., 100.);
        let cart = ellps.cartesian(&geo)?;
        let geo2 = ellps.geographic(&cart)?;
        assert_float_eq!(geo.latitude, geo2.latitude, abs <= 1e-10);
        assert_float_eq!(geo.longitude, geo2.longitude, abs <= 1e-12);
        assert_float_eq!(geo.height, geo2.height, abs <= 1e-6);

        // Off the surface, the cartesian roundtrip must hold to the micrometre
        for (lat, lon, h) in [(-12., 0., -30.), (23.4, 12., -30.), (-66.6, 135., 100.)] {
            let cart = ellps.cartesian(&GeographicPoint::with_height(lat, lon, h))?;
            let geo = ellps.geographic(&cart)?;
            assert_float_eq!(geo.latitude, lat, abs <= 1e-11);
            assert_float_eq!(geo.height, h, abs <= 1e-7);
            let back = ellps.cartesian(&geo)?;
            assert!(cart.hypot3(&back) < 1e-6);
        }
        Ok(())
    }

    #[test]
    fn equator_and_poles() -> Result<(), Error> {
        let ellps = Ellipsoid::default();
        let a = ellps.semimajor_axis();
        let b = ellps.semiminor_axis();

        // The prime meridian at the equator is (a, 0, 0)
        let cart = ellps.cartesian(&GeographicPoint::new(0., 0.))?;
        assert_eq!(cart, CartesianPoint::new(a, 0., 0.));
        let geo = ellps.geographic(&CartesianPoint::new(a, 0., 0.))?;
        assert_float_eq!(geo.latitude, 0., abs <= 1e-12);
        assert_float_eq!(geo.longitude, 0., abs <= 1e-12);
        assert_float_eq!(geo.height, 0., abs <= 1e-9);

        // The poles are at (0, 0, ±b)
        let cart = ellps.cartesian(&GeographicPoint::new(90., 0.))?;
        assert_float_eq!(cart.z, b, abs <= 1e-6);
        assert_float_eq!(cart.x, 0., abs <= 1e-6);
        let geo = ellps.geographic(&CartesianPoint::new(0., 0., -b - 10.))?;
        assert_float_eq!(geo.latitude, -90., abs <= 1e-12);
        assert_float_eq!(geo.height, 10., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn deep_interior_does_not_converge() {
        // Close to the centre, the fixed point iteration oscillates
        let deep = CartesianPoint::new(30_000., 0., 1.);
        assert!(matches!(
            Ellipsoid::default().geographic(&deep),
            Err(Error::NonConvergence { iterations: 32, .. })
        ));
    }

    #[test]
    fn bad_input() {
        let ellps = Ellipsoid::default();
        assert!(matches!(
            ellps.cartesian(&GeographicPoint::new(90.5, 0.)),
            Err(Error::InvalidLatitude(_))
        ));
        assert!(matches!(
            ellps.cartesian(&GeographicPoint::new(f64::NAN, 0.)),
            Err(Error::InvalidLatitude(_))
        ));
        assert!(matches!(
            ellps.cartesian(&GeographicPoint::new(0., f64::INFINITY)),
            Err(Error::InvalidLongitude(_))
        ));
        assert!(matches!(
            ellps.geographic(&CartesianPoint::new(f64::NAN, 0., 0.)),
            Err(Error::InvalidCartesian(_))
        ));
    }
}
