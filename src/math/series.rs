// --- Taylor series polynomium evaluation ----

pub mod taylor {
    /// Evaluate Σ cᵢ · xⁱ using Horner's scheme.
    /// Coefficients in order of increasing power.
    pub fn horner(arg: f64, coefficients: &[f64]) -> f64 {
        let mut coefficients = coefficients.iter().rev();
        let Some(&first) = coefficients.next() else {
            return 0.;
        };
        coefficients.fold(first, |value, c| value.mul_add(arg, *c))
    }
}

// --- Fourier series summation using Clenshaw's recurrence ---

pub mod fourier {
    /// Evaluate Σ cᵢ Sin( i · arg ), for i ∈ {order, ... , 1}, using Clenshaw summation.
    /// i.e. a series of complex sines with real coefficients.
    ///
    /// With arg = [2ξ, 2η] the real part of the result is
    /// Σ cᵢ sin(2iξ) cosh(2iη), and the imaginary part is
    /// Σ cᵢ cos(2iξ) sinh(2iη): the Krüger series of the Transverse Mercator.
    #[allow(unused_assignments)] // For symmetric initialization of hr2, hi2
    pub fn complex_sin(arg: [f64; 2], coefficients: &[f64]) -> [f64; 2] {
        // Prepare the trigonometric factors
        let (sin_r, cos_r) = arg[0].sin_cos();
        let sinh_i = arg[1].sinh();
        let cosh_i = arg[1].cosh();
        let r = 2. * cos_r * cosh_i;
        let i = -2. * sin_r * sinh_i;
        let mut coefficients = coefficients.iter().rev();

        // Handle zero length series by conventionally assigning them the sum of 0
        let Some(c) = coefficients.next() else {
            return [0.; 2];
        };

        // Initialize the recurrence coefficients
        let (mut hr2, mut hr1, mut hr) = (0., 0., *c);
        let (mut hi2, mut hi1, mut hi) = (0., 0., 0.);

        for c in coefficients {
            // Rotate the recurrence coefficients
            (hr2, hi2, hr1, hi1) = (hr1, hi1, hr, hi);

            // Update the recurrent sum
            hr = -hr2 + r * hr1 - i * hi1 + c;
            hi = -hi2 + i * hr1 + r * hi1;
        }

        // Finalize the sum
        let r = sin_r * cosh_i;
        let i = cos_r * sinh_i;
        [r * hr - i * hi, r * hi + i * hr]
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::taylor::*;
    use super::*;
    use crate::Ellipsoid;
    use crate::Error;

    #[test]
    fn test_horner() -> Result<(), Error> {
        // Coefficients for 3x² + 2x + 1
        let coefficients = [1_f64, 2., 3.];
        assert_eq!(horner(1., &coefficients), 6.);
        assert_eq!(horner(2., &coefficients), 17.);
        assert_eq!(horner(-2., &coefficients), 9.);

        assert_eq!(horner(-2., &[1_f64]), 1.);
        assert_eq!(horner(-2., &[3_f64]), 3.);

        assert_eq!(horner(-2., &[]), 0.);

        // The normalized meridian arc unit
        let e = Ellipsoid::named("GRS80")?;
        let n = e.third_flattening();
        let nn = n * n;
        let d = [1., 1. / 4., 1. / 64., 1. / 256., 25. / 16384.];
        let result = horner(nn, &d) / (1. + n);
        let expected = 0.9983242984230415;
        assert!((result - expected).abs() < 1e-14);

        Ok(())
    }

    #[test]
    fn test_clenshaw() {
        // Clenshaw complex sine summation
        let coefficients = [6., 5., 4., 3., 2., 1.];
        let arg = [30f64.to_radians(), 60f64.to_radians()];
        // Canonical result from Poder/Engsager implementation
        let r = 248.658_846_388_817_7;
        let i = -463.436_347_907_636_56;
        let sum = fourier::complex_sin(arg, &coefficients);
        assert!((sum[0] - r).abs() < 1e-12);
        assert!((sum[1] - i).abs() < 1e-12);
        assert_eq!(fourier::complex_sin(arg, &[]), [0., 0.]);
    }

    #[test]
    fn clenshaw_matches_kruger_summation() {
        // Term-by-term evaluation of the Krüger series, as written in Deakin et al.
        let alpha = [8.377e-4, 7.6e-7, 1.2e-9, 2.4e-12, 5e-15, 1e-17, 3e-20, 7e-23];
        let (xi, eta) = (0.83, 0.07);
        let mut dxi = 0.;
        let mut deta = 0.;
        for (k, a) in alpha.iter().enumerate() {
            let j = 2. * (k + 1) as f64;
            dxi += a * (j * xi).sin() * (j * eta).cosh();
            deta += a * (j * xi).cos() * (j * eta).sinh();
        }
        let sum = fourier::complex_sin([2. * xi, 2. * eta], &alpha);
        assert!((sum[0] - dxi).abs() < 1e-17);
        assert!((sum[1] - deta).abs() < 1e-17);
    }
}
