//! Transverse Mercator, following Karney (2011) and Deakin et al. (2012),
//! using the 8th order Krüger series.
use super::Projection;
use crate::math::ancillary::{round_to, tau_conformal, tau_conformal_derivative};
use crate::math::fourier;
use crate::{Error, GeographicPoint, GridPoint};
use log::{trace, warn};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use std::f64::consts::FRAC_PI_2;
use std::str::FromStr;

/// Number of Newton steps taken when inverting the conformal latitude.
/// A calibrated constant: three steps reach sub-millimetre agreement over
/// the full latitude range for Earth-like eccentricities.
pub const NEWTON_STEPS: usize = 3;

/// Newton residuals above this value are reported at `warn` level
pub const NEWTON_RESIDUAL_WARNING: f64 = 1e-12;

const GRID_DECIMALS: i32 = 5;
const GEOGRAPHIC_DECIMALS: i32 = 11;

/// The result of an inverse projection, with the residual |f(t₃)| of the
/// Newton iteration for the tangent of the latitude
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct InverseSolution {
    pub point: GeographicPoint,
    pub residual: f64,
}

// ----- F O R W A R D -----------------------------------------------------------------

impl Projection {
    /// Geographic to grid. The zone is derived from the longitude.
    pub fn forward(&self, geo: &GeographicPoint) -> Result<GridPoint, Error> {
        let (lat, lon) = (geo.latitude, geo.longitude);
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::InvalidLatitude(lat));
        }
        if !lon.is_finite() {
            return Err(Error::InvalidLongitude(lon));
        }

        let params = self.parameters();
        let zone = self.zone(lon)?;
        let cm = self.central_meridian(zone);
        let qs = params.scale_factor * self.series().rectifying_radius;

        // --- 1. Gauss-Schreiber ratios from the conformal latitude

        let (xi1, eta1) = if lat.abs() == 90. {
            (FRAC_PI_2.copysign(lat), 0.)
        } else {
            let dlon = longitude_difference(lon, cm, params.decimal_precision)?.to_radians();
            let e = self.ellipsoid().eccentricity();
            let tau = tau_conformal(lat.to_radians().tan(), e);
            let cos_dlon = dlon.cos();
            let xi1 = tau.atan2(cos_dlon);
            let eta1 = (dlon.sin() / tau.hypot(cos_dlon)).asinh();
            (xi1, eta1)
        };

        // --- 2. Krüger series, by Clenshaw summation

        let dc = fourier::complex_sin([2. * xi1, 2. * eta1], &self.series().alpha);
        let xi = xi1 + dc[0];
        let eta = eta1 + dc[1];
        trace!("forward: zone={zone}, cm={cm}, xi={xi}, eta={eta}");

        // --- 3. Normalized to metric

        let easting = round_to(qs * eta + params.false_easting, GRID_DECIMALS);
        let northing = round_to(qs * xi + params.false_northing, GRID_DECIMALS);
        Ok(GridPoint::new(zone, easting, northing))
    }
}

/// `lon - cm` in degrees, subtracted in decimal arithmetic and rounded to
/// `precision` significant digits
fn longitude_difference(lon: f64, cm: f64, precision: u32) -> Result<f64, Error> {
    let invalid = || Error::InvalidLongitude(lon);
    let lon_dec = Decimal::from_f64_retain(lon).ok_or_else(invalid)?;
    let cm_dec = Decimal::from_str(&cm.to_string())
        .or_else(|_| Decimal::from_f64(cm).ok_or_else(invalid))?;
    lon_dec
        .checked_sub(cm_dec)
        .and_then(|d| if d.is_zero() { Some(d) } else { d.round_sf(precision) })
        .and_then(|d| d.to_f64())
        .ok_or_else(invalid)
}

// ----- I N V E R S E -----------------------------------------------------------------

impl Projection {
    /// Grid to geographic
    pub fn inverse(&self, grid: &GridPoint) -> Result<GeographicPoint, Error> {
        Ok(self.inverse_with_residual(grid)?.point)
    }

    /// Grid to geographic, also reporting how well the fixed-step Newton
    /// iteration converged. The residual is never raised as an error:
    /// callers needing a tolerance check it themselves.
    pub fn inverse_with_residual(&self, grid: &GridPoint) -> Result<InverseSolution, Error> {
        if !grid.easting.is_finite() || !grid.northing.is_finite() {
            return Err(Error::InvalidGrid(format!(
                "zone {}, easting {}, northing {}",
                grid.zone, grid.easting, grid.northing
            )));
        }

        let params = self.parameters();
        let qs = params.scale_factor * self.series().rectifying_radius;
        let e = self.ellipsoid().eccentricity();

        // --- 1. Normalize N, E

        let xi = (grid.northing - params.false_northing) / qs;
        let eta = (grid.easting - params.false_easting) / qs;

        // --- 2. Krüger series, back to the Gauss-Schreiber ratios

        let dc = fourier::complex_sin([2. * xi, 2. * eta], &self.series().beta);
        let xi1 = xi + dc[0];
        let eta1 = eta + dc[1];

        // --- 3. Conformal latitude, then geographic latitude by Newton

        let sinh_eta1 = eta1.sinh();
        let cos_xi1 = xi1.cos();
        let t1 = xi1.sin() / sinh_eta1.hypot(cos_xi1);

        let f = |t: f64| tau_conformal(t, e) - t1;
        let mut t = t1;
        for _ in 0..NEWTON_STEPS {
            t -= f(t) / tau_conformal_derivative(t, e);
        }
        let residual = f(t).abs();
        if residual > NEWTON_RESIDUAL_WARNING {
            warn!(
                "inverse: Newton residual {residual:e} at zone {}, E={}, N={}",
                grid.zone, grid.easting, grid.northing
            );
        }

        // --- 4. Longitude from the central meridian

        let cm = self.central_meridian(grid.zone);
        let lat = round_to(t.atan().to_degrees(), GEOGRAPHIC_DECIMALS);
        let lon = round_to(
            cm + sinh_eta1.atan2(cos_xi1).to_degrees(),
            GEOGRAPHIC_DECIMALS,
        );
        trace!("inverse: xi1={xi1}, eta1={eta1}, t={t}, residual={residual}");

        Ok(InverseSolution {
            point: GeographicPoint::new(lat, lon),
            residual,
        })
    }
}

// ----- Tests ---------------------------------------------------------------------
