//! Transverse Mercator grid projection: configuration and derived constants.
//! The conversions themselves live in [tmerc].

pub mod krueger;
pub mod tmerc;

pub use krueger::SeriesConstants;
pub use krueger::SERIES_ORDER;
pub use tmerc::InverseSolution;
pub use tmerc::NEWTON_RESIDUAL_WARNING;
pub use tmerc::NEWTON_STEPS;

use crate::Ellipsoid;
use crate::Error;
use log::debug;

/// Number of significant decimal digits carried by the longitude difference
/// computation, matching the 96 bit mantissa of `rust_decimal::Decimal`
pub const MAX_DECIMAL_PRECISION: u32 = 28;

/// The parameters defining a zoned Transverse Mercator grid
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionParameters {
    /// Scale factor on the central meridian, *k₀*
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    /// Zone width in degrees
    pub zone_width: f64,
    /// Longitude (degrees) of the central meridian of zone number 1
    pub origin: f64,
    /// Significant decimal digits used for the longitude difference
    pub decimal_precision: u32,
}

/// UTM, northern aspect
impl Default for ProjectionParameters {
    fn default() -> ProjectionParameters {
        ProjectionParameters::utm()
    }
}

impl ProjectionParameters {
    /// Universal Transverse Mercator, northern aspect
    #[must_use]
    pub fn utm() -> ProjectionParameters {
        ProjectionParameters {
            scale_factor: 0.9996,
            false_easting: 500_000.,
            false_northing: 0.,
            zone_width: 6.,
            origin: -177.,
            decimal_precision: MAX_DECIMAL_PRECISION,
        }
    }

    /// Universal Transverse Mercator, southern aspect (e.g. MGA)
    #[must_use]
    pub fn utm_south() -> ProjectionParameters {
        ProjectionParameters {
            false_northing: 10_000_000.,
            ..ProjectionParameters::utm()
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.zone_width.is_finite() || self.zone_width <= 0. {
            return Err(Error::InvalidProjection(format!(
                "zone width must be positive, got {}",
                self.zone_width
            )));
        }
        if !self.scale_factor.is_finite() || self.scale_factor <= 0. {
            return Err(Error::InvalidProjection(format!(
                "scale factor must be positive, got {}",
                self.scale_factor
            )));
        }
        let offsets = [self.false_easting, self.false_northing, self.origin];
        if offsets.iter().any(|v| !v.is_finite()) {
            return Err(Error::InvalidProjection(String::from(
                "false easting, false northing and origin must be finite",
            )));
        }
        if !(1..=MAX_DECIMAL_PRECISION).contains(&self.decimal_precision) {
            return Err(Error::InvalidProjection(format!(
                "decimal precision must be in 1..={MAX_DECIMAL_PRECISION}, got {}",
                self.decimal_precision
            )));
        }
        Ok(())
    }
}

/// An ellipsoid, a set of projection parameters, and the series constants
/// derived from them. Immutable after construction, hence freely shared
/// between threads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    ellps: Ellipsoid,
    params: ProjectionParameters,
    series: SeriesConstants,
}

/// GRS80 and UTM, northern aspect
impl Default for Projection {
    fn default() -> Projection {
        let ellps = Ellipsoid::default();
        Projection {
            ellps,
            params: ProjectionParameters::utm(),
            series: SeriesConstants::new(&ellps),
        }
    }
}

impl Projection {
    pub fn new(ellps: Ellipsoid, params: ProjectionParameters) -> Result<Projection, Error> {
        params.validate()?;
        let series = SeriesConstants::new(&ellps);
        debug!(
            "Projection: a={}, 1/f={}, A={}, params={params:?}",
            ellps.semimajor_axis(),
            ellps.inverse_flattening(),
            series.rectifying_radius
        );
        Ok(Projection {
            ellps,
            params,
            series,
        })
    }

    #[must_use]
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellps
    }

    #[must_use]
    pub fn parameters(&self) -> &ProjectionParameters {
        &self.params
    }

    #[must_use]
    pub fn series(&self) -> &SeriesConstants {
        &self.series
    }

    /// The zone containing `longitude` (degrees). Depends on nothing but
    /// the longitude, the zone width and the origin. Longitudes so far
    /// out that the zone number does not fit an `i32` are rejected.
    pub fn zone(&self, longitude: f64) -> Result<i32, Error> {
        let w = self.params.zone_width;
        let zone = ((longitude - (self.params.origin - 1.5 * w)) / w).floor();
        if !(i32::MIN as f64..=i32::MAX as f64).contains(&zone) {
            return Err(Error::InvalidLongitude(longitude));
        }
        Ok(zone as i32)
    }

    /// The central meridian (degrees) of `zone`
    #[must_use]
    pub fn central_meridian(&self, zone: i32) -> f64 {
        let w = self.params.zone_width;
        zone as f64 * w + (self.params.origin - w)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zones() -> Result<(), Error> {
        let utm = Projection::default();
        assert_eq!(utm.zone(-180.)?, 1);
        assert_eq!(utm.zone(-174.0001)?, 1);
        assert_eq!(utm.zone(-174.)?, 2);
        assert_eq!(utm.zone(9.)?, 32);
        assert_eq!(utm.zone(12.)?, 33);
        assert_eq!(utm.zone(144.424_867_888_888_9)?, 55);
        assert_eq!(utm.zone(179.999)?, 60);

        assert_eq!(utm.central_meridian(1), -177.);
        assert_eq!(utm.central_meridian(32), 9.);
        assert_eq!(utm.central_meridian(55), 147.);

        // Every zone contains its own central meridian
        for zone in 1..=60 {
            assert_eq!(utm.zone(utm.central_meridian(zone))?, zone);
        }

        // Longitude is unrestricted, as long as the zone number is representable
        assert_eq!(utm.zone(900.)?, 181);
        assert_eq!(utm.zone(-1e9)?, -166_666_636);
        for lon in [1e12, -1e12, f64::NAN] {
            assert!(matches!(utm.zone(lon), Err(Error::InvalidLongitude(_))));
        }
        Ok(())
    }

    #[test]
    fn parameters() -> Result<(), Error> {
        let south = ProjectionParameters::utm_south();
        assert_eq!(south.false_northing, 10_000_000.);
        assert_eq!(south.scale_factor, 0.9996);
        assert_eq!(ProjectionParameters::default(), ProjectionParameters::utm());

        let p = Projection::new(Ellipsoid::named("GRS80")?, ProjectionParameters::utm())?;
        assert_eq!(p, Projection::default());

        let bad = ProjectionParameters {
            zone_width: 0.,
            ..ProjectionParameters::utm()
        };
        assert!(matches!(
            Projection::new(Ellipsoid::default(), bad),
            Err(Error::InvalidProjection(_))
        ));

        let bad = ProjectionParameters {
            decimal_precision: 29,
            ..ProjectionParameters::utm()
        };
        assert!(bad.validate().is_err());

        let bad = ProjectionParameters {
            scale_factor: -1.,
            ..ProjectionParameters::utm()
        };
        assert!(bad.validate().is_err());
        Ok(())
    }

    #[test]
    fn shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Projection>();
    }
}
