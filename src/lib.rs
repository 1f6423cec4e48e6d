//! *Conversions between geographic, Transverse Mercator grid, and
//! geocentric cartesian coordinates*.
//!
//! The projection follows the Krüger n-series in the 8th order formulation
//! of [Karney (2011)](crate::Bibliography::Kar11), as presented for survey
//! use by [Deakin et al. (2012)](crate::Bibliography::Dea12). Geographic to
//! cartesian conversion is closed form, while the way back uses a
//! fixed-point iteration in the spirit of [Bowring (1976)](crate::Bibliography::Bow76).
//!
//! The four basic operations are available as free functions, working on
//! a process-wide GRS80/UTM [`Projection`]:
//!
//! ```
//! # fn main() -> Result<(), anyhow::Error> {
//! let grid = gridgeo::forward_project(-37.95103341666667, 144.42486788888889)?;
//! assert_eq!(grid.zone, 55);
//! let geo = gridgeo::inverse_project(grid.zone, grid.easting, grid.northing)?;
//! assert!((geo.latitude + 37.95103341666667).abs() < 1e-9);
//! # Ok(())
//! # }
//! ```
//!
//! Other setups are built by combining an [`Ellipsoid`] with a set of
//! [`ProjectionParameters`].

pub mod batch;
pub mod coordinate;
pub mod ellipsoid;
pub mod math;
pub mod projection;

pub use coordinate::CartesianPoint;
pub use coordinate::GeographicPoint;
pub use coordinate::GridPoint;
pub use ellipsoid::Ellipsoid;
pub use projection::InverseSolution;
pub use projection::Projection;
pub use projection::ProjectionParameters;
pub use projection::SeriesConstants;

use once_cell::sync::Lazy;
use thiserror::Error;

/// Everything needed for day-to-day use of the crate
pub mod prelude {
    pub use crate::batch::AngleFormat;
    pub use crate::batch::BatchReport;
    pub use crate::batch::RecordSink;
    pub use crate::CartesianPoint;
    pub use crate::Ellipsoid;
    pub use crate::Error;
    pub use crate::GeographicPoint;
    pub use crate::GridPoint;
    pub use crate::InverseSolution;
    pub use crate::Projection;
    pub use crate::ProjectionParameters;
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("i/o error")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid ellipsoid: {0}")]
    InvalidEllipsoid(String),

    #[error("invalid projection parameters: {0}")]
    InvalidProjection(String),

    #[error("latitude {0} outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("longitude {0} is not a finite number")]
    InvalidLongitude(f64),

    #[error("invalid grid coordinate: {0}")]
    InvalidGrid(String),

    #[error("invalid cartesian coordinate: {0}")]
    InvalidCartesian(String),

    #[error("no convergence after {iterations} iterations (last step: {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },

    #[error("{0} not found{1}")]
    NotFound(String, String),

    #[error("bad record at line {line}: {message}")]
    BadRecord { line: u64, message: String },
}

// ----- T H E   D E F A U L T   P R O J E C T I O N -----------------------------------

/// GRS80 / UTM (northern aspect), computed on first use and shared read-only
static DEFAULT_PROJECTION: Lazy<Projection> = Lazy::new(Projection::default);

/// The process-wide GRS80/UTM projection used by the free functions
pub fn default_projection() -> &'static Projection {
    &DEFAULT_PROJECTION
}

/// Latitude and longitude in decimal degrees to UTM zone, easting, northing
pub fn forward_project(latitude: f64, longitude: f64) -> Result<GridPoint, Error> {
    DEFAULT_PROJECTION.forward(&GeographicPoint::new(latitude, longitude))
}

/// UTM zone, easting, northing to latitude and longitude in decimal degrees
pub fn inverse_project(zone: i32, easting: f64, northing: f64) -> Result<GeographicPoint, Error> {
    DEFAULT_PROJECTION.inverse(&GridPoint::new(zone, easting, northing))
}

/// Latitude, longitude (degrees) and ellipsoidal height (m) to geocentric X, Y, Z
pub fn geographic_to_cartesian(
    latitude: f64,
    longitude: f64,
    height: f64,
) -> Result<CartesianPoint, Error> {
    DEFAULT_PROJECTION
        .ellipsoid()
        .cartesian(&GeographicPoint::with_height(latitude, longitude, height))
}

/// Geocentric X, Y, Z to latitude, longitude (degrees) and ellipsoidal height (m)
pub fn cartesian_to_geographic(x: f64, y: f64, z: f64) -> Result<GeographicPoint, Error> {
    DEFAULT_PROJECTION
        .ellipsoid()
        .geographic(&CartesianPoint::new(x, y, z))
}

/// Literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// B.R. Bowring (1976): *Transformation from spatial to geographical coordinates*.
    /// Survey Review 23(181), pp. 323–327.
    Bow76,

    /// Charles F.F. Karney (2011): *Transverse Mercator with an accuracy of a few nanometers*.
    /// J. Geodesy. 85(8): 475–485.
    /// [DOI](https://doi.org/10.1007/s00190-011-0445-3).
    Kar11,

    /// R.E. Deakin, M.N. Hunter and C.F.F. Karney (2012):
    /// A fresh look at the UTM projection:
    /// Karney-Krueger equations.
    /// Surveying and Spatial Sciences Institute (SSSI)
    /// Land Surveying Commission National Conference,
    /// Melbourne, 18-21 April, 2012.
    Dea12,

    /// L. Krüger (1912). Konforme Abbildung des Erdellipsoids in der Ebene.
    /// Royal Prussian Geodetic Institute, New Series 52.
    /// [DOI](https://dx.doi.org/10.2312/GFZ.b103-krueger28).
    Kru12,

    /// Intergovernmental Committee on Surveying and Mapping (2014):
    /// *Geocentric Datum of Australia Technical Manual*, version 2.4.
    Icsm14,
}

// ----- Tests ---------------------------------------------------------------------
