//! Record-at-a-time conversion of whole datasets.
//!
//! The drivers here own no I/O: they pull records from any iterator and
//! push results into any [`RecordSink`]. The [csv] adapters connect them
//! to headerless CSV files, one point per row.

pub mod csv;

pub use self::csv::output_path;
pub use self::csv::read_geo_records;
pub use self::csv::read_grid_records;
pub use self::csv::CsvSink;

use crate::math::angular::{dd_to_hp, hp_to_dd};
use crate::{Error, GeographicPoint, GridPoint, Projection};
use log::{info, warn};
use serde::{Deserialize, Deserializer, Serialize};

/// How angles are represented in a dataset
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub enum AngleFormat {
    /// Degrees with decimals
    #[default]
    Decimal,
    /// Packed sexagesimal, DDD.MMSSsss
    Hp,
}

impl AngleFormat {
    /// Convert an angle in this format to decimal degrees
    pub fn decode(self, angle: f64) -> f64 {
        match self {
            AngleFormat::Decimal => angle,
            AngleFormat::Hp => hp_to_dd(angle),
        }
    }

    /// Convert an angle in decimal degrees to this format
    pub fn encode(self, degrees: f64) -> f64 {
        match self {
            AngleFormat::Decimal => degrees,
            AngleFormat::Hp => dd_to_hp(degrees),
        }
    }
}

// ----- R E C O R D S -----------------------------------------------------------------

/// Point id, latitude, longitude
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct GeoRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Point id, zone, easting, northing
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct GridRecord {
    pub id: String,
    #[serde(deserialize_with = "integral_zone")]
    pub zone: i32,
    pub easting: f64,
    pub northing: f64,
}

// Zones written as "55" or "55.0" are both fine, "55.5" is not
fn integral_zone<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    let zone = f64::deserialize(deserializer)?;
    if zone.fract() != 0. || !(i32::MIN as f64..=i32::MAX as f64).contains(&zone) {
        return Err(serde::de::Error::custom(format!("invalid zone: {zone}")));
    }
    Ok(zone as i32)
}

/// The result of converting a [GridRecord]
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GeoOutRecord {
    pub id: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// The result of converting a [GeoRecord]
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct GridOutRecord {
    pub id: String,
    pub zone: i32,
    pub easting: f64,
    pub northing: f64,
}

/// Destination for converted records
pub trait RecordSink<T> {
    fn put(&mut self, record: T) -> Result<(), Error>;
}

impl<T> RecordSink<T> for Vec<T> {
    fn put(&mut self, record: T) -> Result<(), Error> {
        self.push(record);
        Ok(())
    }
}

/// Tally of a batch run
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct BatchReport {
    /// Records converted and written
    pub converted: usize,
    /// Records skipped, being either malformed or impossible to convert
    pub failures: usize,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.converted + self.failures
    }
}

// ----- D R I V E R S -----------------------------------------------------------------

/// Convert a stream of geographic records (decimal degrees) to grid
/// coordinates. Bad records are logged and skipped. Errors from the
/// record source, other than malformed records, and from the sink abort
/// the run.
pub fn geo_to_grid<I, S>(
    projection: &Projection,
    records: I,
    sink: &mut S,
) -> Result<BatchReport, Error>
where
    I: IntoIterator<Item = Result<GeoRecord, Error>>,
    S: RecordSink<GridOutRecord> + ?Sized,
{
    let mut report = BatchReport::default();
    for record in records {
        let Some(record) = accept(record, &mut report)? else {
            continue;
        };
        let geo = GeographicPoint::new(record.latitude, record.longitude);
        match projection.forward(&geo) {
            Ok(grid) => {
                sink.put(GridOutRecord {
                    id: record.id,
                    zone: grid.zone,
                    easting: grid.easting,
                    northing: grid.northing,
                })?;
                report.converted += 1;
            }
            Err(err) => {
                warn!("Skipping point {}: {err}", record.id);
                report.failures += 1;
            }
        }
    }
    info!("geo_to_grid: {report:?}");
    Ok(report)
}

/// Convert a stream of grid records to geographic coordinates, with the
/// output angles given in `format`. Failure handling as for [geo_to_grid].
pub fn grid_to_geo<I, S>(
    projection: &Projection,
    records: I,
    format: AngleFormat,
    sink: &mut S,
) -> Result<BatchReport, Error>
where
    I: IntoIterator<Item = Result<GridRecord, Error>>,
    S: RecordSink<GeoOutRecord> + ?Sized,
{
    let mut report = BatchReport::default();
    for record in records {
        let Some(record) = accept(record, &mut report)? else {
            continue;
        };
        let grid = GridPoint::new(record.zone, record.easting, record.northing);
        match projection.inverse(&grid) {
            Ok(geo) => {
                sink.put(GeoOutRecord {
                    id: record.id,
                    latitude: format.encode(geo.latitude),
                    longitude: format.encode(geo.longitude),
                })?;
                report.converted += 1;
            }
            Err(err) => {
                warn!("Skipping point {}: {err}", record.id);
                report.failures += 1;
            }
        }
    }
    info!("grid_to_geo: {report:?}");
    Ok(report)
}

// Malformed records are counted and dropped, anything else is fatal
fn accept<R>(record: Result<R, Error>, report: &mut BatchReport) -> Result<Option<R>, Error> {
    match record {
        Ok(record) => Ok(Some(record)),
        Err(err @ Error::BadRecord { .. }) => {
            warn!("{err}");
            report.failures += 1;
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    fn geo(id: &str, latitude: f64, longitude: f64) -> Result<GeoRecord, Error> {
        Ok(GeoRecord {
            id: id.to_string(),
            latitude,
            longitude,
        })
    }

    #[test]
    fn driver() -> Result<(), Error> {
        let utm = Projection::default();
        let records = vec![
            geo("cph", 55., 12.),
            geo("nowhere", 95., 12.),
            Err(Error::BadRecord {
                line: 3,
                message: "garbage".to_string(),
            }),
            geo("osl", 60., 10.),
        ];

        let mut grid = Vec::new();
        let report = geo_to_grid(&utm, records, &mut grid)?;
        assert_eq!(report, BatchReport { converted: 2, failures: 2 });
        assert_eq!(report.total(), 4);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].id, "cph");
        assert_eq!(grid[0].zone, 33);
        assert_eq!(grid[1].id, "osl");
        assert_eq!(grid[1].zone, 32);

        // ... and back again
        let records = grid.iter().map(|g| {
            Ok(GridRecord {
                id: g.id.clone(),
                zone: g.zone,
                easting: g.easting,
                northing: g.northing,
            })
        });
        let mut geo = Vec::new();
        let report = grid_to_geo(&utm, records, AngleFormat::Decimal, &mut geo)?;
        assert_eq!(report.converted, 2);
        assert_float_eq!(geo[0].latitude, 55., abs <= 1e-9);
        assert_float_eq!(geo[0].longitude, 12., abs <= 1e-9);
        assert_float_eq!(geo[1].latitude, 60., abs <= 1e-9);
        assert_float_eq!(geo[1].longitude, 10., abs <= 1e-9);
        Ok(())
    }

    #[test]
    fn fatal_errors_abort() {
        let utm = Projection::default();
        let records = vec![
            geo("cph", 55., 12.),
            Err(Error::Io(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                "truncated",
            ))),
            geo("osl", 60., 10.),
        ];
        let mut grid = Vec::new();
        assert!(matches!(
            geo_to_grid(&utm, records, &mut grid),
            Err(Error::Io(_))
        ));
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn angle_format() {
        assert_eq!(AngleFormat::default(), AngleFormat::Decimal);
        assert_eq!(AngleFormat::Decimal.decode(55.3), 55.3);
        assert_float_eq!(AngleFormat::Hp.decode(55.3), 55.5, abs <= 1e-12);
        assert_float_eq!(AngleFormat::Hp.encode(55.51), 55.3036, abs <= 1e-12);
    }
}
