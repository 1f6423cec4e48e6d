//! Headerless CSV input and output for the batch drivers.
use super::{AngleFormat, GeoRecord, GridRecord, RecordSink};
use crate::Error;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

fn reader<R: io::Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(source)
}

fn records<R, T>(source: R) -> impl Iterator<Item = Result<T, Error>>
where
    R: io::Read,
    T: DeserializeOwned,
{
    reader(source)
        .into_deserialize::<T>()
        .map(|record| record.map_err(classify))
}

// Rows that cannot be parsed are reported as bad records, so the driver
// can skip them. Failures of the underlying reader stay fatal.
fn classify(err: csv::Error) -> Error {
    if err.is_io_error() {
        return Error::Csv(err);
    }
    let line = err.position().map(|p| p.line()).unwrap_or_default();
    Error::BadRecord {
        line,
        message: err.to_string(),
    }
}

/// Read rows of `id, latitude, longitude`, with angles in `format`,
/// converting them to decimal degrees
pub fn read_geo_records<R: io::Read>(
    source: R,
    format: AngleFormat,
) -> impl Iterator<Item = Result<GeoRecord, Error>> {
    records::<R, GeoRecord>(source).map(move |record| {
        record.map(|r| GeoRecord {
            latitude: format.decode(r.latitude),
            longitude: format.decode(r.longitude),
            ..r
        })
    })
}

/// Read rows of `id, zone, easting, northing`
pub fn read_grid_records<R: io::Read>(
    source: R,
) -> impl Iterator<Item = Result<GridRecord, Error>> {
    records::<R, GridRecord>(source)
}

/// Writes records as headerless CSV rows
pub struct CsvSink<W: io::Write> {
    writer: csv::Writer<W>,
}

impl<W: io::Write> CsvSink<W> {
    pub fn new(destination: W) -> CsvSink<W> {
        let writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(destination);
        CsvSink { writer }
    }

    pub fn flush(&mut self) -> Result<(), Error> {
        Ok(self.writer.flush()?)
    }

    /// Flush and hand back the underlying writer
    pub fn into_inner(self) -> Result<W, Error> {
        self.writer.into_inner().map_err(|err| {
            let cause = err.error();
            Error::Io(io::Error::new(cause.kind(), cause.to_string()))
        })
    }
}

impl<W: io::Write, T: Serialize> RecordSink<T> for CsvSink<W> {
    fn put(&mut self, record: T) -> Result<(), Error> {
        Ok(self.writer.serialize(record)?)
    }
}

/// The name of the output file for `input`: "dir/name.ext" becomes
/// "dir/name_out.ext"
pub fn output_path(input: &Path) -> PathBuf {
    let mut name = OsString::from(input.file_stem().unwrap_or_default());
    name.push("_out");
    if let Some(extension) = input.extension() {
        name.push(".");
        name.push(extension);
    }
    input.with_file_name(name)
}

// ----- Tests ---------------------------------------------------------------------
