//! GG: Geographic and Grid coordinate conversions from the command line
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gridgeo::batch::{self, CsvSink};
use gridgeo::math::angular::Dms;
use gridgeo::prelude::*;
use log::{debug, info};
use std::fs::File;
use std::path::{Path, PathBuf};

/// Convert between geographic coordinates, Transverse Mercator grid
/// coordinates, and geocentric cartesian coordinates.
///
/// Defaults to GRS80 and UTM. Batch files are headerless CSV, with rows
/// of "id, latitude, longitude" or "id, zone, easting, northing". The
/// results are written next to the input, as NAME_out.EXT.
#[derive(Parser, Debug)]
#[command(name = "gg")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Ellipsoid: a builtin name, or "a, rf"
    #[arg(long, default_value = "GRS80", global = true)]
    ellps: String,

    /// Use the southern aspect (false northing 10 000 000 m)
    #[arg(long, global = true)]
    south: bool,

    /// Zone width in degrees
    #[arg(long, global = true)]
    zone_width: Option<f64>,

    /// Longitude of the central meridian of zone 1
    #[arg(long, global = true, allow_negative_numbers = true)]
    origin: Option<f64>,

    /// Scale factor on the central meridian
    #[arg(long, global = true)]
    scale: Option<f64>,

    #[arg(long, global = true, allow_negative_numbers = true)]
    false_easting: Option<f64>,

    #[arg(long, global = true, allow_negative_numbers = true)]
    false_northing: Option<f64>,

    /// Angles in packed sexagesimal notation, DDD.MMSSsss
    #[arg(long, global = true)]
    hp: bool,

    /// Print single point angles as degrees, minutes and seconds
    #[arg(long, global = true)]
    dms: bool,

    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a file of geographic coordinates to grid
    Geo2grid { file: PathBuf },

    /// Convert a file of grid coordinates to geographic
    Grid2geo { file: PathBuf },

    /// Convert a single point
    Point {
        #[command(subcommand)]
        point: Point,
    },

    /// Geographic latitude, longitude, height to geocentric cartesian
    #[command(allow_negative_numbers = true)]
    Cart { latitude: f64, longitude: f64, height: f64 },

    /// Geocentric cartesian to geographic latitude, longitude, height
    #[command(allow_negative_numbers = true)]
    Geo { x: f64, y: f64, z: f64 },
}

#[derive(Subcommand, Debug)]
enum Point {
    /// Geographic to grid
    #[command(allow_negative_numbers = true)]
    Geo { latitude: f64, longitude: f64 },

    /// Grid to geographic
    #[command(allow_negative_numbers = true)]
    Grid { zone: i32, easting: f64, northing: f64 },
}

fn main() -> Result<()> {
    let options = Cli::parse();
    env_logger::Builder::new()
        .filter_level(options.verbose.log_level_filter())
        .init();
    debug!("{options:#?}");

    let projection = projection(&options)?;
    let format = if options.hp {
        AngleFormat::Hp
    } else {
        AngleFormat::Decimal
    };

    match &options.command {
        Command::Geo2grid { file } => geo2grid(&projection, file, format)?,
        Command::Grid2geo { file } => grid2geo(&projection, file, format)?,

        Command::Point { point: Point::Geo { latitude, longitude } } => {
            let lat = format.decode(*latitude);
            let lon = format.decode(*longitude);
            let grid = projection.forward(&GeographicPoint::new(lat, lon))?;
            println!("{} {:.5} {:.5}", grid.zone, grid.easting, grid.northing);
        }

        Command::Point { point: Point::Grid { zone, easting, northing } } => {
            let grid = GridPoint::new(*zone, *easting, *northing);
            let solution = projection.inverse_with_residual(&grid)?;
            debug!("Newton residual: {:e}", solution.residual);
            let geo = solution.point;
            if options.dms {
                let (lat, lon) = (Dms::from_dd(geo.latitude), Dms::from_dd(geo.longitude));
                println!("{lat} {lon}");
            } else {
                let lat = format.encode(geo.latitude);
                let lon = format.encode(geo.longitude);
                println!("{lat:.11} {lon:.11}");
            }
        }

        Command::Cart { latitude, longitude, height } => {
            let lat = format.decode(*latitude);
            let lon = format.decode(*longitude);
            let geo = GeographicPoint::with_height(lat, lon, *height);
            let cart = projection.ellipsoid().cartesian(&geo)?;
            println!("{:.4} {:.4} {:.4}", cart.x, cart.y, cart.z);
        }

        Command::Geo { x, y, z } => {
            let cart = CartesianPoint::new(*x, *y, *z);
            let geo = projection.ellipsoid().geographic(&cart)?;
            if options.dms {
                let (lat, lon) = (Dms::from_dd(geo.latitude), Dms::from_dd(geo.longitude));
                println!("{lat} {lon} {:.4}", geo.height);
            } else {
                let lat = format.encode(geo.latitude);
                let lon = format.encode(geo.longitude);
                println!("{lat:.11} {lon:.11} {:.4}", geo.height);
            }
        }
    }
    Ok(())
}

fn projection(options: &Cli) -> Result<Projection> {
    let ellps = Ellipsoid::named(&options.ellps)?;
    let mut params = if options.south {
        ProjectionParameters::utm_south()
    } else {
        ProjectionParameters::utm()
    };
    if let Some(zone_width) = options.zone_width {
        params.zone_width = zone_width;
    }
    if let Some(origin) = options.origin {
        params.origin = origin;
    }
    if let Some(scale) = options.scale {
        params.scale_factor = scale;
    }
    if let Some(false_easting) = options.false_easting {
        params.false_easting = false_easting;
    }
    if let Some(false_northing) = options.false_northing {
        params.false_northing = false_northing;
    }
    Projection::new(ellps, params).context("Cannot set up the projection")
}

fn geo2grid(projection: &Projection, input: &Path, format: AngleFormat) -> Result<()> {
    let source = File::open(input).with_context(|| format!("Cannot open {}", input.display()))?;
    let output = batch::output_path(input);
    let mut sink = CsvSink::new(
        File::create(&output).with_context(|| format!("Cannot create {}", output.display()))?,
    );
    let records = batch::read_geo_records(source, format);
    let report = batch::geo_to_grid(projection, records, &mut sink)?;
    sink.flush()?;
    summarize(&output, &report);
    Ok(())
}

fn grid2geo(projection: &Projection, input: &Path, format: AngleFormat) -> Result<()> {
    let source = File::open(input).with_context(|| format!("Cannot open {}", input.display()))?;
    let output = batch::output_path(input);
    let mut sink = CsvSink::new(
        File::create(&output).with_context(|| format!("Cannot create {}", output.display()))?,
    );
    let records = batch::read_grid_records(source);
    let report = batch::grid_to_geo(projection, records, format, &mut sink)?;
    sink.flush()?;
    summarize(&output, &report);
    Ok(())
}

fn summarize(output: &Path, report: &BatchReport) {
    info!("Wrote {}", output.display());
    if report.failures > 0 {
        eprintln!(
            "{} of {} records skipped, see the log (-v) for details",
            report.failures,
            report.total()
        );
    }
}
