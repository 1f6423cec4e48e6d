use float_eq::assert_float_eq;
use gridgeo::batch::{self, GridOutRecord};
use gridgeo::prelude::*;

// ----- U S E R   P R O V I D E D   S I N K ----------------------------------------

/// A record sink living entirely outside of the crate, keeping only
/// the extent of the converted points
#[derive(Debug, Default)]
struct Extent {
    count: usize,
    min: [f64; 2],
    max: [f64; 2],
}

impl RecordSink<GridOutRecord> for Extent {
    fn put(&mut self, record: GridOutRecord) -> Result<(), Error> {
        if self.count == 0 {
            self.min = [record.easting, record.northing];
            self.max = self.min;
        }
        self.min[0] = self.min[0].min(record.easting);
        self.min[1] = self.min[1].min(record.northing);
        self.max[0] = self.max[0].max(record.easting);
        self.max[1] = self.max[1].max(record.northing);
        self.count += 1;
        Ok(())
    }
}

// ----- T E S T S ------------------------------------------------------------------

#[test]
fn flinders_peak() -> Result<(), Error> {
    // GDA94 / MGA zone 55, as published in the GDA technical manual
    let lat = gridgeo::math::angular::hp_to_dd(-37.57037203);
    let lon = gridgeo::math::angular::hp_to_dd(144.25295244);
    let mga = Projection::new(Ellipsoid::named("GRS80")?, ProjectionParameters::utm_south())?;

    let grid = mga.forward(&GeographicPoint::new(lat, lon))?;
    assert_eq!(grid.zone, 55);
    assert_float_eq!(grid.easting, 273_741.297, abs <= 0.001);
    assert_float_eq!(grid.northing, 5_796_489.777, abs <= 0.001);

    let geo = mga.inverse(&GridPoint::new(55, 273_741.2966, 5_796_489.7769))?;
    assert_float_eq!(geo.latitude, lat, abs <= 1e-9);
    assert_float_eq!(geo.longitude, lon, abs <= 1e-9);
    Ok(())
}

#[test]
fn projection_roundtrip() -> Result<(), Error> {
    for lat in [-84., -60.25, -33.3, -0.5, 0., 12.75, 45., 71.1, 84.] {
        for lon in [-179.9, -120.5, -77.7, -3., 0., 2.999, 9., 144.4, 179.9] {
            let grid = gridgeo::forward_project(lat, lon)?;
            let geo = gridgeo::inverse_project(grid.zone, grid.easting, grid.northing)?;
            assert_float_eq!(geo.latitude, lat, abs <= 1e-8);
            assert_float_eq!(geo.longitude, lon, abs <= 1e-8);
        }
    }
    Ok(())
}

#[test]
fn cartesian_roundtrip() -> Result<(), Error> {
    for lat in [-90., -66.6, -12., 0., 23.4, 55., 89.9, 90.] {
        for lon in [-180., -45., 0., 12., 135.] {
            for h in [-30., 0., 100.] {
                let cart = gridgeo::geographic_to_cartesian(lat, lon, h)?;
                let geo = gridgeo::cartesian_to_geographic(cart.x, cart.y, cart.z)?;
                let back = gridgeo::geographic_to_cartesian(geo.latitude, geo.longitude, geo.height)?;
                assert!(cart.hypot3(&back) < 1e-6);
            }
        }
    }

    // The equatorial point on the prime meridian
    let a = Ellipsoid::default().semimajor_axis();
    let geo = gridgeo::cartesian_to_geographic(a, 0., 0.)?;
    assert_float_eq!(geo.latitude, 0., abs <= 1e-12);
    assert_float_eq!(geo.longitude, 0., abs <= 1e-12);
    assert_float_eq!(geo.height, 0., abs <= 1e-9);
    Ok(())
}

#[test]
fn zones() -> Result<(), Error> {
    // Zone determinism and monotonicity, for a non-UTM setup too
    let params = ProjectionParameters {
        zone_width: 3.,
        origin: -178.5,
        ..ProjectionParameters::utm()
    };
    let custom = Projection::new(Ellipsoid::named("intl")?, params)?;

    for tm in [gridgeo::default_projection(), &custom] {
        let w = tm.parameters().zone_width;
        for lon in [-170.2, -1., 0.5, 14.9, 100.] {
            let zone = tm.forward(&GeographicPoint::new(0., lon))?.zone;
            for lat in [-70., 33.3, 80.] {
                let here = tm.forward(&GeographicPoint::new(lat, lon))?;
                assert_eq!(here.zone, zone);
                let east = tm.forward(&GeographicPoint::new(lat, lon + w))?;
                assert_eq!(east.zone, zone + 1);
            }
        }
    }
    Ok(())
}

#[test]
fn poles() -> Result<(), Error> {
    // The poles are accepted and map onto the central meridian
    for lat in [90., -90.] {
        let grid = gridgeo::forward_project(lat, 33.)?;
        assert_eq!(grid.easting, 500_000.);
        assert_float_eq!(grid.northing.abs(), 9_997_964.943, abs <= 0.001);
        assert_eq!(grid.northing.signum(), lat.signum());
    }
    assert!(matches!(
        gridgeo::forward_project(-90.5, 33.),
        Err(Error::InvalidLatitude(_))
    ));
    Ok(())
}

#[test]
fn user_provided_sink() -> Result<(), Error> {
    let csv = "\
a,55,12
b,56,12.5
c,north of the pole,12
d,55.5,12.25
";
    let mut extent = Extent::default();
    let records = batch::read_geo_records(csv.as_bytes(), AngleFormat::Decimal);
    let report = batch::geo_to_grid(gridgeo::default_projection(), records, &mut extent)?;

    assert_eq!(report, BatchReport { converted: 3, failures: 1 });
    assert_eq!(extent.count, 3);
    assert!(extent.min[0] < extent.max[0]);
    assert!(extent.min[1] < extent.max[1]);
    Ok(())
}
