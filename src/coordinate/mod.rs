//! The three coordinate representations handled by the crate. All are plain
//! `Copy` values, created per call and never shared.

/// Latitude and longitude in decimal degrees, ellipsoidal height in metres
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct GeographicPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub height: f64,
}

/// Zone number, easting and northing (metres) in a Transverse Mercator grid
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct GridPoint {
    pub zone: i32,
    pub easting: f64,
    pub northing: f64,
}

/// Geocentric, earth centered, earth fixed X, Y, Z in metres
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

// ----- C O N S T R U C T O R S ---------------------------------------------

impl GeographicPoint {
    /// A point on the ellipsoid surface
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> GeographicPoint {
        GeographicPoint {
            latitude,
            longitude,
            height: 0.,
        }
    }

    #[must_use]
    pub fn with_height(latitude: f64, longitude: f64, height: f64) -> GeographicPoint {
        GeographicPoint {
            latitude,
            longitude,
            height,
        }
    }

    /// Latitude and longitude in radians
    #[must_use]
    pub fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl GridPoint {
    #[must_use]
    pub fn new(zone: i32, easting: f64, northing: f64) -> GridPoint {
        GridPoint {
            zone,
            easting,
            northing,
        }
    }

    /// Euclidean distance between two grid points, disregarding the zone
    #[must_use]
    pub fn hypot2(&self, other: &GridPoint) -> f64 {
        (self.easting - other.easting).hypot(self.northing - other.northing)
    }
}

impl CartesianPoint {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> CartesianPoint {
        CartesianPoint { x, y, z }
    }

    /// Euclidean distance between two cartesian points
    #[must_use]
    pub fn hypot3(&self, other: &CartesianPoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

// ----- Tests ---------------------------------------------------------------------
