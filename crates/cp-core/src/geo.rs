//! Earth-centred Cartesian positions.
//!
//! Orbiting and fixed terminals share one frame so that pairwise distances are
//! a plain Euclidean norm.  `f64` is required here: orbital radii are ~7e6 m
//! and `f32` would lose metre-level precision.

/// A point in an Earth-centred, Earth-fixed frame, in metres.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    /// Mean Earth radius in metres.
    pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Surface point at the given geodetic latitude/longitude (spherical Earth).
    pub fn from_lat_lon_deg(lat: f64, lon: f64, altitude_m: f64) -> Self {
        let r = Self::EARTH_RADIUS_M + altitude_m;
        let (lat, lon) = (lat.to_radians(), lon.to_radians());
        Self {
            x: r * lat.cos() * lon.cos(),
            y: r * lat.cos() * lon.sin(),
            z: r * lat.sin(),
        }
    }

    #[inline]
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_sq(self, other: Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        dx * dx + dy * dy + dz * dz
    }

    #[inline]
    pub fn distance_m(self, other: Position) -> f64 {
        self.distance_sq(other).sqrt()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1}, {:.1})", self.x, self.y, self.z)
    }
}
