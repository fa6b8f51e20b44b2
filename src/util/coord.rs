use geo_types::Point;
use serde::{Deserialize, Serialize};

/// Anything that can supply a latitude/longitude pair in degrees.
pub trait Coordinate {
    fn lat(&self) -> f64;
    fn lon(&self) -> f64;
}

/// Tuples are read as `(latitude, longitude)`.
impl Coordinate for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }
    fn lon(&self) -> f64 {
        self.1
    }
}

/// Points follow the GIS x/y convention: x is longitude, y is latitude.
impl Coordinate for Point<f64> {
    fn lat(&self) -> f64 {
        self.y()
    }
    fn lon(&self) -> f64 {
        self.x()
    }
}

/// A latitude/longitude pair in degrees (WGS-84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

impl LatLng {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl Coordinate for LatLng {
    fn lat(&self) -> f64 {
        self.latitude
    }
    fn lon(&self) -> f64 {
        self.longitude
    }
}

impl From<LatLng> for Point<f64> {
    fn from(ll: LatLng) -> Self {
        Point::new(ll.longitude, ll.latitude)
    }
}
