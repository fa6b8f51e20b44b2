use crate::core::constants::{EARTH_RADIUS, MAX_LAT};
use std::f64::consts::PI;
use std::sync::LazyLock;

/// Planar extent of the projected world, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MercatorBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

/// Full world extent, derived from `MAX_LAT` once at first use.
pub static MERC_BOUNDS: LazyLock<MercatorBounds> = LazyLock::new(|| {
    let max_y = EARTH_RADIUS * (PI / 4.0 + MAX_LAT.to_radians() / 2.0).tan().ln();
    MercatorBounds {
        min_x: -PI * EARTH_RADIUS,
        max_x: PI * EARTH_RADIUS,
        min_y: -max_y,
        max_y,
    }
});

/// Normalizes a longitude into (-180, 180]; the boundary +180 collapses to -180.
pub fn normalize_lon(lon: f64) -> f64 {
    let x = ((lon + 180.0) % 360.0 + 360.0) % 360.0 - 180.0;
    if x == 180.0 { -180.0 } else { x }
}

/// Forward projection of a longitude to planar x, meters.
pub fn lon_to_x(lon_deg: f64) -> f64 {
    EARTH_RADIUS * normalize_lon(lon_deg).to_radians()
}

/// Inverse projection of planar x back to a normalized longitude, degrees.
pub fn x_to_lon(x: f64) -> f64 {
    normalize_lon((x / EARTH_RADIUS).to_degrees())
}

/// Forward projection of a latitude to planar y, meters.
///
/// Latitude is clamped to ±`MAX_LAT`; the projection is infinite beyond it.
pub fn lat_to_y(lat_deg: f64) -> f64 {
    let phi = lat_deg.clamp(-MAX_LAT, MAX_LAT).to_radians();
    EARTH_RADIUS * (PI / 4.0 + phi / 2.0).tan().ln()
}

/// Inverse projection of planar y back to a latitude, degrees.
pub fn y_to_lat(y: f64) -> f64 {
    let phi = 2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0;
    phi.to_degrees()
}
