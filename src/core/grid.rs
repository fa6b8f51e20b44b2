use crate::core::constants::{
    BOUNDARY_EPS, DEFAULT_LEVELS, DIGIPIN_GRID, EARTH_RADIUS, GRID_DIM, GRID_LOOKUP, MAX_LAT,
};
use crate::core::format::strip_separators;
use crate::core::projection::{MERC_BOUNDS, lat_to_y, lon_to_x, normalize_lon, x_to_lon, y_to_lat};
use crate::util::error::DigiPinError;
use geo_types::{Rect, coord};
use std::f64::consts::PI;

/// Encodes a latitude/longitude into a raw (ungrouped) symbol sequence.
///
/// A non-positive `levels` silently falls back to `DEFAULT_LEVELS`; only
/// non-finite coordinates are rejected.
pub fn encode_raw(lat: f64, lon: f64, levels: i32) -> Result<String, DigiPinError> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err(DigiPinError::InvalidCoordinate(format!("({}, {})", lat, lon)));
    }
    let levels = if levels <= 0 { DEFAULT_LEVELS } else { levels };

    let lat = lat.clamp(-MAX_LAT, MAX_LAT);
    let lon = normalize_lon(lon);

    let bounds = *MERC_BOUNDS;
    let (mut min_x, mut max_x) = (bounds.min_x, bounds.max_x);
    let (mut min_y, mut max_y) = (bounds.min_y, bounds.max_y);

    // Keep the point strictly inside the world box so floor() never lands
    // exactly on a cell edge.
    let x = lon_to_x(lon).clamp(min_x + BOUNDARY_EPS, max_x - BOUNDARY_EPS);
    let y = lat_to_y(lat).clamp(min_y + BOUNDARY_EPS, max_y - BOUNDARY_EPS);

    let mut code = String::with_capacity(levels as usize);
    for _ in 0..levels {
        let x_div = (max_x - min_x) / GRID_DIM as f64;
        let y_div = (max_y - min_y) / GRID_DIM as f64;

        // Row 0 is the northernmost band: y grows northward but the grid is
        // laid out top to bottom, hence the 5 - floor(...) inversion.
        let row = (5.0 - ((y - min_y) / y_div).floor()).clamp(0.0, 5.0) as usize;
        let col = ((x - min_x) / x_div).floor().clamp(0.0, 5.0) as usize;

        code.push(DIGIPIN_GRID[row][col]);

        max_y = min_y + y_div * (GRID_DIM - row) as f64;
        min_y += y_div * (GRID_DIM - 1 - row) as f64;
        min_x += x_div * col as f64;
        max_x = min_x + x_div;
    }

    Ok(code)
}

/// Decodes a code (grouped or raw) to the planar bounding box of its cell.
pub(crate) fn decode_bounds(code: &str) -> Result<Rect<f64>, DigiPinError> {
    let pin = strip_separators(code);
    if pin.is_empty() {
        return Err(DigiPinError::InvalidAddress(code.to_string()));
    }

    let bounds = *MERC_BOUNDS;
    let (mut min_x, mut max_x) = (bounds.min_x, bounds.max_x);
    let (mut min_y, mut max_y) = (bounds.min_y, bounds.max_y);

    for symbol in pin.chars() {
        let &(row, col) = GRID_LOOKUP
            .get(&symbol)
            .ok_or(DigiPinError::InvalidCharacter(symbol))?;

        let x_div = (max_x - min_x) / GRID_DIM as f64;
        let y_div = (max_y - min_y) / GRID_DIM as f64;

        let y1 = max_y - y_div * (row + 1) as f64;
        let y2 = max_y - y_div * row as f64;
        let x1 = min_x + x_div * col as f64;
        let x2 = x1 + x_div;

        (min_x, max_x, min_y, max_y) = (x1, x2, y1, y2);
    }

    Ok(Rect::new(
        coord! { x: min_x, y: min_y },
        coord! { x: max_x, y: max_y },
    ))
}

/// Decodes a code to the latitude/longitude center of its cell.
///
/// Returns `(lat, lon)`. Precision is half the final cell's extent, not an
/// exact inversion of the encoded input.
pub fn decode_center(code: &str) -> Result<(f64, f64), DigiPinError> {
    let cell = decode_bounds(code)?;
    let center = cell.center();
    Ok((y_to_lat(center.y), x_to_lon(center.x)))
}

/// Approximate cell width in meters for a code of the given length.
///
/// A single equatorial scalar: the world circumference over `6^levels`.
/// Mercator distortion toward the poles is ignored.
pub fn approx_cell_size_meters(levels: i32) -> Result<f64, DigiPinError> {
    if levels < 1 {
        return Err(DigiPinError::InvalidLevelCount(levels));
    }
    let world = 2.0 * PI * EARTH_RADIUS;
    Ok(world / (GRID_DIM as f64).powi(levels))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_known_values() -> Result<(), DigiPinError> {
        assert_eq!(encode_raw(28.6139, 77.2090, 10)?, "SrDATYAVPT");
        assert_eq!(encode_raw(-33.8688, 151.2093, 10)?, "ZXUY9G6QUK");
        assert_eq!(encode_raw(51.5, -0.1, 12)?, "J77F572AW5ZG");
        Ok(())
    }

    #[test]
    fn test_encode_prefix_stability() -> Result<(), DigiPinError> {
        // Fewer levels give a prefix of the deeper code.
        let deep = encode_raw(28.6139, 77.2090, 10)?;
        let shallow = encode_raw(28.6139, 77.2090, 5)?;
        assert_eq!(shallow, deep[0..5]);
        Ok(())
    }

    #[test]
    fn test_encode_is_deterministic() -> Result<(), DigiPinError> {
        let a = encode_raw(51.5, -0.1, 12)?;
        let b = encode_raw(51.5, -0.1, 12)?;
        assert_eq!(a, b);
        assert_eq!(a, "J77F572AW5ZG");
        Ok(())
    }

    #[test]
    fn test_encode_defaults_non_positive_levels() -> Result<(), DigiPinError> {
        let default = encode_raw(28.6139, 77.2090, 10)?;
        assert_eq!(encode_raw(28.6139, 77.2090, 0)?, default);
        assert_eq!(encode_raw(28.6139, 77.2090, -3)?, default);
        Ok(())
    }

    #[test]
    fn test_encode_rejects_non_finite() {
        assert!(matches!(
            encode_raw(f64::NAN, 77.0, 10),
            Err(DigiPinError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            encode_raw(28.0, f64::INFINITY, 10),
            Err(DigiPinError::InvalidCoordinate(_))
        ));
        assert!(matches!(
            encode_raw(f64::NEG_INFINITY, 0.0, 10),
            Err(DigiPinError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_antimeridian_collapses() -> Result<(), DigiPinError> {
        // +180 and -180 are the same meridian and must encode identically.
        let east = encode_raw(10.0, 180.0, 8)?;
        let west = encode_raw(10.0, -180.0, 8)?;
        assert_eq!(east, west);

        let wrapped = encode_raw(10.0, 540.0, 8)?;
        assert_eq!(wrapped, west);
        Ok(())
    }

    #[test]
    fn test_pole_is_clamped() -> Result<(), DigiPinError> {
        assert_eq!(encode_raw(90.0, 0.0, 6)?, encode_raw(MAX_LAT, 0.0, 6)?);
        assert_eq!(encode_raw(-90.0, 0.0, 6)?, encode_raw(-MAX_LAT, 0.0, 6)?);
        Ok(())
    }

    #[test]
    fn test_decode_known_center() -> Result<(), DigiPinError> {
        let (lat, lon) = decode_center("SrDA-TYAV-PT")?;
        assert!((lat - 28.613901072311293).abs() < 1e-9);
        assert!((lon - 77.20900193853834).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_decode_single_symbol() -> Result<(), DigiPinError> {
        // 'K' sits at row 1, col 3 of the top-level grid.
        let (lat, lon) = decode_center("K")?;
        assert!((lat - 66.51326044355861).abs() < 1e-9);
        assert!((lon - 30.0).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_decode_ignores_dash_placement() -> Result<(), DigiPinError> {
        let raw = decode_center("SrDATYAVPT")?;
        let grouped = decode_center("SrDA-TYAV-PT")?;
        let odd = decode_center("S-rDATYAVP-T")?;
        assert_eq!(raw, grouped);
        assert_eq!(raw, odd);
        Ok(())
    }

    #[test]
    fn test_decode_rejects_empty() {
        assert!(matches!(
            decode_center(""),
            Err(DigiPinError::InvalidAddress(_))
        ));
        assert!(matches!(
            decode_center("---"),
            Err(DigiPinError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_symbol() {
        assert_eq!(
            decode_center("INVALID$PIN"),
            Err(DigiPinError::InvalidCharacter('$'))
        );
        assert_eq!(
            decode_center("SrDA TYAV"),
            Err(DigiPinError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_round_trip_error_shrinks_with_levels() -> Result<(), DigiPinError> {
        let (lat, lon) = (28.6139, 77.2090);

        let mut previous = f64::INFINITY;
        for levels in [2, 4, 6, 8, 10] {
            let code = encode_raw(lat, lon, levels)?;
            let (dlat, dlon) = decode_center(&code)?;
            let err = (dlat - lat).abs().max((dlon - lon).abs());
            assert!(err < previous);
            previous = err;
        }
        // At 10 levels the center is well within 0.05 degrees.
        assert!(previous < 0.05);
        Ok(())
    }

    #[test]
    fn test_round_trip_across_hemispheres() -> Result<(), DigiPinError> {
        for &(lat, lon) in &[
            (28.6139, 77.2090),
            (-33.8688, 151.2093),
            (51.5074, -0.1278),
            (-54.8019, -68.3030),
            (64.1466, -21.9426),
            (0.0, 0.0),
        ] {
            let code = encode_raw(lat, lon, 10)?;
            let (dlat, dlon) = decode_center(&code)?;
            assert!((dlat - lat).abs() < 0.05, "lat drift for ({lat}, {lon})");
            assert!((dlon - lon).abs() < 0.05, "lon drift for ({lat}, {lon})");
        }
        Ok(())
    }

    #[test]
    fn test_decode_bounds_shrink_monotonically() -> Result<(), DigiPinError> {
        let code = encode_raw(28.6139, 77.2090, 10)?;
        let mut previous_width = f64::INFINITY;
        for end in 1..=code.len() {
            let cell = decode_bounds(&code[0..end])?;
            assert!(cell.min().x < cell.max().x);
            assert!(cell.min().y < cell.max().y);
            assert!(cell.width() < previous_width);
            previous_width = cell.width();
        }
        Ok(())
    }

    #[test]
    fn test_cell_size_known_values() -> Result<(), DigiPinError> {
        assert!((approx_cell_size_meters(1)? - 6_679_169.447596415).abs() < 1e-3);
        assert!((approx_cell_size_meters(5)? - 5_153.680129318222).abs() < 1e-6);
        assert!((approx_cell_size_meters(10)? - 0.6627675063423638).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn test_cell_size_monotonic() -> Result<(), DigiPinError> {
        for levels in 1..15 {
            assert!(approx_cell_size_meters(levels + 1)? < approx_cell_size_meters(levels)?);
        }
        assert!(approx_cell_size_meters(10)? < 200.0);
        Ok(())
    }

    #[test]
    fn test_cell_size_rejects_non_positive_levels() {
        assert_eq!(
            approx_cell_size_meters(0),
            Err(DigiPinError::InvalidLevelCount(0))
        );
        assert_eq!(
            approx_cell_size_meters(-5),
            Err(DigiPinError::InvalidLevelCount(-5))
        );
    }
}
