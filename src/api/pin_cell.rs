use crate::core::constants::{DEFAULT_LEVELS, EARTH_RADIUS};
use crate::core::format::{group_code, strip_separators};
use crate::core::grid::{approx_cell_size_meters, decode_bounds, decode_center, encode_raw};
use crate::core::projection::{lat_to_y, lon_to_x, x_to_lon, y_to_lat};
use crate::util::coord::{Coordinate, LatLng};
use crate::util::error::DigiPinError;
use geo_types::{LineString, Point, Polygon, Rect, coord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A single square cell in the DIGIPIN grid.
///
/// Each `PinCell` pairs a dash-grouped code with the geographic center of the
/// cell it names, and can produce the cell's bounding box for GIS operations.
///
/// # Example
///
/// ```
/// use digipin_rs::PinCell;
///
/// # fn main() -> Result<(), digipin_rs::DigiPinError> {
/// let cell = PinCell::from_lat_lng(28.6139, 77.2090, 10)?;
/// assert_eq!(cell.code, "SrDA-TYAV-PT");
///
/// let bounds = cell.bounds()?;
/// assert!(bounds.min().y <= cell.latitude() && cell.latitude() <= bounds.max().y);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinCell {
    /// Dash-grouped code identifying this cell
    pub code: String,
    /// Cell center in degrees
    pub center: LatLng,
    /// Subdivision depth (code length without dashes)
    pub levels: usize,
}

impl PinCell {
    fn from_raw(raw: String) -> Result<Self, DigiPinError> {
        let (lat, lon) = decode_center(&raw)?;
        let levels = raw.len();
        Ok(Self {
            code: group_code(&raw),
            center: LatLng::new(lat, lon),
            levels,
        })
    }

    /// Create a PinCell from a latitude/longitude in degrees.
    pub fn from_lat_lng(lat: f64, lon: f64, levels: i32) -> Result<Self, DigiPinError> {
        Self::from_raw(encode_raw(lat, lon, levels)?)
    }

    /// Create a PinCell from anything implementing [`Coordinate`].
    pub fn from_coordinate<C: Coordinate>(coord: &C, levels: i32) -> Result<Self, DigiPinError> {
        Self::from_lat_lng(coord.lat(), coord.lon(), levels)
    }

    /// Create a PinCell from an existing code, grouped or raw.
    ///
    /// The stored code is re-grouped canonically regardless of how the input
    /// was dashed.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::PinCell;
    ///
    /// # fn main() -> Result<(), digipin_rs::DigiPinError> {
    /// let cell = PinCell::from_code("SrDATYAVPT")?;
    /// assert_eq!(cell.code, "SrDA-TYAV-PT");
    /// assert_eq!(cell.levels, 10);
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_code(code: &str) -> Result<Self, DigiPinError> {
        let raw = strip_separators(code);
        if raw.is_empty() {
            return Err(DigiPinError::InvalidAddress(code.to_string()));
        }
        Self::from_raw(raw)
    }

    /// Create PinCells covering a line, approximated by sampling at
    /// half-cell steps in planar meters. Returns the unique cells in
    /// encounter order.
    pub fn from_line_string(line: &LineString<f64>, levels: i32) -> Result<Vec<Self>, DigiPinError> {
        let depth = if levels <= 0 { DEFAULT_LEVELS } else { levels };
        let step = approx_cell_size_meters(depth)? * 0.5;

        let planar: Vec<(f64, f64)> = line
            .0
            .iter()
            .map(|c| (lon_to_x(c.x), lat_to_y(c.y)))
            .collect();

        let mut seen: HashSet<String> = HashSet::new();
        let mut cells: Vec<PinCell> = Vec::new();

        for window in planar.windows(2) {
            let (x0, y0) = window[0];
            let (x1, y1) = window[1];
            let dx = x1 - x0;
            let dy = y1 - y0;
            let segment_length = (dx * dx + dy * dy).sqrt();
            let steps = (segment_length / step).ceil() as usize;

            for i in 0..=steps {
                let t = if steps == 0 {
                    0.0
                } else {
                    i as f64 / steps as f64
                };
                let lat = y_to_lat(y0 + dy * t);
                let lon = x_to_lon(x0 + dx * t);
                let raw = encode_raw(lat, lon, depth)?;
                if seen.insert(raw.clone()) {
                    cells.push(Self::from_raw(raw)?);
                }
            }
        }

        Ok(cells)
    }

    pub fn latitude(&self) -> f64 {
        self.center.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.center.longitude
    }

    /// Geographic bounding box of this cell in degrees
    /// (x = longitude, y = latitude).
    pub fn bounds(&self) -> Result<Rect<f64>, DigiPinError> {
        let cell = decode_bounds(&self.code)?;
        // The east edge is converted without normalization so a cell touching
        // the antimeridian keeps west < east.
        let west = (cell.min().x / EARTH_RADIUS).to_degrees();
        let east = (cell.max().x / EARTH_RADIUS).to_degrees();
        let south = y_to_lat(cell.min().y);
        let north = y_to_lat(cell.max().y);

        Ok(Rect::new(
            coord! { x: west, y: south },
            coord! { x: east, y: north },
        ))
    }

    /// Cell outline as a closed polygon in degrees, for GIS consumers.
    pub fn to_polygon(&self) -> Result<Polygon<f64>, DigiPinError> {
        Ok(self.bounds()?.to_polygon())
    }

    /// Cell center as a `geo_types::Point` (x = longitude, y = latitude).
    pub fn to_point(&self) -> Point<f64> {
        self.center.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::line_string;

    #[test]
    fn test_from_lat_lng() -> Result<(), DigiPinError> {
        let cell = PinCell::from_lat_lng(28.6139, 77.2090, 10)?;

        assert_eq!(cell.code, "SrDA-TYAV-PT");
        assert_eq!(cell.levels, 10);
        assert!((cell.latitude() - 28.6139).abs() < 0.05);
        assert!((cell.longitude() - 77.2090).abs() < 0.05);
        Ok(())
    }

    #[test]
    fn test_from_code_round_trip() -> Result<(), DigiPinError> {
        let cell = PinCell::from_lat_lng(-33.8688, 151.2093, 10)?;
        let restored = PinCell::from_code(&cell.code)?;

        assert_eq!(cell, restored);
        Ok(())
    }

    #[test]
    fn test_from_code_canonicalizes_grouping() -> Result<(), DigiPinError> {
        let cell = PinCell::from_code("S-rDATYAVP-T")?;
        assert_eq!(cell.code, "SrDA-TYAV-PT");
        Ok(())
    }

    #[test]
    fn test_from_code_rejects_empty() {
        assert!(matches!(
            PinCell::from_code("--"),
            Err(DigiPinError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_from_coordinate_matches_from_lat_lng() -> Result<(), DigiPinError> {
        let direct = PinCell::from_lat_lng(51.5074, -0.1278, 10)?;
        let via_point = PinCell::from_coordinate(&Point::new(-0.1278, 51.5074), 10)?;
        let via_tuple = PinCell::from_coordinate(&(51.5074, -0.1278), 10)?;

        assert_eq!(direct, via_point);
        assert_eq!(direct, via_tuple);
        Ok(())
    }

    #[test]
    fn test_bounds_contain_center() -> Result<(), DigiPinError> {
        let cell = PinCell::from_lat_lng(28.6139, 77.2090, 10)?;
        let bounds = cell.bounds()?;

        assert!(bounds.min().x < cell.longitude() && cell.longitude() < bounds.max().x);
        assert!(bounds.min().y < cell.latitude() && cell.latitude() < bounds.max().y);
        Ok(())
    }

    #[test]
    fn test_bounds_shrink_with_levels() -> Result<(), DigiPinError> {
        let coarse = PinCell::from_lat_lng(28.6139, 77.2090, 5)?.bounds()?;
        let fine = PinCell::from_lat_lng(28.6139, 77.2090, 10)?.bounds()?;

        assert!(fine.width() < coarse.width());
        assert!(fine.height() < coarse.height());
        Ok(())
    }

    #[test]
    fn test_to_polygon_is_closed() -> Result<(), DigiPinError> {
        let cell = PinCell::from_lat_lng(28.6139, 77.2090, 10)?;
        let polygon = cell.to_polygon()?;
        let exterior = polygon.exterior();

        assert_eq!(exterior.coords().count(), 5);
        assert_eq!(exterior.0[0], exterior.0[4]);
        Ok(())
    }

    #[test]
    fn test_from_line_string() -> Result<(), DigiPinError> {
        let line = line_string![
            (x: 77.2090, y: 28.6139),
            (x: 77.2110, y: 28.6150),
        ];
        let cells = PinCell::from_line_string(&line, 8)?;

        assert!(!cells.is_empty());
        for cell in &cells {
            assert_eq!(cell.levels, 8);
        }

        // No duplicates.
        let unique: HashSet<&str> = cells.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(unique.len(), cells.len());
        Ok(())
    }

    #[test]
    fn test_from_line_string_covers_endpoints() -> Result<(), DigiPinError> {
        let line = line_string![
            (x: 77.2090, y: 28.6139),
            (x: 77.2110, y: 28.6150),
        ];
        let cells = PinCell::from_line_string(&line, 8)?;

        let start = PinCell::from_lat_lng(28.6139, 77.2090, 8)?;
        let end = PinCell::from_lat_lng(28.6150, 77.2110, 8)?;
        let codes: HashSet<&str> = cells.iter().map(|c| c.code.as_str()).collect();

        assert!(codes.contains(start.code.as_str()));
        assert!(codes.contains(end.code.as_str()));
        Ok(())
    }

    #[test]
    fn test_from_empty_line_string() -> Result<(), DigiPinError> {
        let line = LineString::new(vec![]);
        let cells = PinCell::from_line_string(&line, 8)?;
        assert!(cells.is_empty());
        Ok(())
    }
}
