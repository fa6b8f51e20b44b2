//! # digipin-rs
//!
//! A square-cell grid codec on spherical Web Mercator: every location on
//! Earth gets a short, shareable DIGIPIN code, and every code decodes back to
//! the center of its cell. Each code symbol subdivides the current cell into
//! a 6×6 grid, so longer codes name smaller cells.
//!
//! There are three main entry points.
//!
//! ### 1. `get_digi_pin` / `get_lat_lng_from_digi_pin` - The Codec
//!
//! ```
//! use digipin_rs::{get_digi_pin, get_lat_lng_from_digi_pin};
//!
//! # fn main() -> Result<(), digipin_rs::DigiPinError> {
//! let code = get_digi_pin(&(28.6139, 77.2090), 10)?;
//! assert_eq!(code, "SrDA-TYAV-PT");
//!
//! let center = get_lat_lng_from_digi_pin(&code)?;
//! assert!((center.latitude - 28.6139).abs() < 0.05);
//! # Ok(())
//! # }
//! ```
//!
//! ### 2. `PinCell` - Single Cell Operations
//!
//! ```
//! use digipin_rs::PinCell;
//!
//! # fn main() -> Result<(), digipin_rs::DigiPinError> {
//! let cell = PinCell::from_lat_lng(28.6139, 77.2090, 10)?;
//! println!("{}", cell.code);
//! let polygon = cell.to_polygon()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### 3. `CsvToDigiPin` - CSV File Conversion
//!
//! Convert CSV files with coordinate columns or geometry columns (WKT or
//! GeoJSON) to DIGIPIN-indexed CSVs:
//!
//! ```no_run
//! use digipin_rs::{CsvPinConfig, CsvToDigiPin, GeometryFormat};
//!
//! let config = CsvPinConfig::from_coords("Latitude", "Longitude", 10)
//!     .with_cell_geometry(GeometryFormat::Wkt);
//!
//! "addresses.csv".to_digipin_csv("output.csv", &config).unwrap();
//! ```

pub mod api;
pub mod core;
pub mod util;

pub use crate::api::{
    CoordinateSource, CsvPinConfig, CsvToDigiPin, GeometryFormat, PinCell, csv_to_digipin_csv,
    get_digi_pin, get_lat_lng_from_digi_pin,
};
pub use crate::core::{
    DEFAULT_LEVELS, DIGIPIN_GRID, EARTH_RADIUS, GRID_DIM, MAX_LAT, approx_cell_size_meters,
    decode_center, encode_raw, group_code, strip_separators,
};
pub use crate::util::{Coordinate, DigiPinError, LatLng};

pub use geo_types;
