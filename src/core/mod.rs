pub mod constants;
pub mod format;
pub mod grid;
pub mod projection;

pub use constants::{DEFAULT_LEVELS, DIGIPIN_GRID, EARTH_RADIUS, GRID_DIM, MAX_LAT};
pub use format::{group_code, strip_separators};
pub use grid::{approx_cell_size_meters, decode_center, encode_raw};
pub use projection::{MERC_BOUNDS, MercatorBounds, normalize_lon};
