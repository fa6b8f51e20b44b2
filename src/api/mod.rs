pub mod digipin;
pub mod pin_cell;
pub mod pin_csv;

pub use digipin::{get_digi_pin, get_lat_lng_from_digi_pin};
pub use pin_cell::PinCell;
pub use pin_csv::{
    CoordinateSource, CsvPinConfig, CsvToDigiPin, GeometryFormat, csv_to_digipin_csv,
};
