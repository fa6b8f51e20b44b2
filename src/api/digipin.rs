use crate::core::format::group_code;
use crate::core::grid::{decode_center, encode_raw};
use crate::util::coord::{Coordinate, LatLng};
use crate::util::error::DigiPinError;

/// Encodes a coordinate into a dash-grouped DIGIPIN code.
///
/// A non-positive `levels` falls back to the standard 10-symbol code.
///
/// # Example
/// ```
/// use digipin_rs::get_digi_pin;
///
/// # fn main() -> Result<(), digipin_rs::DigiPinError> {
/// let code = get_digi_pin(&(28.6139, 77.2090), 10)?;
/// assert_eq!(code, "SrDA-TYAV-PT");
/// # Ok(())
/// # }
/// ```
pub fn get_digi_pin<C: Coordinate>(coord: &C, levels: i32) -> Result<String, DigiPinError> {
    let raw = encode_raw(coord.lat(), coord.lon(), levels)?;
    Ok(group_code(&raw))
}

/// Decodes a DIGIPIN code (grouped or raw) to the center of its cell.
///
/// # Example
/// ```
/// use digipin_rs::get_lat_lng_from_digi_pin;
///
/// # fn main() -> Result<(), digipin_rs::DigiPinError> {
/// let center = get_lat_lng_from_digi_pin("SrDA-TYAV-PT")?;
/// assert!((center.latitude - 28.6139).abs() < 0.05);
/// assert!((center.longitude - 77.2090).abs() < 0.05);
/// # Ok(())
/// # }
/// ```
pub fn get_lat_lng_from_digi_pin(code: &str) -> Result<LatLng, DigiPinError> {
    let (lat, lon) = decode_center(code)?;
    Ok(LatLng::new(lat, lon))
}
