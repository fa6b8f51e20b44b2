/// Error type for digipin-rs operations.
#[derive(Debug, PartialEq)]
pub enum DigiPinError {
    /// Latitude or longitude is NaN or infinite.
    InvalidCoordinate(String),
    /// The level count must be at least 1.
    InvalidLevelCount(i32),
    /// The code is empty once separators are removed.
    InvalidAddress(String),
    /// The code contains a symbol that is not in the grid.
    InvalidCharacter(char),
    /// File I/O error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT).
    GeometryParseError(String),
}

impl std::fmt::Display for DigiPinError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DigiPinError::InvalidCoordinate(v) => {
                write!(f, "lat/lon must be finite numbers, got {}", v)
            }
            DigiPinError::InvalidLevelCount(n) => write!(f, "levels must be positive, got {}", n),
            DigiPinError::InvalidAddress(s) => write!(f, "invalid DIGIPIN: '{}'", s),
            DigiPinError::InvalidCharacter(c) => write!(f, "invalid character '{}' in DIGIPIN", c),
            DigiPinError::IoError(msg) => write!(f, "IO error: {}", msg),
            DigiPinError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            DigiPinError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for DigiPinError {}
