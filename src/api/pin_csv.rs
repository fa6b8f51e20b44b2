use crate::api::pin_cell::PinCell;
use crate::util::error::DigiPinError;
use geo::Centroid;
use geo_types::Geometry;
use geojson::GeoJson;
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;
use wkt::Wkt;

/// For the type of location source in the file
enum SourceIndices {
    Geometry(usize),
    Coordinates { lat_idx: usize, lon_idx: usize },
}

/// Output format for cell polygon geometries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryFormat {
    /// Well-Known Text format (e.g., "POLYGON((...))")
    Wkt,
    /// GeoJSON format
    GeoJson,
}

/// Specifies how to extract location data from CSV rows.
///
/// All coordinates are WGS-84 degrees; geometry columns use the GIS x/y
/// convention (x = longitude, y = latitude).
#[derive(Debug, Clone)]
pub enum CoordinateSource {
    /// A single column containing WKT or GeoJSON geometry
    GeometryColumn(String),
    /// Separate latitude and longitude columns
    CoordinateColumns {
        lat_column: String,
        lon_column: String,
    },
}

/// Configuration for CSV to DIGIPIN conversion.
#[derive(Debug, Clone)]
pub struct CsvPinConfig {
    pub source: CoordinateSource,
    pub exclude_columns: Vec<String>,
    pub levels: i32,
    pub include_cell_geometry: Option<GeometryFormat>,
}

impl CsvPinConfig {
    /// Create config for a CSV with a geometry column (WKT or GeoJSON).
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvPinConfig;
    ///
    /// let config = CsvPinConfig::new("geometry", 10);
    /// ```
    pub fn new(geometry_column: impl Into<String>, levels: i32) -> Self {
        Self {
            source: CoordinateSource::GeometryColumn(geometry_column.into()),
            exclude_columns: Vec::new(),
            levels,
            include_cell_geometry: None,
        }
    }

    /// Create config for a CSV with separate latitude/longitude columns.
    ///
    /// # Example
    /// ```
    /// use digipin_rs::CsvPinConfig;
    ///
    /// let config = CsvPinConfig::from_coords("Latitude", "Longitude", 10);
    /// ```
    pub fn from_coords(
        lat_column: impl Into<String>,
        lon_column: impl Into<String>,
        levels: i32,
    ) -> Self {
        Self {
            source: CoordinateSource::CoordinateColumns {
                lat_column: lat_column.into(),
                lon_column: lon_column.into(),
            },
            exclude_columns: Vec::new(),
            levels,
            include_cell_geometry: None,
        }
    }

    pub fn exclude(mut self, columns: Vec<String>) -> Self {
        self.exclude_columns = columns;
        self
    }

    /// Include cell polygon geometry in output.
    pub fn with_cell_geometry(mut self, format: GeometryFormat) -> Self {
        self.include_cell_geometry = Some(format);
        self
    }
}

pub trait CsvToDigiPin {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<(), DigiPinError>;
}

impl<P: AsRef<Path>> CsvToDigiPin for P {
    fn to_digipin_csv(
        &self,
        output_path: impl AsRef<Path>,
        config: &CsvPinConfig,
    ) -> Result<(), DigiPinError> {
        csv_to_digipin_csv(self, output_path, config)
    }
}

fn parse_geometry(s: &str) -> Result<Geometry<f64>, DigiPinError> {
    let trimmed = s.trim();
    if trimmed.starts_with('{') {
        parse_geojson(trimmed)
    } else {
        parse_wkt(trimmed)
    }
}

fn parse_geojson(s: &str) -> Result<Geometry<f64>, DigiPinError> {
    let geojson: GeoJson = s
        .parse()
        .map_err(|e: geojson::Error| DigiPinError::GeometryParseError(e.to_string()))?;

    match geojson {
        GeoJson::Geometry(geom) => {
            Geometry::try_from(geom).map_err(|e| DigiPinError::GeometryParseError(e.to_string()))
        }
        GeoJson::Feature(feat) => feat
            .geometry
            .ok_or_else(|| DigiPinError::GeometryParseError("Feature has no geometry".to_string()))
            .and_then(|g| {
                Geometry::try_from(g).map_err(|e| DigiPinError::GeometryParseError(e.to_string()))
            }),
        GeoJson::FeatureCollection(_) => Err(DigiPinError::GeometryParseError(
            "FeatureCollection not supported, use individual geometries".to_string(),
        )),
    }
}

fn parse_wkt(s: &str) -> Result<Geometry<f64>, DigiPinError> {
    let wkt: Wkt<f64> =
        Wkt::from_str(s).map_err(|e| DigiPinError::GeometryParseError(e.to_string()))?;

    wkt.try_into().map_err(|_| {
        DigiPinError::GeometryParseError("Failed to convert WKT to geometry".to_string())
    })
}

fn polygon_to_wkt(polygon: &geo_types::Polygon<f64>) -> String {
    use wkt::ToWkt;
    polygon.wkt_string()
}

fn polygon_to_geojson(polygon: &geo_types::Polygon<f64>) -> String {
    let geom = geojson::Geometry::from(polygon);
    geom.to_string()
}

fn geometry_to_pin_cells(geom: Geometry<f64>, levels: i32) -> Result<Vec<PinCell>, DigiPinError> {
    match geom {
        Geometry::Point(pt) => Ok(vec![PinCell::from_coordinate(&pt, levels)?]),
        Geometry::MultiPoint(mp) => {
            let mut cells = Vec::new();
            for pt in mp.0 {
                cells.push(PinCell::from_coordinate(&pt, levels)?);
            }
            Ok(cells)
        }
        Geometry::LineString(line) => PinCell::from_line_string(&line, levels),
        Geometry::MultiLineString(mls) => {
            let mut all_cells = Vec::new();
            for line in mls.0 {
                all_cells.extend(PinCell::from_line_string(&line, levels)?);
            }
            Ok(all_cells)
        }
        Geometry::Polygon(poly) => {
            if let Some(centroid) = poly.centroid() {
                Ok(vec![PinCell::from_coordinate(&centroid, levels)?])
            } else {
                Ok(vec![])
            }
        }
        Geometry::MultiPolygon(mp) => {
            let mut cells = Vec::new();
            for poly in mp.0 {
                if let Some(centroid) = poly.centroid() {
                    cells.push(PinCell::from_coordinate(&centroid, levels)?);
                }
            }
            Ok(cells)
        }
        Geometry::GeometryCollection(gc) => {
            let mut all_cells = Vec::new();
            for g in gc.0 {
                all_cells.extend(geometry_to_pin_cells(g, levels)?);
            }
            Ok(all_cells)
        }
        _ => Err(DigiPinError::GeometryParseError(
            "Unsupported geometry type".to_string(),
        )),
    }
}

/// Converts a CSV file with geometry or coordinate columns to a CSV file with
/// DIGIPIN codes.
///
/// Streams output to minimize memory usage for large files. Rows whose
/// geometry spans several cells (lines, collections) produce one output row
/// per cell.
///
/// # Example with geometry column (WKT or GeoJSON)
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvPinConfig};
///
/// let config = CsvPinConfig::new("Geo Shape", 10)
///     .exclude(vec!["Geo Point".into()]);
///
/// csv_to_digipin_csv("input.csv", "output.csv", &config).unwrap();
/// ```
///
/// # Example with coordinate columns
///
/// ```no_run
/// use digipin_rs::{csv_to_digipin_csv, CsvPinConfig};
///
/// let config = CsvPinConfig::from_coords("Latitude", "Longitude", 10);
///
/// csv_to_digipin_csv("addresses.csv", "output.csv", &config).unwrap();
/// ```
pub fn csv_to_digipin_csv(
    csv_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    config: &CsvPinConfig,
) -> Result<(), DigiPinError> {
    let file = File::open(csv_path).map_err(|e| DigiPinError::CsvError(e.to_string()))?;
    let mut reader = csv::Reader::from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| DigiPinError::CsvError(e.to_string()))?
        .clone();

    // Determine which columns to exclude based on source type
    let (source_indices, mut exclude_indices) = match &config.source {
        CoordinateSource::GeometryColumn(col) => {
            let idx = headers.iter().position(|h| h == col).ok_or_else(|| {
                DigiPinError::CsvError(format!("Geometry column '{}' not found", col))
            })?;
            let mut exclude = HashSet::new();
            exclude.insert(idx);
            (SourceIndices::Geometry(idx), exclude)
        }
        CoordinateSource::CoordinateColumns {
            lat_column,
            lon_column,
        } => {
            let lat_idx = headers.iter().position(|h| h == lat_column).ok_or_else(|| {
                DigiPinError::CsvError(format!("Latitude column '{}' not found", lat_column))
            })?;
            let lon_idx = headers.iter().position(|h| h == lon_column).ok_or_else(|| {
                DigiPinError::CsvError(format!("Longitude column '{}' not found", lon_column))
            })?;
            let mut exclude = HashSet::new();
            exclude.insert(lat_idx);
            exclude.insert(lon_idx);
            (SourceIndices::Coordinates { lat_idx, lon_idx }, exclude)
        }
    };

    // Add user-specified exclusions
    for col_name in &config.exclude_columns {
        if let Some(idx) = headers.iter().position(|h| h == col_name) {
            exclude_indices.insert(idx);
        }
    }

    let out_file = File::create(output_path).map_err(|e| DigiPinError::IoError(e.to_string()))?;
    let mut writer = csv::Writer::from_writer(out_file);

    // Write header row
    let mut header_row: Vec<&str> = vec!["digipin"];
    if config.include_cell_geometry.is_some() {
        header_row.push("cell_geometry");
    }
    for (i, h) in headers.iter().enumerate() {
        if !exclude_indices.contains(&i) {
            header_row.push(h);
        }
    }
    writer
        .write_record(&header_row)
        .map_err(|e| DigiPinError::CsvError(e.to_string()))?;

    // Process rows
    for result in reader.records() {
        let record = result.map_err(|e| DigiPinError::CsvError(e.to_string()))?;

        let cells = match &source_indices {
            SourceIndices::Geometry(idx) => {
                let geom_str = record.get(*idx).ok_or_else(|| {
                    DigiPinError::CsvError(format!("Missing geometry column at index {}", idx))
                })?;
                let geom = parse_geometry(geom_str)?;
                geometry_to_pin_cells(geom, config.levels)?
            }
            SourceIndices::Coordinates { lat_idx, lon_idx } => {
                let lat_str = record
                    .get(*lat_idx)
                    .ok_or_else(|| {
                        DigiPinError::CsvError(format!(
                            "Missing latitude column at index {}",
                            lat_idx
                        ))
                    })?
                    .trim();
                let lon_str = record
                    .get(*lon_idx)
                    .ok_or_else(|| {
                        DigiPinError::CsvError(format!(
                            "Missing longitude column at index {}",
                            lon_idx
                        ))
                    })?
                    .trim();

                let lat: f64 = lat_str.parse().map_err(|_| {
                    DigiPinError::CsvError(format!("Invalid latitude: '{}'", lat_str))
                })?;
                let lon: f64 = lon_str.parse().map_err(|_| {
                    DigiPinError::CsvError(format!("Invalid longitude: '{}'", lon_str))
                })?;

                vec![PinCell::from_lat_lng(lat, lon, config.levels)?]
            }
        };

        for cell in cells {
            let mut row: Vec<String> = vec![cell.code.clone()];

            if let Some(format) = config.include_cell_geometry {
                let polygon = cell.to_polygon()?;
                let geom_str = match format {
                    GeometryFormat::Wkt => polygon_to_wkt(&polygon),
                    GeometryFormat::GeoJson => polygon_to_geojson(&polygon),
                };
                row.push(geom_str);
            }

            for (i, field) in record.iter().enumerate() {
                if !exclude_indices.contains(&i) {
                    row.push(field.to_string());
                }
            }

            writer
                .write_record(&row)
                .map_err(|e| DigiPinError::CsvError(e.to_string()))?;
        }
    }

    writer
        .flush()
        .map_err(|e| DigiPinError::IoError(e.to_string()))?;

    Ok(())
}
