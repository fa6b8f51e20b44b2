use std::collections::HashMap;
use std::sync::LazyLock;

/// 6×6 symbol grid used at every subdivision level.
///
/// Rows run top to bottom (row 0 is the northernmost band), columns left to
/// right. Every symbol appears exactly once; decoding depends on it.
pub const DIGIPIN_GRID: [[char; 6]; 6] = [
    ['I', 'A', 'B', 'C', 'D', 'E'],
    ['G', 'H', 'J', 'K', 'L', 'M'],
    ['N', 'P', 'Q', 'R', 'S', 'T'],
    ['U', 'r', 'W', 'X', 'Y', 'Z'],
    ['a', 'b', '9', 'd', 'V', 'F'],
    ['2', '3', '4', '5', '6', '7'],
];

/// Web Mercator sphere radius in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Latitude limit of the Web Mercator projection, degrees.
pub const MAX_LAT: f64 = 85.051_128_78;

/// Cells per grid axis at each level.
pub const GRID_DIM: usize = 6;

/// Code length substituted when the encoder is given a non-positive level count.
pub const DEFAULT_LEVELS: i32 = 10;

/// Margin in meters keeping a projected point strictly inside the world box,
/// so a point never lands exactly on a cell boundary.
pub(crate) const BOUNDARY_EPS: f64 = 1e-9;

/// Reverse lookup from grid symbol to (row, col), built once at first use.
///
/// Decoding is only well-defined if no symbol repeats, so a duplicate aborts
/// here instead of silently decoding to the wrong cell.
pub(crate) static GRID_LOOKUP: LazyLock<HashMap<char, (usize, usize)>> = LazyLock::new(|| {
    let mut lookup = HashMap::with_capacity(GRID_DIM * GRID_DIM);
    for (row, symbols) in DIGIPIN_GRID.iter().enumerate() {
        for (col, &symbol) in symbols.iter().enumerate() {
            let previous = lookup.insert(symbol, (row, col));
            assert!(
                previous.is_none(),
                "duplicate symbol '{symbol}' in DIGIPIN_GRID"
            );
        }
    }
    lookup
});
