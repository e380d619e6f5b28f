//! Texture atlas layout.
//!
//! The atlas is a 10x10 sheet. Index 0 is bare ground; sheet cell
//! `(col, row)` has index `row * ATLAS_SIDE + col + 1`. Row 0 of every road
//! and lot sprite holds the min-y (`S`) edge and column 0 the min-x (`E`)
//! edge.

/// Cells per atlas row.
pub const ATLAS_SIDE: u32 = 10;

/// Bare ground, nothing painted.
pub const EMPTY: u32 = 0;

/// Index of the atlas cell at `(col, row)`.
pub const fn tile(col: u32, row: u32) -> u32 {
    row * ATLAS_SIDE + col + 1
}

// Road sprite, a 3x3 frame around the asphalt.
pub const ROAD_CORNER_MIN_X_MIN_Y: u32 = tile(0, 0);
pub const ROAD_EDGE_MIN_Y: u32 = tile(1, 0);
pub const ROAD_CORNER_MAX_X_MIN_Y: u32 = tile(2, 0);
pub const ROAD_EDGE_MIN_X: u32 = tile(0, 1);
pub const ROAD_SURFACE: u32 = tile(1, 1);
pub const ROAD_EDGE_MAX_X: u32 = tile(2, 1);
pub const ROAD_CORNER_MIN_X_MAX_Y: u32 = tile(0, 2);
pub const ROAD_EDGE_MAX_Y: u32 = tile(1, 2);
pub const ROAD_CORNER_MAX_X_MAX_Y: u32 = tile(2, 2);

// Inner corners, where two roads meet.
pub const ROAD_INNER_MIN_X_MIN_Y: u32 = tile(3, 0);
pub const ROAD_INNER_MIN_X_MAX_Y: u32 = tile(3, 1);
pub const ROAD_INNER_MAX_X_MIN_Y: u32 = tile(4, 0);
pub const ROAD_INNER_MAX_X_MAX_Y: u32 = tile(4, 1);

/// Flat marker drawn over road nodes in marker display mode.
pub const NODE_MARKER: u32 = tile(3, 2);

// Lot frame.
pub const LOT_CORNER_MIN_X_MIN_Y: u32 = tile(5, 2);
pub const LOT_EDGE_MIN_Y: u32 = tile(6, 2);
pub const LOT_CORNER_MAX_X_MIN_Y: u32 = tile(7, 2);
pub const LOT_EDGE_MIN_X: u32 = tile(5, 3);
pub const LOT_INTERIOR: u32 = tile(6, 3);
pub const LOT_EDGE_MAX_X: u32 = tile(7, 3);
pub const LOT_CORNER_MIN_X_MAX_Y: u32 = tile(5, 4);
pub const LOT_EDGE_MAX_Y: u32 = tile(6, 4);
pub const LOT_CORNER_MAX_X_MAX_Y: u32 = tile(7, 4);

/// Frontage strip: tiles for the first corner, the middle and the last
/// corner of the marked edge.
pub type Frontage = [u32; 3];

/// `N` lots, drawn along max-y.
pub const FRONTAGE_N: Frontage = [tile(5, 1), tile(6, 1), tile(7, 1)];
/// `S` lots, drawn along min-y.
pub const FRONTAGE_S: Frontage = [tile(5, 0), tile(6, 0), tile(7, 0)];
/// `W` lots, drawn along max-x from min-y to max-y.
pub const FRONTAGE_W: Frontage = [tile(9, 0), tile(9, 1), tile(9, 2)];
/// `E` lots, drawn along min-x from min-y to max-y.
pub const FRONTAGE_E: Frontage = [tile(8, 0), tile(8, 1), tile(8, 2)];

/// Corner tile of an intersection, chosen from the two flags that face the
/// corner.
///
/// Entries are indexed by `first | second << 1`: none, first only, second
/// only, both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CornerTable(pub [u32; 4]);

impl CornerTable {
    pub const fn code(first: bool, second: bool) -> usize {
        (first as usize) | ((second as usize) << 1)
    }

    pub fn lookup(&self, first: bool, second: bool) -> u32 {
        self.0[Self::code(first, second)]
    }
}

/// `(min x, min y)`, keyed by `(has_s, has_e)`.
pub const CORNER_MIN_X_MIN_Y: CornerTable = CornerTable([
    ROAD_CORNER_MIN_X_MIN_Y,
    ROAD_EDGE_MIN_X,
    ROAD_EDGE_MIN_Y,
    ROAD_INNER_MIN_X_MIN_Y,
]);

/// `(min x, max y)`, keyed by `(has_n, has_e)`.
pub const CORNER_MIN_X_MAX_Y: CornerTable = CornerTable([
    ROAD_CORNER_MIN_X_MAX_Y,
    ROAD_EDGE_MIN_X,
    ROAD_EDGE_MAX_Y,
    ROAD_INNER_MIN_X_MAX_Y,
]);

/// `(max x, min y)`, keyed by `(has_s, has_w)`.
pub const CORNER_MAX_X_MIN_Y: CornerTable = CornerTable([
    ROAD_CORNER_MAX_X_MIN_Y,
    ROAD_EDGE_MAX_X,
    ROAD_EDGE_MIN_Y,
    ROAD_INNER_MAX_X_MIN_Y,
]);

/// `(max x, max y)`, keyed by `(has_n, has_w)`.
pub const CORNER_MAX_X_MAX_Y: CornerTable = CornerTable([
    ROAD_CORNER_MAX_X_MAX_Y,
    ROAD_EDGE_MAX_X,
    ROAD_EDGE_MAX_Y,
    ROAD_INNER_MAX_X_MAX_Y,
]);
