//! Tile and chunk coordinates.
//!
//! The world is an unbounded grid of tiles split into square chunks of
//! [`SIDE_LENGTH`] tiles per edge. Features keep their world position; tile
//! synthesis converts it into the local frame of whichever chunk is being
//! painted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Number of tiles along each edge of a chunk.
pub const SIDE_LENGTH: i32 = 16;

/// Number of tiles in one chunk.
pub const TILES_PER_CHUNK: usize = (SIDE_LENGTH * SIDE_LENGTH) as usize;

/// Chunk coordinates, per axis, whose tiles and one chunk of spill past the
/// max edge fit in `i32`.
pub const CHUNK_AXIS_RANGE: RangeInclusive<i32> = (i32::MIN / SIDE_LENGTH)..=(i32::MAX / SIDE_LENGTH - 1);

/// Coordinate of a chunk in the chunk grid.
///
/// Chunk `(1, 0)` covers world tiles `x ∈ [16, 32)`, `y ∈ [0, 16)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub x: i32,
    pub y: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The chunk covering a world tile.
    ///
    /// Uses floor division, so `(-1, -1)` lands in chunk `(-1, -1)` and not in
    /// `(0, 0)`.
    ///
    /// ```
    /// use citygrid_core::{ChunkCoord, TilePos};
    ///
    /// assert_eq!(ChunkCoord::containing(TilePos::new(17, 3)), ChunkCoord::new(1, 0));
    /// assert_eq!(ChunkCoord::containing(TilePos::new(-1, -16)), ChunkCoord::new(-1, -1));
    /// assert_eq!(ChunkCoord::containing(TilePos::new(-17, 0)), ChunkCoord::new(-2, 0));
    /// ```
    pub fn containing(pos: TilePos) -> Self {
        Self {
            x: pos.x.div_euclid(SIDE_LENGTH),
            y: pos.y.div_euclid(SIDE_LENGTH),
        }
    }

    /// Check if both axes lie in [`CHUNK_AXIS_RANGE`].
    pub fn is_in_range(&self) -> bool {
        CHUNK_AXIS_RANGE.contains(&self.x) && CHUNK_AXIS_RANGE.contains(&self.y)
    }

    /// First world tile of this chunk.
    ///
    /// Exact for coordinates in range; saturates outside it.
    pub fn origin(&self) -> TilePos {
        TilePos::new(
            self.x.saturating_mul(SIDE_LENGTH),
            self.y.saturating_mul(SIDE_LENGTH),
        )
    }

    /// World-space rectangle covered by this chunk.
    pub fn bounds(&self) -> TileRect {
        TileRect::new(self.origin(), Extent::square(SIDE_LENGTH as u32))
    }

    /// Neighboring coordinate, `None` if it does not fit in `i32`.
    pub fn offset(self, dx: i32, dy: i32) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
        })
    }
}

impl fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A tile coordinate, either in world space or local to a chunk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a world position into the local frame of `chunk`.
    ///
    /// The result is outside `[0, SIDE_LENGTH)` when the position belongs to
    /// another chunk; painting relies on that to clip neighbor geometry.
    pub fn to_local(self, chunk: ChunkCoord) -> TilePos {
        let origin = chunk.origin();
        TilePos::new(self.x - origin.x, self.y - origin.y)
    }

    /// Convert a position local to `chunk` back into world space.
    pub fn to_world(self, chunk: ChunkCoord) -> TilePos {
        let origin = chunk.origin();
        TilePos::new(self.x + origin.x, self.y + origin.y)
    }

    /// Check if this local position lies inside a chunk.
    pub fn is_local(&self) -> bool {
        (0..SIDE_LENGTH).contains(&self.x) && (0..SIDE_LENGTH).contains(&self.y)
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for TilePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Width and height of a footprint, in tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle of tiles, `min` inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRect {
    pub min: TilePos,
    pub size: Extent,
}

impl TileRect {
    pub const fn new(min: TilePos, size: Extent) -> Self {
        Self { min, size }
    }

    /// Build a rectangle from inclusive corners.
    pub fn from_corners(min: TilePos, max: TilePos) -> Self {
        Self {
            min,
            size: Extent::new((max.x - min.x + 1) as u32, (max.y - min.y + 1) as u32),
        }
    }

    /// Last tile of the rectangle (inclusive).
    pub fn max(&self) -> TilePos {
        TilePos::new(
            self.min.x + self.size.width as i32 - 1,
            self.min.y + self.size.height as i32 - 1,
        )
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        let max = self.max();
        pos.x >= self.min.x && pos.x <= max.x && pos.y >= self.min.y && pos.y <= max.y
    }

    pub fn overlaps(&self, other: &TileRect) -> bool {
        let (a, b) = (self.max(), other.max());
        self.min.x <= b.x && other.min.x <= a.x && self.min.y <= b.y && other.min.y <= a.y
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &TileRect) -> TileRect {
        let (a, b) = (self.max(), other.max());
        TileRect::from_corners(
            TilePos::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            TilePos::new(a.x.max(b.x), a.y.max(b.y)),
        )
    }

    /// The same rectangle expressed in the local frame of `chunk`.
    pub fn to_local(&self, chunk: ChunkCoord) -> TileRect {
        TileRect::new(self.min.to_local(chunk), self.size)
    }

    /// Iterate over every tile, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> {
        let min = self.min;
        let max = self.max();
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| TilePos::new(x, y)))
    }
}

/// Cardinal direction on the tile grid.
///
/// `N` points towards increasing `y` and `W` towards increasing `x`, matching
/// the texture atlas where row 0 holds the `S` edge and column 0 the `E` edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
}

impl Direction {
    pub fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::S => Direction::N,
            Direction::E => Direction::W,
            Direction::W => Direction::E,
        }
    }
}
