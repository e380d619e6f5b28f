//! Flat per-chunk tile buffer handed to the graphics layer.

use citygrid_core::{Result, TilePos, WorldError, SIDE_LENGTH, TILES_PER_CHUNK};

use crate::atlas::EMPTY;

/// Atlas index of every tile of one chunk, row-major (`y * SIDE_LENGTH + x`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TileBuffer {
    tiles: Vec<u32>,
}

impl Default for TileBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TileBuffer {
    /// A buffer of bare ground.
    pub fn new() -> Self {
        Self {
            tiles: vec![EMPTY; TILES_PER_CHUNK],
        }
    }

    fn index(x: i32, y: i32) -> Option<usize> {
        TilePos::new(x, y)
            .is_local()
            .then(|| (y * SIDE_LENGTH + x) as usize)
    }

    /// Tile at a local position, `None` outside the chunk.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        Self::index(x, y).map(|i| self.tiles[i])
    }

    /// Write a tile, failing with [`WorldError::OutOfBoundsWrite`] outside
    /// the chunk.
    pub fn try_set(&mut self, x: i32, y: i32, tile: u32) -> Result<()> {
        let index = Self::index(x, y).ok_or(WorldError::OutOfBoundsWrite { x, y })?;
        self.tiles[index] = tile;
        Ok(())
    }

    /// Write a tile, clipping writes outside the chunk.
    ///
    /// Returns whether the tile landed in the buffer.
    pub fn set(&mut self, x: i32, y: i32, tile: u32) -> bool {
        self.try_set(x, y, tile).is_ok()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.tiles
    }

    pub fn into_vec(self) -> Vec<u32> {
        self.tiles
    }

    /// Number of tiles that are not bare ground.
    pub fn painted_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t != EMPTY).count()
    }

    /// Rows from `y = 0` upwards.
    pub fn rows(&self) -> impl DoubleEndedIterator<Item = &[u32]> {
        self.tiles.chunks(SIDE_LENGTH as usize)
    }
}
