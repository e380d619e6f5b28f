use std::collections::HashMap;

use citygrid_core::{ChunkCoord, Map, Result};
use tracing::debug;

use crate::buffer::TileBuffer;
use crate::settings::TileSettings;
use crate::synthesis::synthesize_tiles;

/// Last synthesized tile buffer of every chunk
#[derive(Debug, Default)]
pub struct TileCache {
    buffers: HashMap<ChunkCoord, TileBuffer>,
}

impl TileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resynthesize every tile-dirty chunk and mark it clean.
    ///
    /// Returns the refreshed coordinates in map order. On error the chunks
    /// refreshed so far stay clean and the failing one stays dirty.
    pub fn refresh(&mut self, map: &mut Map, settings: &TileSettings) -> Result<Vec<ChunkCoord>> {
        let dirty: Vec<ChunkCoord> = map
            .chunks()
            .filter(|chunk| chunk.is_tiles_dirty())
            .map(|chunk| chunk.position())
            .collect();

        for &coord in &dirty {
            let tiles = synthesize_tiles(map, coord, settings)?;
            self.buffers.insert(coord, tiles);
            map.mark_tiles_clean(coord)?;
        }

        if !dirty.is_empty() {
            debug!(refreshed = dirty.len(), cached = self.buffers.len(), "refreshed chunk tiles");
        }
        Ok(dirty)
    }

    /// Cached tiles of a chunk, if it was ever synthesized
    pub fn tiles(&self, coord: ChunkCoord) -> Option<&TileBuffer> {
        self.buffers.get(&coord)
    }

    /// Drop every cached buffer and force a full resynthesis on the next
    /// refresh, e.g. after the display settings changed
    pub fn invalidate_all(&mut self, map: &mut Map) {
        self.buffers.clear();
        map.mark_all_tiles_dirty();
    }

    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
