use std::collections::HashMap;

use tracing::debug;

use crate::building::{Building, City};
use crate::chunk::Chunk;
use crate::error::{Result, WorldError};
use crate::position::ChunkCoord;

/// Offsets of the chunks whose tiles read a chunk's geometry: tile synthesis
/// of `P` paints the chunks at `P - (1, 1)`, `P - (1, 0)` and `P - (0, 1)`.
const DOWNSTREAM: [(i32, i32); 3] = [(1, 1), (1, 0), (0, 1)];

/// The world: every chunk, plus the running building count
#[derive(Debug, Clone, Default)]
pub struct Map {
    /// Chunks in creation order
    chunks: Vec<Chunk>,
    /// Coordinate -> index into `chunks`
    index: HashMap<ChunkCoord, usize>,
    /// Sum of residential buildings over all chunks
    building_count: usize,
    city: City,
}

impl Map {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty map for a named city
    pub fn with_city(city: City) -> Self {
        Self {
            city,
            ..Self::default()
        }
    }

    /// Add an empty chunk at `coord`.
    ///
    /// Fails with [`WorldError::DuplicateChunk`] for a taken coordinate and
    /// [`WorldError::ChunkOutOfRange`] outside [`CHUNK_AXIS_RANGE`](crate::CHUNK_AXIS_RANGE).
    pub fn create_chunk(&mut self, coord: ChunkCoord) -> Result<()> {
        if !coord.is_in_range() {
            return Err(WorldError::ChunkOutOfRange(coord));
        }
        if self.index.contains_key(&coord) {
            return Err(WorldError::DuplicateChunk(coord));
        }

        self.index.insert(coord, self.chunks.len());
        self.chunks.push(Chunk::new(coord));
        debug!(chunk = %coord, "created chunk");
        Ok(())
    }

    /// Check if a chunk exists at `coord`
    pub fn chunk_exists(&self, coord: ChunkCoord) -> bool {
        self.index.contains_key(&coord)
    }

    /// Get the chunk at `coord`
    pub fn get_chunk(&self, coord: ChunkCoord) -> Result<&Chunk> {
        self.index
            .get(&coord)
            .map(|&i| &self.chunks[i])
            .ok_or(WorldError::ChunkNotFound(coord))
    }

    /// Get the chunk at `coord` for editing.
    ///
    /// The chunks that paint this one's geometry across their border are
    /// marked tile-dirty up front, since any lot or road added through the
    /// returned reference can bleed into them.
    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Result<&mut Chunk> {
        let index = *self
            .index
            .get(&coord)
            .ok_or(WorldError::ChunkNotFound(coord))?;

        for (dx, dy) in DOWNSTREAM {
            if let Some(&i) = coord.offset(dx, dy).and_then(|c| self.index.get(&c)) {
                self.chunks[i].mark_tiles_dirty();
            }
        }

        Ok(&mut self.chunks[index])
    }

    /// Record that the tile buffer of `coord` is up to date
    pub fn mark_tiles_clean(&mut self, coord: ChunkCoord) -> Result<()> {
        let index = *self
            .index
            .get(&coord)
            .ok_or(WorldError::ChunkNotFound(coord))?;
        self.chunks[index].mark_tiles_clean();
        Ok(())
    }

    /// Force every chunk to be resynthesized, e.g. after a display change
    pub fn mark_all_tiles_dirty(&mut self) {
        for chunk in &mut self.chunks {
            chunk.mark_tiles_dirty();
        }
    }

    /// Check if any chunk's building instances changed
    pub fn instances_dirty(&self) -> bool {
        self.chunks.iter().any(Chunk::is_instances_dirty)
    }

    /// Record that building instance data of every chunk is up to date
    pub fn mark_instances_clean(&mut self) {
        for chunk in &mut self.chunks {
            chunk.mark_instances_clean();
        }
    }

    /// Chunks in creation order
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter()
    }

    /// Coordinates of all chunks, in creation order
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        self.chunks.iter().map(Chunk::position).collect()
    }

    /// Get the number of chunks
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Place a building in the chunk covering its tile.
    ///
    /// Buildings outside every chunk are dropped; returns whether it was placed.
    pub fn add_building(&mut self, building: Building) -> bool {
        let coord = ChunkCoord::containing(building.position());
        match self.index.get(&coord) {
            Some(&i) => {
                self.chunks[i].add_building(building);
                self.building_count += 1;
                true
            }
            None => {
                debug!(x = building.x, y = building.y, chunk = %coord, "dropped building outside the map");
                false
            }
        }
    }

    /// Remove a building by its tile; returns whether one was removed
    pub fn remove_building(&mut self, building: &Building) -> bool {
        let coord = ChunkCoord::containing(building.position());
        let removed = match self.index.get(&coord) {
            Some(&i) => self.chunks[i].remove_building(building),
            None => false,
        };
        if removed {
            self.building_count -= 1;
        }
        removed
    }

    /// Number of residential buildings in the world
    pub fn building_count(&self) -> usize {
        self.building_count
    }

    pub fn city(&self) -> &City {
        &self.city
    }

    pub fn set_city(&mut self, city: City) {
        self.city = city;
    }

    /// Check the world's internal consistency.
    ///
    /// Meant to run once after world construction and before the first tile
    /// synthesis.
    pub fn validate(&self) -> Result<()> {
        let expected: usize = self.chunks.iter().map(Chunk::residential_size).sum();
        if expected != self.building_count {
            return Err(WorldError::BuildingCountMismatch {
                expected,
                actual: self.building_count,
            });
        }

        for chunk in &self.chunks {
            chunk.road_graph().validate()?;
        }

        debug!(chunks = self.chunks.len(), buildings = expected, "map validated");
        Ok(())
    }
}
