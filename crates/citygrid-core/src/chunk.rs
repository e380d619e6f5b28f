//! A square region of the world grid.
//!
//! A chunk owns every lot, road and residential building whose origin lies in
//! its bounds. Geometry keeps world coordinates; a feature that is larger
//! than the space left in its chunk still belongs to that chunk and only
//! shows up in the neighbor through tile synthesis.

use crate::building::Building;
use crate::error::{Result, WorldError};
use crate::lot::Lot;
use crate::position::{ChunkCoord, TilePos, TileRect};
use crate::road::Road;
use crate::road_graph::RoadGraph;

/// One `SIDE_LENGTH` x `SIDE_LENGTH` chunk of the world.
#[derive(Debug, Clone)]
pub struct Chunk {
    position: ChunkCoord,
    lots: Vec<Lot>,
    road_graph: RoadGraph,
    residential: Vec<Building>,
    /// Tile buffer needs resynthesis
    tiles_dirty: bool,
    /// Building instance data needs re-upload
    instances_dirty: bool,
}

impl Chunk {
    /// Create an empty chunk. New chunks start dirty for both concerns.
    pub(crate) fn new(position: ChunkCoord) -> Self {
        Self {
            position,
            lots: Vec::new(),
            road_graph: RoadGraph::new(),
            residential: Vec::new(),
            tiles_dirty: true,
            instances_dirty: true,
        }
    }

    pub fn position(&self) -> ChunkCoord {
        self.position
    }

    /// World-space rectangle covered by this chunk.
    pub fn local_bounds(&self) -> TileRect {
        self.position.bounds()
    }

    fn ensure_owned(&self, position: TilePos) -> Result<()> {
        if self.local_bounds().contains(position) {
            Ok(())
        } else {
            Err(WorldError::NotInChunk {
                position,
                chunk: self.position,
            })
        }
    }

    /// Add a lot whose origin lies in this chunk.
    pub fn add_lot(&mut self, lot: Lot) -> Result<()> {
        self.ensure_owned(lot.position())?;
        self.lots.push(lot);
        self.tiles_dirty = true;
        Ok(())
    }

    /// Lots in insertion order.
    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Add a road segment whose origin lies in this chunk.
    ///
    /// The road graph re-derives its nodes; the road is rejected if that
    /// would leave a node without connections.
    pub fn add_road(&mut self, road: Road) -> Result<()> {
        self.ensure_owned(road.position())?;
        self.road_graph.add_road(road)?;
        self.tiles_dirty = true;
        Ok(())
    }

    /// Roads in insertion order.
    pub fn roads(&self) -> &[Road] {
        self.road_graph.roads()
    }

    pub fn road_graph(&self) -> &RoadGraph {
        &self.road_graph
    }

    /// Only reachable through [`Map::add_building`](crate::Map::add_building),
    /// which keeps the world's building count in step.
    pub(crate) fn add_building(&mut self, building: Building) {
        self.residential.push(building);
        self.instances_dirty = true;
    }

    /// Remove the most recently added building standing on the same tile.
    ///
    /// Returns `false` if no building matched.
    pub(crate) fn remove_building(&mut self, building: &Building) -> bool {
        match self.residential.iter().rposition(|b| b.same_tile(building)) {
            Some(index) => {
                self.residential.remove(index);
                self.instances_dirty = true;
                true
            }
            None => false,
        }
    }

    pub fn residentials(&self) -> &[Building] {
        &self.residential
    }

    pub fn residential_size(&self) -> usize {
        self.residential.len()
    }

    pub fn is_tiles_dirty(&self) -> bool {
        self.tiles_dirty
    }

    pub fn mark_tiles_dirty(&mut self) {
        self.tiles_dirty = true;
    }

    pub fn mark_tiles_clean(&mut self) {
        self.tiles_dirty = false;
    }

    pub fn is_instances_dirty(&self) -> bool {
        self.instances_dirty
    }

    pub fn mark_instances_clean(&mut self) {
        self.instances_dirty = false;
    }
}
