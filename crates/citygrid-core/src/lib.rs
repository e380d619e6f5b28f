pub mod building;
pub mod chunk;
pub mod error;
pub mod lot;
pub mod map;
pub mod position;
pub mod road;
pub mod road_graph;

pub use building::{Building, City};
pub use chunk::Chunk;
pub use error::{Result, WorldError};
pub use lot::Lot;
pub use map::Map;
pub use position::{
    ChunkCoord, Direction, Extent, TilePos, TileRect, CHUNK_AXIS_RANGE, SIDE_LENGTH, TILES_PER_CHUNK,
};
pub use road::{Road, RoadType};
pub use road_graph::{RoadGraph, RoadNode};
