use thiserror::Error;

use crate::position::{ChunkCoord, TilePos};

/// Errors raised by world construction, lookup and tile synthesis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorldError {
    /// No chunk is stored under the requested coordinate
    #[error("chunk {0} does not exist")]
    ChunkNotFound(ChunkCoord),

    /// A chunk already occupies the coordinate
    #[error("chunk {0} already exists")]
    DuplicateChunk(ChunkCoord),

    /// The chunk's tiles would not fit in `i32` world coordinates
    #[error("chunk {0} is outside the representable world")]
    ChunkOutOfRange(ChunkCoord),

    /// Degenerate lot, road or road-node dimensions
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// A feature origin lies outside the chunk it was added to
    #[error("position {position} is outside chunk {chunk}")]
    NotInChunk { position: TilePos, chunk: ChunkCoord },

    /// A tile write fell outside the chunk-local buffer
    #[error("tile write at ({x}, {y}) is outside the chunk")]
    OutOfBoundsWrite { x: i32, y: i32 },

    /// The running building count drifted from the per-chunk sum
    #[error("building count is {actual}, chunks hold {expected}")]
    BuildingCountMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, WorldError>;

impl WorldError {
    pub(crate) fn geometry(message: impl Into<String>) -> Self {
        WorldError::InvalidGeometry(message.into())
    }
}
