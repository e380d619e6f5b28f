use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::position::{Direction, Extent, TilePos, TileRect, SIDE_LENGTH};

/// A rectangular building plot.
///
/// The facing direction selects the edge that gets the frontage marker when
/// the lot is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LotFields")]
pub struct Lot {
    position: TilePos,
    size: Extent,
    direction: Direction,
}

impl Lot {
    /// Create a lot with its minimum corner at `position` (world space).
    ///
    /// Fails with [`WorldError::InvalidGeometry`] if the lot is empty or
    /// wider than a chunk; a lot may spill into the next chunk but no further.
    pub fn new(position: TilePos, size: Extent, direction: Direction) -> Result<Self> {
        if size.is_empty() {
            return Err(WorldError::geometry(format!(
                "lot at {} has empty size {}x{}",
                position, size.width, size.height
            )));
        }
        if size.width > SIDE_LENGTH as u32 || size.height > SIDE_LENGTH as u32 {
            return Err(WorldError::geometry(format!(
                "lot at {} is larger than a chunk ({}x{})",
                position, size.width, size.height
            )));
        }

        Ok(Self {
            position,
            size,
            direction,
        })
    }

    pub fn position(&self) -> TilePos {
        self.position
    }

    pub fn size(&self) -> Extent {
        self.size
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// World-space tiles covered by the lot.
    pub fn footprint(&self) -> TileRect {
        TileRect::new(self.position, self.size)
    }
}

/// Serialized form of a [`Lot`], validated through [`Lot::new`].
#[derive(Deserialize)]
struct LotFields {
    position: TilePos,
    size: Extent,
    direction: Direction,
}

impl TryFrom<LotFields> for Lot {
    type Error = WorldError;

    fn try_from(fields: LotFields) -> Result<Self> {
        Lot::new(fields.position, fields.size, fields.direction)
    }
}
