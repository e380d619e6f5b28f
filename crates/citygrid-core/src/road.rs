use serde::{Deserialize, Serialize};

use crate::error::{Result, WorldError};
use crate::position::{Direction, Extent, TilePos, TileRect, SIDE_LENGTH};

/// Cross-section of a road.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RoadTypeFields")]
pub struct RoadType {
    width: u32,
}

impl RoadType {
    /// Two border lanes around one lane of asphalt.
    pub const STREET: RoadType = RoadType { width: 3 };
    /// Two border lanes, no interior.
    pub const ALLEY: RoadType = RoadType { width: 2 };
    pub const AVENUE: RoadType = RoadType { width: 5 };

    /// A road needs both border lanes, so the width is at least 2.
    pub fn new(width: u32) -> Result<Self> {
        if !(2..=SIDE_LENGTH as u32).contains(&width) {
            return Err(WorldError::geometry(format!(
                "road width {} is outside 2..={}",
                width, SIDE_LENGTH
            )));
        }
        Ok(Self { width })
    }

    pub fn width(&self) -> u32 {
        self.width
    }
}

impl Default for RoadType {
    fn default() -> Self {
        Self::STREET
    }
}

/// A straight road segment.
///
/// `N` roads run along `y` starting at `position`, `W` roads along `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RoadFields")]
pub struct Road {
    position: TilePos,
    direction: Direction,
    length: u32,
    road_type: RoadType,
}

impl Road {
    pub fn new(position: TilePos, direction: Direction, length: u32, road_type: RoadType) -> Result<Self> {
        if !matches!(direction, Direction::N | Direction::W) {
            return Err(WorldError::geometry(format!(
                "road at {} must run N or W, got {:?}",
                position, direction
            )));
        }
        // Both ends get their own node, so they must be distinct tiles.
        if !(2..=SIDE_LENGTH as u32).contains(&length) {
            return Err(WorldError::geometry(format!(
                "road at {} has length {} outside 2..={}",
                position, length, SIDE_LENGTH
            )));
        }

        Ok(Self {
            position,
            direction,
            length,
            road_type,
        })
    }

    pub fn position(&self) -> TilePos {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn length(&self) -> u32 {
        self.length
    }

    pub fn road_type(&self) -> RoadType {
        self.road_type
    }

    pub fn is_vertical(&self) -> bool {
        self.direction == Direction::N
    }

    /// World-space tiles covered by the segment.
    pub fn footprint(&self) -> TileRect {
        let width = self.road_type.width;
        let size = if self.is_vertical() {
            Extent::new(width, self.length)
        } else {
            Extent::new(self.length, width)
        };
        TileRect::new(self.position, size)
    }

    /// One-tile-thick slice across the road at its first tile.
    pub fn start_cap(&self) -> TileRect {
        self.cap_at(0)
    }

    /// One-tile-thick slice across the road at its last tile.
    pub fn end_cap(&self) -> TileRect {
        self.cap_at(self.length as i32 - 1)
    }

    fn cap_at(&self, along: i32) -> TileRect {
        let width = self.road_type.width;
        if self.is_vertical() {
            TileRect::new(self.position.offset(0, along), Extent::new(width, 1))
        } else {
            TileRect::new(self.position.offset(along, 0), Extent::new(1, width))
        }
    }
}

/// Serialized forms, validated through the constructors.
#[derive(Deserialize)]
struct RoadTypeFields {
    width: u32,
}

impl TryFrom<RoadTypeFields> for RoadType {
    type Error = WorldError;

    fn try_from(fields: RoadTypeFields) -> Result<Self> {
        RoadType::new(fields.width)
    }
}

#[derive(Deserialize)]
struct RoadFields {
    position: TilePos,
    direction: Direction,
    length: u32,
    road_type: RoadType,
}

impl TryFrom<RoadFields> for Road {
    type Error = WorldError;

    fn try_from(fields: RoadFields) -> Result<Self> {
        Road::new(fields.position, fields.direction, fields.length, fields.road_type)
    }
}
