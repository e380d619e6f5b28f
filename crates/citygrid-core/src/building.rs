use serde::{Deserialize, Serialize};

use crate::position::TilePos;

/// A placed residential building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    /// World tile x of the building's corner
    pub x: i32,
    /// World tile y of the building's corner
    pub y: i32,
    pub width: u32,
    pub length: u32,
    /// Height in floors
    pub level: u32,
}

impl Building {
    pub fn new(x: i32, y: i32, width: u32, length: u32, level: u32) -> Self {
        Self {
            x,
            y,
            width,
            length,
            level,
        }
    }

    pub fn position(&self) -> TilePos {
        TilePos::new(self.x, self.y)
    }

    /// Buildings are identified by the tile they stand on.
    pub fn same_tile(&self, other: &Building) -> bool {
        self.x == other.x && self.y == other.y
    }
}

/// Summary of the city shown by the HUD
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    pub name: String,
    pub people: u32,
    pub money: i64,
}

impl City {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            people: 0,
            money: 0,
        }
    }
}

impl Default for City {
    fn default() -> Self {
        Self::new("New City")
    }
}
