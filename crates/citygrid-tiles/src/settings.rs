use serde::{Deserialize, Serialize};

/// Display options that change which tiles synthesis emits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileSettings {
    /// Draw every road-graph node as a flat marker instead of autotiling it
    pub road_nodes_as_markers: bool,
}

impl TileSettings {
    /// Settings with road nodes drawn as markers
    pub fn markers() -> Self {
        Self {
            road_nodes_as_markers: true,
        }
    }

    /// Deserialize settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize settings to JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
