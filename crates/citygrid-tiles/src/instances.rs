//! Per-building instance data for the renderer.

use citygrid_core::{Building, Map};
use serde::{Deserialize, Serialize};

/// Gap left between a building and the edge of its tiles.
pub const BUILDING_MARGIN: f32 = 0.2;

/// Floats per instance in [`flatten`] output.
pub const FLOATS_PER_INSTANCE: usize = 6;

/// Box of one building in world units. The ground plane is `x`/`z`; `y`
/// is up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BuildingInstance {
    pub position: [f32; 3],
    pub extent: [f32; 3],
}

impl BuildingInstance {
    pub fn from_building(building: &Building) -> Self {
        let m = BUILDING_MARGIN;
        Self {
            position: [building.x as f32 + m, 0.0, building.y as f32 + m],
            extent: [
                building.width as f32 - 2.0 * m,
                building.level as f32,
                building.length as f32 - 2.0 * m,
            ],
        }
    }
}

/// One instance per residential building, chunks in map order.
pub fn building_instances(map: &Map) -> Vec<BuildingInstance> {
    map.chunks()
        .flat_map(|chunk| chunk.residentials())
        .map(BuildingInstance::from_building)
        .collect()
}

/// Lay instances out as `position, extent` float runs for upload.
pub fn flatten(instances: &[BuildingInstance]) -> Vec<f32> {
    let mut out = Vec::with_capacity(instances.len() * FLOATS_PER_INSTANCE);
    for instance in instances {
        out.extend_from_slice(&instance.position);
        out.extend_from_slice(&instance.extent);
    }
    out
}

/// Rebuild instance data if any building changed since the last refresh.
pub fn refresh_instances(map: &mut Map) -> Option<Vec<BuildingInstance>> {
    if !map.instances_dirty() {
        return None;
    }
    let instances = building_instances(map);
    map.mark_instances_clean();
    Some(instances)
}
