//! Painting of lots, roads and road nodes onto a chunk's tile buffer.
//!
//! Every painter takes the feature in world space plus the coordinate of the
//! chunk being drawn, so the same routine draws a chunk's own geometry and the
//! part of a neighbor's geometry that reaches across the border. Writes that
//! land outside the chunk are clipped by the buffer.

use citygrid_core::{Chunk, ChunkCoord, Direction, Lot, Result, Road, RoadNode, WorldError};

use crate::atlas::{
    Frontage, CORNER_MAX_X_MAX_Y, CORNER_MAX_X_MIN_Y, CORNER_MIN_X_MAX_Y, CORNER_MIN_X_MIN_Y,
    FRONTAGE_E, FRONTAGE_N, FRONTAGE_S, FRONTAGE_W, LOT_CORNER_MAX_X_MAX_Y, LOT_CORNER_MAX_X_MIN_Y,
    LOT_CORNER_MIN_X_MAX_Y, LOT_CORNER_MIN_X_MIN_Y, LOT_EDGE_MAX_X, LOT_EDGE_MAX_Y, LOT_EDGE_MIN_X,
    LOT_EDGE_MIN_Y, LOT_INTERIOR, NODE_MARKER, ROAD_CORNER_MAX_X_MAX_Y, ROAD_CORNER_MAX_X_MIN_Y,
    ROAD_CORNER_MIN_X_MAX_Y, ROAD_CORNER_MIN_X_MIN_Y, ROAD_EDGE_MAX_X, ROAD_EDGE_MAX_Y,
    ROAD_EDGE_MIN_X, ROAD_EDGE_MIN_Y, ROAD_SURFACE,
};
use crate::buffer::TileBuffer;
use crate::settings::TileSettings;

/// Paint all lots, then all roads, then all road nodes of `chunk`.
pub fn paint_chunk(
    chunk: &Chunk,
    frame: ChunkCoord,
    settings: &TileSettings,
    tiles: &mut TileBuffer,
) -> Result<()> {
    for lot in chunk.lots() {
        paint_lot(lot, frame, tiles);
    }
    for road in chunk.roads() {
        paint_road(road, frame, tiles);
    }
    for node in chunk.road_graph().nodes() {
        paint_road_node(node, frame, settings, tiles)?;
    }
    Ok(())
}

pub fn paint_lot(lot: &Lot, frame: ChunkCoord, tiles: &mut TileBuffer) {
    let rect = lot.footprint().to_local(frame);
    let (min, max) = (rect.min, rect.max());

    for x in min.x + 1..max.x {
        tiles.set(x, min.y, LOT_EDGE_MIN_Y);
        for y in min.y + 1..max.y {
            tiles.set(x, y, LOT_INTERIOR);
        }
        tiles.set(x, max.y, LOT_EDGE_MAX_Y);
    }
    for y in min.y + 1..max.y {
        tiles.set(min.x, y, LOT_EDGE_MIN_X);
        tiles.set(max.x, y, LOT_EDGE_MAX_X);
    }
    tiles.set(min.x, min.y, LOT_CORNER_MIN_X_MIN_Y);
    tiles.set(max.x, min.y, LOT_CORNER_MAX_X_MIN_Y);
    tiles.set(min.x, max.y, LOT_CORNER_MIN_X_MAX_Y);
    tiles.set(max.x, max.y, LOT_CORNER_MAX_X_MAX_Y);

    // Frontage marker over the edge the lot faces.
    match lot.direction() {
        Direction::N => paint_row(tiles, min.x, max.x, max.y, FRONTAGE_N),
        Direction::S => paint_row(tiles, min.x, max.x, min.y, FRONTAGE_S),
        Direction::W => paint_column(tiles, max.x, min.y, max.y, FRONTAGE_W),
        Direction::E => paint_column(tiles, min.x, min.y, max.y, FRONTAGE_E),
    }
}

fn paint_row(tiles: &mut TileBuffer, min_x: i32, max_x: i32, y: i32, [first, middle, last]: Frontage) {
    tiles.set(min_x, y, first);
    for x in min_x + 1..max_x {
        tiles.set(x, y, middle);
    }
    tiles.set(max_x, y, last);
}

fn paint_column(tiles: &mut TileBuffer, x: i32, min_y: i32, max_y: i32, [first, middle, last]: Frontage) {
    tiles.set(x, min_y, first);
    for y in min_y + 1..max_y {
        tiles.set(x, y, middle);
    }
    tiles.set(x, max_y, last);
}

/// Border lanes along both sides of the road, asphalt between them.
pub fn paint_road(road: &Road, frame: ChunkCoord, tiles: &mut TileBuffer) {
    let rect = road.footprint().to_local(frame);
    let (min, max) = (rect.min, rect.max());

    if road.is_vertical() {
        for y in min.y..=max.y {
            tiles.set(min.x, y, ROAD_EDGE_MIN_X);
            for x in min.x + 1..max.x {
                tiles.set(x, y, ROAD_SURFACE);
            }
            tiles.set(max.x, y, ROAD_EDGE_MAX_X);
        }
    } else {
        for x in min.x..=max.x {
            tiles.set(x, min.y, ROAD_EDGE_MIN_Y);
            for y in min.y + 1..max.y {
                tiles.set(x, y, ROAD_SURFACE);
            }
            tiles.set(x, max.y, ROAD_EDGE_MAX_Y);
        }
    }
}

/// Paint a road node, autotiled from its connection flags.
///
/// Fails with [`WorldError::InvalidGeometry`] for a node without
/// connections.
pub fn paint_road_node(
    node: &RoadNode,
    frame: ChunkCoord,
    settings: &TileSettings,
    tiles: &mut TileBuffer,
) -> Result<()> {
    let rect = node.footprint().to_local(frame);

    if settings.road_nodes_as_markers {
        for pos in rect.tiles() {
            tiles.set(pos.x, pos.y, NODE_MARKER);
        }
        return Ok(());
    }

    match node.connection_count() {
        0 => Err(WorldError::InvalidGeometry(format!(
            "road node at {} has no connections",
            node.position
        ))),
        1 => {
            paint_dead_end(node, frame, tiles);
            Ok(())
        }
        _ => {
            paint_intersection(node, frame, tiles);
            Ok(())
        }
    }
}

fn paint_intersection(node: &RoadNode, frame: ChunkCoord, tiles: &mut TileBuffer) {
    let rect = node.footprint().to_local(frame);
    let (min, max) = (rect.min, rect.max());

    // Open edges continue the asphalt, closed ones get the border lane.
    for pos in rect.tiles() {
        let tile = if pos.y == min.y && !node.has_s {
            ROAD_EDGE_MIN_Y
        } else if pos.y == max.y && !node.has_n {
            ROAD_EDGE_MAX_Y
        } else if pos.x == min.x && !node.has_e {
            ROAD_EDGE_MIN_X
        } else if pos.x == max.x && !node.has_w {
            ROAD_EDGE_MAX_X
        } else {
            ROAD_SURFACE
        };
        tiles.set(pos.x, pos.y, tile);
    }

    tiles.set(min.x, min.y, CORNER_MIN_X_MIN_Y.lookup(node.has_s, node.has_e));
    tiles.set(min.x, max.y, CORNER_MIN_X_MAX_Y.lookup(node.has_n, node.has_e));
    tiles.set(max.x, min.y, CORNER_MAX_X_MIN_Y.lookup(node.has_s, node.has_w));
    tiles.set(max.x, max.y, CORNER_MAX_X_MAX_Y.lookup(node.has_n, node.has_w));
}

/// Cap the far edge of a dead end. A footprint wider than tall ends a
/// vertical road, anything else a horizontal one.
fn paint_dead_end(node: &RoadNode, frame: ChunkCoord, tiles: &mut TileBuffer) {
    let rect = node.footprint().to_local(frame);
    let (min, max) = (rect.min, rect.max());

    if node.size.width > node.size.height {
        let cap = if node.has_n {
            [ROAD_CORNER_MIN_X_MIN_Y, ROAD_EDGE_MIN_Y, ROAD_CORNER_MAX_X_MIN_Y]
        } else {
            [ROAD_CORNER_MIN_X_MAX_Y, ROAD_EDGE_MAX_Y, ROAD_CORNER_MAX_X_MAX_Y]
        };
        paint_row(tiles, min.x, max.x, max.y, cap);
    } else {
        let cap = if node.has_w {
            [ROAD_CORNER_MIN_X_MIN_Y, ROAD_EDGE_MIN_X, ROAD_CORNER_MIN_X_MAX_Y]
        } else {
            [ROAD_CORNER_MAX_X_MIN_Y, ROAD_EDGE_MAX_X, ROAD_CORNER_MAX_X_MAX_Y]
        };
        paint_column(tiles, max.x, min.y, max.y, cap);
    }
}
