//! Per-chunk tile synthesis.

use citygrid_core::{Chunk, ChunkCoord, Map, Result};
use tracing::trace;

use crate::buffer::TileBuffer;
use crate::paint::paint_chunk;
use crate::settings::TileSettings;

/// Chunks whose geometry can reach into the chunk at `P`, in paint order:
/// `P - (1, 1)`, `P - (1, 0)`, `P - (0, 1)`.
pub const UPSTREAM: [(i32, i32); 3] = [(-1, -1), (-1, 0), (0, -1)];

/// Synthesize the tile buffer of the chunk at `coord`.
///
/// Missing neighbors are skipped; a missing chunk at `coord` is
/// [`WorldError::ChunkNotFound`](citygrid_core::WorldError::ChunkNotFound).
pub fn synthesize_tiles(map: &Map, coord: ChunkCoord, settings: &TileSettings) -> Result<TileBuffer> {
    let chunk = map.get_chunk(coord)?;

    let mut neighbors = Vec::with_capacity(UPSTREAM.len());
    for (dx, dy) in UPSTREAM {
        let Some(neighbor) = coord.offset(dx, dy) else {
            continue;
        };
        if map.chunk_exists(neighbor) {
            neighbors.push(map.get_chunk(neighbor)?);
        }
    }

    synthesize_chunk(chunk, &neighbors, settings)
}

/// Paint `neighbors` in order, then `chunk` on top, all in the frame of
/// `chunk`.
pub fn synthesize_chunk(chunk: &Chunk, neighbors: &[&Chunk], settings: &TileSettings) -> Result<TileBuffer> {
    let frame = chunk.position();
    let mut tiles = TileBuffer::new();

    for neighbor in neighbors {
        paint_chunk(neighbor, frame, settings, &mut tiles)?;
    }
    paint_chunk(chunk, frame, settings, &mut tiles)?;

    trace!(
        chunk = %frame,
        neighbors = neighbors.len(),
        painted = tiles.painted_count(),
        "synthesized chunk tiles"
    );
    Ok(tiles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atlas::{
        tile, EMPTY, FRONTAGE_E, FRONTAGE_N, FRONTAGE_W, LOT_CORNER_MAX_X_MAX_Y, LOT_CORNER_MAX_X_MIN_Y,
        LOT_EDGE_MAX_Y, LOT_EDGE_MIN_X, LOT_INTERIOR, NODE_MARKER, ROAD_CORNER_MAX_X_MAX_Y,
        ROAD_CORNER_MIN_X_MIN_Y, ROAD_EDGE_MAX_X, ROAD_EDGE_MIN_X, ROAD_INNER_MAX_X_MAX_Y,
        ROAD_INNER_MAX_X_MIN_Y, ROAD_INNER_MIN_X_MAX_Y, ROAD_INNER_MIN_X_MIN_Y, ROAD_SURFACE,
    };
    use citygrid_core::{Direction, Extent, Lot, Road, RoadType, TilePos, WorldError, SIDE_LENGTH};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn lot(x: i32, y: i32, w: u32, h: u32, direction: Direction) -> Lot {
        Lot::new(TilePos::new(x, y), Extent::new(w, h), direction).unwrap()
    }

    fn road(x: i32, y: i32, direction: Direction, length: u32, road_type: RoadType) -> Road {
        Road::new(TilePos::new(x, y), direction, length, road_type).unwrap()
    }

    #[test]
    fn test_missing_chunk() {
        let map = Map::new();
        let coord = ChunkCoord::new(4, 4);
        assert_eq!(
            synthesize_tiles(&map, coord, &TileSettings::default()),
            Err(WorldError::ChunkNotFound(coord))
        );
    }

    #[test]
    fn test_empty_chunk_is_bare_ground() {
        let mut map = Map::new();
        map.create_chunk(ChunkCoord::new(0, 0)).unwrap();
        let tiles = synthesize_tiles(&map, ChunkCoord::new(0, 0), &TileSettings::default()).unwrap();
        assert_eq!(tiles.painted_count(), 0);
    }

    #[test]
    fn test_single_lot_ring() {
        let mut map = Map::new();
        let origin = ChunkCoord::new(0, 0);
        map.create_chunk(origin).unwrap();
        map.chunk_mut(origin)
            .unwrap()
            .add_lot(lot(2, 3, 4, 3, Direction::E))
            .unwrap();

        let tiles = synthesize_tiles(&map, origin, &TileSettings::default()).unwrap();

        assert_eq!(tiles.painted_count(), 12);
        assert_eq!(tiles.get(2, 3), Some(FRONTAGE_E[0]));
        assert_eq!(tiles.get(2, 4), Some(FRONTAGE_E[1]));
        assert_eq!(tiles.get(2, 5), Some(FRONTAGE_E[2]));
        assert_eq!(tiles.get(5, 3), Some(LOT_CORNER_MAX_X_MIN_Y));
        assert_eq!(tiles.get(5, 5), Some(LOT_CORNER_MAX_X_MAX_Y));
        assert_eq!(tiles.get(3, 4), Some(LOT_INTERIOR));
        assert_eq!(tiles.get(4, 4), Some(LOT_INTERIOR));
        assert_eq!(tiles.get(6, 4), Some(EMPTY));
    }

    #[test]
    fn test_short_horizontal_road() {
        let mut map = Map::new();
        let origin = ChunkCoord::new(0, 0);
        map.create_chunk(origin).unwrap();
        map.chunk_mut(origin)
            .unwrap()
            .add_road(road(2, 2, Direction::W, 5, RoadType::ALLEY))
            .unwrap();

        let tiles = synthesize_tiles(&map, origin, &TileSettings::default()).unwrap();

        assert_eq!(tiles.painted_count(), 10);
        assert_eq!(tiles.get(2, 2), Some(tile(0, 0)));
        assert_eq!(tiles.get(6, 2), Some(tile(2, 0)));
        assert_eq!(tiles.get(2, 3), Some(tile(0, 2)));
        assert_eq!(tiles.get(6, 3), Some(tile(2, 2)));
        for x in 3..6 {
            assert_eq!(tiles.get(x, 2), Some(tile(1, 0)));
            assert_eq!(tiles.get(x, 3), Some(tile(1, 2)));
        }
    }

    #[test]
    fn test_neighbor_lot_bleeds_across_border() {
        let mut map = Map::new();
        let left = ChunkCoord::new(0, 0);
        let right = ChunkCoord::new(1, 0);
        map.create_chunk(left).unwrap();
        map.create_chunk(right).unwrap();
        map.chunk_mut(left)
            .unwrap()
            .add_lot(lot(13, 2, 6, 4, Direction::N))
            .unwrap();

        let tiles = synthesize_tiles(&map, right, &TileSettings::default()).unwrap();

        assert_eq!(tiles.get(2, 5), Some(tile(7, 1)));
        assert_eq!(tiles.get(2, 2), Some(tile(7, 2)));
        assert_eq!(tiles.get(0, 3), Some(tile(6, 3)));
        assert_eq!(tiles.get(3, 3), Some(EMPTY));
        assert_eq!(tiles.painted_count(), 12);
    }

    #[test]
    fn test_upstream_neighbors_paint_in_order() {
        let mut map = Map::new();
        let center = ChunkCoord::new(1, 1);
        let diagonal = ChunkCoord::new(0, 0);
        let beside = ChunkCoord::new(0, 1);
        let below = ChunkCoord::new(1, 0);
        for coord in [center, diagonal, beside, below] {
            map.create_chunk(coord).unwrap();
        }
        map.chunk_mut(diagonal)
            .unwrap()
            .add_lot(lot(15, 15, 4, 4, Direction::N))
            .unwrap();
        map.chunk_mut(beside)
            .unwrap()
            .add_lot(lot(15, 16, 3, 3, Direction::S))
            .unwrap();
        map.chunk_mut(below)
            .unwrap()
            .add_lot(lot(16, 15, 3, 3, Direction::W))
            .unwrap();

        let tiles = synthesize_tiles(&map, center, &TileSettings::default()).unwrap();

        // All three lots cover (0, 0); the one from P - (0, 1) is painted last.
        assert_eq!(tiles.get(0, 0), Some(LOT_EDGE_MIN_X));
        // P - (1, 0) over P - (1, 1).
        assert_eq!(tiles.get(0, 2), Some(LOT_EDGE_MAX_Y));
        // P - (0, 1) over P - (1, 1).
        assert_eq!(tiles.get(2, 0), Some(FRONTAGE_W[1]));
        // P - (1, 1) alone.
        assert_eq!(tiles.get(2, 2), Some(FRONTAGE_N[2]));

        let neighbors = [
            map.get_chunk(below).unwrap(),
            map.get_chunk(beside).unwrap(),
            map.get_chunk(diagonal).unwrap(),
        ];
        let reversed =
            synthesize_chunk(map.get_chunk(center).unwrap(), &neighbors, &TileSettings::default()).unwrap();
        assert_ne!(reversed, tiles);
        assert_eq!(reversed.get(0, 0), Some(LOT_INTERIOR));
    }

    #[test]
    fn test_geometry_from_other_neighbors_is_ignored() {
        let mut map = Map::new();
        let center = ChunkCoord::new(0, 0);
        for coord in [center, ChunkCoord::new(1, 0), ChunkCoord::new(0, 1), ChunkCoord::new(-1, 1)] {
            map.create_chunk(coord).unwrap();
        }
        // Lots of chunks that are never read for the center.
        map.chunk_mut(ChunkCoord::new(1, 0))
            .unwrap()
            .add_lot(lot(16, 0, 4, 4, Direction::S))
            .unwrap();
        map.chunk_mut(ChunkCoord::new(0, 1))
            .unwrap()
            .add_lot(lot(0, 16, 4, 4, Direction::S))
            .unwrap();

        let tiles = synthesize_tiles(&map, center, &TileSettings::default()).unwrap();
        assert_eq!(tiles.painted_count(), 0);
    }

    #[test]
    fn test_own_geometry_paints_over_neighbors() {
        let mut map = Map::new();
        let left = ChunkCoord::new(0, 0);
        let right = ChunkCoord::new(1, 0);
        map.create_chunk(left).unwrap();
        map.create_chunk(right).unwrap();
        map.chunk_mut(left)
            .unwrap()
            .add_lot(lot(14, 0, 4, 4, Direction::N))
            .unwrap();
        map.chunk_mut(right)
            .unwrap()
            .add_road(road(16, 0, Direction::N, 8, RoadType::ALLEY))
            .unwrap();

        let tiles = synthesize_tiles(&map, right, &TileSettings::default()).unwrap();
        // The lot covers local x 0..=1, y 0..=3 before the road pass.
        assert_eq!(tiles.get(0, 2), Some(ROAD_EDGE_MIN_X));
        assert_eq!(tiles.get(1, 2), Some(ROAD_EDGE_MAX_X));
        assert_eq!(tiles.get(0, 0), Some(ROAD_CORNER_MIN_X_MIN_Y));
        assert_eq!(tiles.get(1, 3), Some(ROAD_EDGE_MAX_X));
    }

    #[test]
    fn test_crossing_roads() {
        let mut map = Map::new();
        let origin = ChunkCoord::new(0, 0);
        map.create_chunk(origin).unwrap();
        {
            let chunk = map.chunk_mut(origin).unwrap();
            chunk.add_road(road(6, 0, Direction::N, 16, RoadType::STREET)).unwrap();
            chunk.add_road(road(0, 6, Direction::W, 16, RoadType::STREET)).unwrap();
        }

        let tiles = synthesize_tiles(&map, origin, &TileSettings::default()).unwrap();

        // Crossing at x 6..=8, y 6..=8 is open on all four sides.
        assert_eq!(tiles.get(6, 6), Some(ROAD_INNER_MIN_X_MIN_Y));
        assert_eq!(tiles.get(8, 6), Some(ROAD_INNER_MAX_X_MIN_Y));
        assert_eq!(tiles.get(6, 8), Some(ROAD_INNER_MIN_X_MAX_Y));
        assert_eq!(tiles.get(8, 8), Some(ROAD_INNER_MAX_X_MAX_Y));
        assert_eq!(tiles.get(7, 7), Some(ROAD_SURFACE));
        assert_eq!(tiles.get(7, 6), Some(ROAD_SURFACE));

        // Both ends of the vertical road are capped.
        assert_eq!(tiles.get(6, 0), Some(ROAD_CORNER_MIN_X_MIN_Y));
        assert_eq!(tiles.get(8, 15), Some(ROAD_CORNER_MAX_X_MAX_Y));
        // And the horizontal one.
        assert_eq!(tiles.get(0, 6), Some(ROAD_CORNER_MIN_X_MIN_Y));
        assert_eq!(tiles.get(15, 8), Some(ROAD_CORNER_MAX_X_MAX_Y));
    }

    #[test]
    fn test_marker_mode_covers_nodes() {
        let mut map = Map::new();
        let origin = ChunkCoord::new(0, 0);
        map.create_chunk(origin).unwrap();
        map.chunk_mut(origin)
            .unwrap()
            .add_road(road(4, 4, Direction::N, 6, RoadType::STREET))
            .unwrap();

        let tiles = synthesize_tiles(&map, origin, &TileSettings::markers()).unwrap();
        for x in 4..7 {
            assert_eq!(tiles.get(x, 4), Some(NODE_MARKER));
            assert_eq!(tiles.get(x, 9), Some(NODE_MARKER));
        }
        assert_eq!(tiles.get(5, 6), Some(ROAD_SURFACE));
        assert_eq!(
            tiles.as_slice().iter().filter(|&&t| t == NODE_MARKER).count(),
            6
        );
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut map = Map::new();
        let coords: Vec<_> = (0..3)
            .flat_map(|x| (0..3).map(move |y| ChunkCoord::new(x, y)))
            .collect();
        for &coord in &coords {
            map.create_chunk(coord).unwrap();
        }

        for &coord in &coords {
            let origin = coord.origin();
            for _ in 0..4 {
                let direction = match rng.gen_range(0..4) {
                    0 => Direction::N,
                    1 => Direction::S,
                    2 => Direction::E,
                    _ => Direction::W,
                };
                let placed = lot(
                    origin.x + rng.gen_range(0..SIDE_LENGTH),
                    origin.y + rng.gen_range(0..SIDE_LENGTH),
                    rng.gen_range(1..8),
                    rng.gen_range(1..8),
                    direction,
                );
                map.chunk_mut(coord).unwrap().add_lot(placed).unwrap();
            }
            let segment = road(
                origin.x + rng.gen_range(0..SIDE_LENGTH),
                origin.y + rng.gen_range(0..SIDE_LENGTH),
                Direction::N,
                rng.gen_range(2..10),
                RoadType::STREET,
            );
            map.chunk_mut(coord).unwrap().add_road(segment).unwrap();
        }

        let settings = TileSettings::default();
        for &coord in &coords {
            let first = synthesize_tiles(&map, coord, &settings).unwrap();
            let second = synthesize_tiles(&map, coord, &settings).unwrap();
            assert_eq!(first, second);
            assert_eq!(first, synthesize_tiles(&map.clone(), coord, &settings).unwrap());
        }
    }
}
