mod config;

use citygrid_core::{Building, ChunkCoord, City, Direction, Extent, Lot, Map, Road, RoadType, TilePos};
use citygrid_tiles::atlas::{ATLAS_SIDE, EMPTY, NODE_MARKER, ROAD_SURFACE};
use citygrid_tiles::{flatten, refresh_instances, TileBuffer, TileCache, TileSettings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::DemoConfig;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DemoConfig::from_env()?;
    tracing::info!(?config, "building sample world");

    let mut map = build_world(&config)?;
    map.validate()?;

    let settings = TileSettings {
        road_nodes_as_markers: config.node_markers,
    };
    let mut cache = TileCache::new();
    let refreshed = cache.refresh(&mut map, &settings)?;
    tracing::info!(chunks = refreshed.len(), "synthesized tiles");

    for coord in &refreshed {
        if let Some(tiles) = cache.tiles(*coord) {
            println!("=== Chunk {} ===", coord);
            println!("{}", preview(tiles));
        }
    }

    if let Some(instances) = refresh_instances(&mut map) {
        println!(
            "{}: {} buildings, {} instances ({} floats)",
            map.city().name,
            map.building_count(),
            instances.len(),
            flatten(&instances).len()
        );
    }

    Ok(())
}

/// A grid of chunks, each with a crossing of two streets, four lots and a
/// lot that reaches into the next chunk.
fn build_world(config: &DemoConfig) -> anyhow::Result<Map> {
    let mut map = Map::with_city(City::new(config.city.clone()));

    for cx in 0..config.chunks {
        for cy in 0..config.chunks {
            let coord = ChunkCoord::new(cx, cy);
            map.create_chunk(coord)?;
            let origin = coord.origin();
            let at = |x: i32, y: i32| origin.offset(x, y);

            let lots = [
                Lot::new(at(0, 0), Extent::new(5, 5), Direction::N)?,
                Lot::new(at(10, 0), Extent::new(5, 5), Direction::E)?,
                Lot::new(at(0, 10), Extent::new(5, 5), Direction::S)?,
                Lot::new(at(13, 10), Extent::new(6, 4), Direction::W)?,
            ];
            let roads = [
                Road::new(at(6, 0), Direction::N, 16, RoadType::STREET)?,
                Road::new(at(0, 6), Direction::W, 16, RoadType::STREET)?,
            ];

            let chunk = map.chunk_mut(coord)?;
            for lot in lots {
                chunk.add_lot(lot)?;
            }
            for road in roads {
                chunk.add_road(road)?;
            }

            for lot in lots {
                let TilePos { x, y } = lot.position().offset(1, 1);
                map.add_building(Building::new(x, y, 2, 2, 1 + (cx + cy) as u32));
            }
        }
    }

    Ok(map)
}

/// ASCII view of a chunk with `y` growing upwards.
fn preview(tiles: &TileBuffer) -> String {
    let rows: Vec<String> = tiles
        .rows()
        .rev()
        .map(|row| row.iter().map(|&tile| glyph(tile)).collect())
        .collect();
    rows.join("\n")
}

fn glyph(tile: u32) -> char {
    if tile == EMPTY {
        return '.';
    }
    if tile == ROAD_SURFACE {
        return '=';
    }
    if tile == NODE_MARKER {
        return '+';
    }

    let col = (tile - 1) % ATLAS_SIDE;
    let row = (tile - 1) / ATLAS_SIDE;
    match (col, row) {
        (0..=4, _) => '#',
        (5..=7, 0..=1) | (8..=9, _) => 'F',
        (6, 3) => ':',
        _ => 'L',
    }
}
