//! Road network topology for a single chunk.
//!
//! Nodes are derived from the road segments: every segment end gets a cap
//! node, every pair of crossing segments gets a junction node, and nodes that
//! touch are merged. Each node records in which of the four directions a road
//! leaves its footprint; tile synthesis uses those flags to pick corner tiles.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, WorldError};
use crate::position::{Extent, TilePos, TileRect};
use crate::road::Road;

/// An intersection or dead end of the road network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoadNode {
    pub position: TilePos,
    pub size: Extent,
    pub has_n: bool,
    pub has_s: bool,
    pub has_e: bool,
    pub has_w: bool,
}

impl RoadNode {
    /// A node with no connections yet.
    pub fn new(position: TilePos, size: Extent) -> Self {
        Self {
            position,
            size,
            has_n: false,
            has_s: false,
            has_e: false,
            has_w: false,
        }
    }

    pub fn with_connections(mut self, n: bool, s: bool, e: bool, w: bool) -> Self {
        self.has_n = n;
        self.has_s = s;
        self.has_e = e;
        self.has_w = w;
        self
    }

    pub fn footprint(&self) -> TileRect {
        TileRect::new(self.position, self.size)
    }

    /// Number of directions a road leaves this node in.
    pub fn connection_count(&self) -> usize {
        [self.has_n, self.has_s, self.has_e, self.has_w]
            .iter()
            .filter(|&&flag| flag)
            .count()
    }

    /// Two or more connections make an intersection; one is a dead end.
    pub fn is_intersection(&self) -> bool {
        self.connection_count() >= 2
    }
}

/// Road segments of a chunk and the nodes derived from them.
///
/// Serializes as its segment list; nodes are re-derived when reading one back.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Road>", into = "Vec<Road>")]
pub struct RoadGraph {
    roads: Vec<Road>,
    nodes: Vec<RoadNode>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a segment and re-derive the nodes.
    ///
    /// Rejects the segment, leaving the graph untouched, if it would create a
    /// node that no road leaves.
    pub fn add_road(&mut self, road: Road) -> Result<()> {
        let mut roads = self.roads.clone();
        roads.push(road);
        let nodes = derive_nodes(&roads);

        if let Some(node) = nodes.iter().find(|n| n.connection_count() == 0) {
            warn!(position = %node.position, "road creates a node without connections");
            return Err(WorldError::geometry(format!(
                "road at {} leaves node at {} ({}x{}) without connections",
                road.position(),
                node.position,
                node.size.width,
                node.size.height
            )));
        }

        self.roads = roads;
        self.nodes = nodes;
        Ok(())
    }

    /// Segments in insertion order.
    pub fn roads(&self) -> &[Road] {
        &self.roads
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> &[RoadNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.roads.is_empty()
    }

    /// Check that the derived nodes are consistent with the segments.
    pub fn validate(&self) -> Result<()> {
        for (i, node) in self.nodes.iter().enumerate() {
            let footprint = node.footprint();
            if node.connection_count() == 0 {
                return Err(WorldError::geometry(format!(
                    "node at {} has no connections",
                    node.position
                )));
            }
            if !self.roads.iter().any(|r| r.footprint().overlaps(&footprint)) {
                return Err(WorldError::geometry(format!(
                    "node at {} is not on any road",
                    node.position
                )));
            }
            if let Some(other) = self.nodes[i + 1..]
                .iter()
                .find(|other| other.footprint().overlaps(&footprint))
            {
                return Err(WorldError::geometry(format!(
                    "nodes at {} and {} overlap",
                    node.position, other.position
                )));
            }
        }
        Ok(())
    }
}

impl TryFrom<Vec<Road>> for RoadGraph {
    type Error = WorldError;

    fn try_from(roads: Vec<Road>) -> Result<Self> {
        let mut graph = RoadGraph::new();
        for road in roads {
            graph.add_road(road)?;
        }
        Ok(graph)
    }
}

impl From<RoadGraph> for Vec<Road> {
    fn from(graph: RoadGraph) -> Self {
        graph.roads
    }
}

fn derive_nodes(roads: &[Road]) -> Vec<RoadNode> {
    let mut footprints: Vec<TileRect> = Vec::new();

    for (i, road) in roads.iter().enumerate() {
        for earlier in &roads[..i] {
            if let Some(junction) = crossing(earlier, road) {
                insert_footprint(&mut footprints, junction);
            }
        }
        insert_footprint(&mut footprints, road.start_cap());
        insert_footprint(&mut footprints, road.end_cap());
    }

    footprints
        .into_iter()
        .map(|footprint| connect(footprint, roads))
        .collect()
}

/// Junction of a vertical and a horizontal segment: the vertical road's
/// columns across the horizontal road's rows.
fn crossing(a: &Road, b: &Road) -> Option<TileRect> {
    if a.is_vertical() == b.is_vertical() || !a.footprint().overlaps(&b.footprint()) {
        return None;
    }
    let (vertical, horizontal) = if a.is_vertical() { (a, b) } else { (b, a) };
    let (v, h) = (vertical.footprint(), horizontal.footprint());
    Some(TileRect::new(
        TilePos::new(v.min.x, h.min.y),
        Extent::new(v.size.width, h.size.height),
    ))
}

fn insert_footprint(footprints: &mut Vec<TileRect>, candidate: TileRect) {
    match footprints.iter().position(|f| f.overlaps(&candidate)) {
        Some(index) => {
            footprints[index] = footprints[index].union(&candidate);
            coalesce(footprints, index);
        }
        None => footprints.push(candidate),
    }
}

/// Merge everything overlapping `footprints[index]` into the earliest node.
fn coalesce(footprints: &mut Vec<TileRect>, mut index: usize) {
    while let Some(other) =
        (0..footprints.len()).find(|&j| j != index && footprints[j].overlaps(&footprints[index]))
    {
        let (keep, drop) = if other < index { (other, index) } else { (index, other) };
        let merged = footprints[keep].union(&footprints[drop]);
        footprints.remove(drop);
        footprints[keep] = merged;
        index = keep;
    }
}

fn connect(footprint: TileRect, roads: &[Road]) -> RoadNode {
    let mut node = RoadNode::new(footprint.min, footprint.size);
    let max = footprint.max();

    for road in roads.iter().filter(|r| r.footprint().overlaps(&footprint)) {
        let rect = road.footprint();
        if road.is_vertical() {
            node.has_n |= rect.max().y > max.y;
            node.has_s |= rect.min.y < footprint.min.y;
        } else {
            node.has_w |= rect.max().x > max.x;
            node.has_e |= rect.min.x < footprint.min.x;
        }
    }

    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::Direction;
    use crate::road::RoadType;

    fn road(x: i32, y: i32, direction: Direction, length: u32, road_type: RoadType) -> Road {
        Road::new(TilePos::new(x, y), direction, length, road_type).unwrap()
    }

    #[test]
    fn test_single_road_has_two_dead_ends() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(2, 0, Direction::N, 10, RoadType::STREET)).unwrap();

        let nodes = graph.nodes();
        assert_eq!(nodes.len(), 2);

        assert_eq!(nodes[0].footprint(), TileRect::new(TilePos::new(2, 0), Extent::new(3, 1)));
        assert!(nodes[0].has_n && !nodes[0].has_s && !nodes[0].has_e && !nodes[0].has_w);
        assert!(!nodes[0].is_intersection());

        assert_eq!(nodes[1].position, TilePos::new(2, 9));
        assert!(nodes[1].has_s && !nodes[1].has_n);
        assert_eq!(nodes[1].connection_count(), 1);
    }

    #[test]
    fn test_horizontal_road_flags() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(0, 4, Direction::W, 6, RoadType::ALLEY)).unwrap();

        let nodes = graph.nodes();
        assert_eq!(nodes[0].size, Extent::new(1, 2));
        assert!(nodes[0].has_w && !nodes[0].has_e);
        assert!(nodes[1].has_e && !nodes[1].has_w);
    }

    #[test]
    fn test_turn_merges_into_one_intersection() {
        let mut graph = RoadGraph::new();
        // Vertical road ending at y = 9, horizontal road leaving its top end.
        graph.add_road(road(0, 0, Direction::N, 10, RoadType::STREET)).unwrap();
        graph.add_road(road(0, 9, Direction::W, 8, RoadType::STREET)).unwrap();

        let corner: Vec<_> = graph
            .nodes()
            .iter()
            .filter(|n| n.footprint().contains(TilePos::new(0, 9)))
            .collect();
        assert_eq!(corner.len(), 1);

        let corner = corner[0];
        assert_eq!(corner.footprint(), TileRect::new(TilePos::new(0, 9), Extent::square(3)));
        assert!(corner.has_s && corner.has_w);
        assert!(!corner.has_n && !corner.has_e);
        assert!(corner.is_intersection());

        // Start of the vertical road and far end of the horizontal one.
        assert_eq!(graph.nodes().len(), 3);
        graph.validate().unwrap();
    }

    #[test]
    fn test_crossing_roads() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(6, 0, Direction::N, 16, RoadType::STREET)).unwrap();
        graph.add_road(road(0, 6, Direction::W, 16, RoadType::STREET)).unwrap();

        let junction = graph
            .nodes()
            .iter()
            .find(|n| n.footprint().contains(TilePos::new(7, 7)))
            .unwrap();
        assert_eq!(junction.footprint(), TileRect::new(TilePos::new(6, 6), Extent::square(3)));
        assert_eq!(junction.connection_count(), 4);
        assert_eq!(graph.nodes().len(), 5);
        graph.validate().unwrap();
    }

    #[test]
    fn test_t_junction() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(0, 5, Direction::W, 16, RoadType::STREET)).unwrap();
        graph.add_road(road(8, 7, Direction::N, 9, RoadType::STREET)).unwrap();

        let junction = graph
            .nodes()
            .iter()
            .find(|n| n.footprint().contains(TilePos::new(9, 6)))
            .unwrap();
        assert!(junction.has_n && junction.has_e && junction.has_w);
        assert!(!junction.has_s);
    }

    #[test]
    fn test_collinear_roads_share_a_node() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(0, 0, Direction::N, 5, RoadType::STREET)).unwrap();
        graph.add_road(road(0, 4, Direction::N, 6, RoadType::STREET)).unwrap();

        let middle = graph
            .nodes()
            .iter()
            .find(|n| n.position == TilePos::new(0, 4))
            .unwrap();
        assert!(middle.has_n && middle.has_s);
        assert_eq!(graph.nodes().len(), 3);
    }

    #[test]
    fn test_node_order_follows_creation() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(0, 0, Direction::W, 4, RoadType::ALLEY)).unwrap();
        graph.add_road(road(0, 8, Direction::W, 4, RoadType::ALLEY)).unwrap();

        let positions: Vec<_> = graph.nodes().iter().map(|n| n.position).collect();
        assert_eq!(
            positions,
            vec![
                TilePos::new(0, 0),
                TilePos::new(3, 0),
                TilePos::new(0, 8),
                TilePos::new(3, 8)
            ]
        );
    }

    #[test]
    fn test_degenerate_node_is_rejected() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(0, 0, Direction::N, 2, RoadType::STREET)).unwrap();
        let before = graph.clone();

        // Covers the whole vertical road; their junction has nowhere to go.
        let result = graph.add_road(road(0, 0, Direction::W, 3, RoadType::ALLEY));
        assert!(matches!(result, Err(WorldError::InvalidGeometry(_))));
        assert_eq!(graph, before);
    }

    #[test]
    fn test_deserialize_rederives_nodes() {
        let mut graph = RoadGraph::new();
        graph.add_road(road(6, 0, Direction::N, 16, RoadType::STREET)).unwrap();
        graph.add_road(road(0, 6, Direction::W, 16, RoadType::STREET)).unwrap();

        let json = serde_json::to_string(&graph).unwrap();
        assert!(!json.contains("has_n"));
        let restored: RoadGraph = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, graph);

        let roads = vec![
            road(0, 0, Direction::N, 2, RoadType::STREET),
            road(0, 0, Direction::W, 3, RoadType::ALLEY),
        ];
        let json = serde_json::to_string(&roads).unwrap();
        assert!(serde_json::from_str::<RoadGraph>(&json).is_err());
    }

    #[test]
    fn test_intersection_classification() {
        let node = RoadNode::new(TilePos::new(0, 0), Extent::square(3));
        assert_eq!(node.connection_count(), 0);
        assert!(!node.is_intersection());

        let node = node.with_connections(true, false, true, false);
        assert_eq!(node.connection_count(), 2);
        assert!(node.is_intersection());

        let node = node.with_connections(false, false, false, true);
        assert!(!node.is_intersection());
    }
}
