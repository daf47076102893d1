use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{GraphStore, NodeId};

/// A traversal-tree edge: `(parent, discovered)`.
pub type TreeEdge = (NodeId, NodeId);

/// Result of a bounded BFS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalResult {
    /// One edge per discovered node, in discovery order.
    pub edges: Vec<TreeEdge>,
    /// Discovered nodes plus the start node.
    pub nodes_visited: usize,
    /// Hop distance of the farthest discovered node.
    pub depth_reached: u64,
}

/// Validate that a depth parameter is non-negative.
pub fn check_non_negative(value: i64, name: &'static str) -> Result<u64> {
    u64::try_from(value).map_err(|_| Error::InvalidArgument { name, value })
}

/// Traversal-tree edges of a BFS from `start`, at most `max_depth` hops deep.
///
/// See [`traverse_tree`].
pub fn bounded_bfs(graph: &GraphStore, start: NodeId, max_depth: i64) -> Result<Vec<TreeEdge>> {
    traverse_tree(graph, start, max_depth).map(|r| r.edges)
}

/// Level-synchronous BFS from `start`, expanding at most `max_depth` levels.
///
/// Neighbors are visited in ascending id order, so the output is identical
/// across runs. Only the edge that first discovers a node is emitted; edges
/// between already-visited nodes never appear. `max_depth == 0` yields no edges.
pub fn traverse_tree(graph: &GraphStore, start: NodeId, max_depth: i64) -> Result<TraversalResult> {
    let max_depth = check_non_negative(max_depth, "depth")?;
    let start_slot = graph.slot(start).ok_or(Error::UnknownNode { node: start })?;

    let mut visited = vec![false; graph.node_count()];
    visited[start_slot] = true;

    let mut frontier = vec![start_slot];
    let mut edges: Vec<TreeEdge> = Vec::new();
    let mut level = 0u64;

    while !frontier.is_empty() && level < max_depth {
        let mut next_frontier = Vec::new();

        for &slot in &frontier {
            let parent = graph.node_at(slot);
            for &n in graph.neighbors_at(slot) {
                if !visited[n] {
                    visited[n] = true;
                    next_frontier.push(n);
                    edges.push((parent, graph.node_at(n)));
                }
            }
        }

        if next_frontier.is_empty() {
            break;
        }
        level += 1;
        frontier = next_frontier;
    }

    Ok(TraversalResult {
        nodes_visited: edges.len() + 1,
        depth_reached: level,
        edges,
    })
}
