use serde::Serialize;

use crate::error::{Error, Result};
use crate::graph::{GraphStore, NodeId};

/// Degree information for a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegreeResult {
    pub node_id: NodeId,
    pub degree: usize,
}

/// The node of maximum degree, smallest identifier on ties.
///
/// This is a structural-importance proxy, not an articulation point: removing
/// the returned node does not necessarily disconnect the graph.
pub fn critical_node(graph: &GraphStore) -> Result<NodeId> {
    let mut best: Option<(usize, usize)> = None;

    // Slots are in ascending id order, so strict `>` keeps the smallest id on ties.
    for slot in 0..graph.node_count() {
        let degree = graph.degree_at(slot);
        if best.map_or(true, |(_, d)| degree > d) {
            best = Some((slot, degree));
        }
    }

    best.map(|(slot, _)| graph.node_at(slot))
        .ok_or(Error::EmptyGraph)
}

/// Nodes ranked by degree descending, then id ascending. `top_n == 0` returns all.
pub fn degree_ranking(graph: &GraphStore, top_n: usize) -> Vec<DegreeResult> {
    let mut results: Vec<DegreeResult> = (0..graph.node_count())
        .map(|slot| DegreeResult {
            node_id: graph.node_at(slot),
            degree: graph.degree_at(slot),
        })
        .collect();

    results.sort_by(|a, b| b.degree.cmp(&a.degree).then(a.node_id.cmp(&b.node_id)));

    if top_n > 0 && top_n < results.len() {
        results.truncate(top_n);
    }

    results
}
