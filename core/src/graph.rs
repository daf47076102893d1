use std::collections::HashMap;
use std::fmt;

use crate::error::{Error, Result};

/// Node identifier as it appears in the dataset.
pub type NodeId = u64;

/// Mutable loading phase of a graph.
///
/// Collects undirected edges in any order, with duplicates. `build()` freezes
/// the collected adjacency into an immutable [`GraphStore`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    adjacency: HashMap<NodeId, Vec<NodeId>>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-allocate for a known node count.
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            adjacency: HashMap::with_capacity(node_count),
        }
    }

    /// Add the undirected edge `{a, b}`.
    ///
    /// Self-loops are not stored and return `false`. Duplicate pairs are
    /// accepted here and collapse in `build()`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if a == b {
            return false;
        }
        self.adjacency.entry(a).or_default().push(b);
        self.adjacency.entry(b).or_default().push(a);
        true
    }

    /// Number of distinct nodes referenced so far.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Freeze into CSR form: nodes ascending, each neighbor list sorted and deduplicated.
    pub fn build(self) -> GraphStore {
        let mut entries: Vec<(NodeId, Vec<NodeId>)> = self.adjacency.into_iter().collect();
        entries.sort_unstable_by_key(|(id, _)| *id);

        let index: HashMap<NodeId, usize> = entries
            .iter()
            .enumerate()
            .map(|(slot, (id, _))| (*id, slot))
            .collect();

        let raw_len: usize = entries.iter().map(|(_, n)| n.len()).sum();
        let mut nodes = Vec::with_capacity(entries.len());
        let mut offsets = Vec::with_capacity(entries.len() + 1);
        let mut targets = Vec::with_capacity(raw_len);

        offsets.push(0);
        for (id, neighbors) in entries {
            // slots follow id order, so sorted slots are sorted ids
            let mut slots: Vec<usize> = neighbors.iter().map(|n| index[n]).collect();
            slots.sort_unstable();
            slots.dedup();
            nodes.push(id);
            targets.extend_from_slice(&slots);
            offsets.push(targets.len());
        }
        targets.shrink_to_fit();

        GraphStore {
            nodes,
            offsets,
            targets,
            index,
        }
    }
}

/// Immutable undirected graph in compressed sparse row layout.
///
/// `targets[offsets[s]..offsets[s + 1]]` holds the slots of the neighbors of
/// `nodes[s]`, ascending. Every pair is stored once in each direction.
#[derive(Default)]
pub struct GraphStore {
    nodes: Vec<NodeId>,
    offsets: Vec<usize>,
    targets: Vec<usize>,
    index: HashMap<NodeId, usize>,
}

impl fmt::Debug for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphStore")
            .field("node_count", &self.node_count())
            .field("edge_count", &self.edge_count())
            .finish()
    }
}

impl GraphStore {
    /// A graph with no nodes.
    pub fn empty() -> Self {
        Self {
            offsets: vec![0],
            ..Self::default()
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct unordered pairs.
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    pub fn has_node(&self, node: NodeId) -> bool {
        self.index.contains_key(&node)
    }

    /// Neighbors of `node` in ascending order.
    pub fn neighbors(&self, node: NodeId) -> Result<impl ExactSizeIterator<Item = NodeId> + '_> {
        let slot = self.slot(node).ok_or(Error::UnknownNode { node })?;
        Ok(self.neighbors_at(slot).iter().map(|&s| self.nodes[s]))
    }

    pub fn degree(&self, node: NodeId) -> Result<usize> {
        let slot = self.slot(node).ok_or(Error::UnknownNode { node })?;
        Ok(self.degree_at(slot))
    }

    /// All node identifiers, ascending.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Approximate heap usage in bytes.
    pub fn memory_usage(&self) -> usize {
        use std::mem::size_of;

        let nodes_mem = self.nodes.capacity() * size_of::<NodeId>();
        let offsets_mem = self.offsets.capacity() * size_of::<usize>();
        let targets_mem = self.targets.capacity() * size_of::<usize>();
        // hashbrown stores key, value and one control byte per bucket
        let index_mem = self.index.capacity() * (size_of::<NodeId>() + size_of::<usize>() + 1);

        nodes_mem + offsets_mem + targets_mem + index_mem
    }

    pub(crate) fn slot(&self, node: NodeId) -> Option<usize> {
        self.index.get(&node).copied()
    }

    pub(crate) fn node_at(&self, slot: usize) -> NodeId {
        self.nodes[slot]
    }

    /// Neighbor slots of the node at `slot`, ascending.
    pub(crate) fn neighbors_at(&self, slot: usize) -> &[usize] {
        &self.targets[self.offsets[slot]..self.offsets[slot + 1]]
    }

    pub(crate) fn degree_at(&self, slot: usize) -> usize {
        self.offsets[slot + 1] - self.offsets[slot]
    }
}
