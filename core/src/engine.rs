//! The engine facade: one replaceable graph slot plus the query operations.
//!
//! `load` parses and freezes a new graph without touching the slot, then
//! swaps it in under the write lock. Readers clone the `Arc` under the read
//! lock and run against an immutable graph, so queries never block each
//! other and a failed load never exposes a partial graph.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use std::time::{Instant, SystemTime};

use serde::Serialize;
use tracing::debug;

use crate::config::LoadConfig;
use crate::degree::{self, DegreeResult};
use crate::error::{Error, Result};
use crate::graph::{GraphStore, NodeId};
use crate::load::{DataLoader, LoadReport};
use crate::traversal::{self, TraversalResult, TreeEdge};

/// Aggregate statistics of the loaded graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub critical_node: NodeId,
}

/// Outcome of a successful `load`.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub load_time_ms: f64,
    pub generation: u64,
    pub report: LoadReport,
}

/// Snapshot of the engine slot. Never fails.
#[derive(Debug, Clone, Serialize)]
pub struct EngineStatus {
    /// `"loaded"` or `"not_loaded"`.
    pub status: &'static str,
    pub source: Option<PathBuf>,
    pub node_count: usize,
    pub edge_count: usize,
    pub memory_bytes: usize,
    pub load_time_ms: f64,
    /// Number of successful loads on this engine.
    pub generation: u64,
    #[serde(skip)]
    pub loaded_at: Option<SystemTime>,
}

/// A loaded graph and its metadata. Replaced wholesale on each load.
struct LoadedGraph {
    graph: GraphStore,
    source: PathBuf,
    load_time_ms: f64,
    loaded_at: SystemTime,
    generation: u64,
    stats: OnceLock<Option<GraphStats>>,
}

impl LoadedGraph {
    /// Computed on first use; `None` caches an empty graph.
    fn stats(&self) -> Result<GraphStats> {
        let cached = *self.stats.get_or_init(|| {
            degree::critical_node(&self.graph)
                .ok()
                .map(|critical_node| GraphStats {
                    node_count: self.graph.node_count(),
                    edge_count: self.graph.edge_count(),
                    critical_node,
                })
        });
        cached.ok_or(Error::EmptyGraph)
    }
}

/// Graph engine holding at most one loaded graph.
///
/// `Send + Sync`: share it behind an `Arc` to query from several threads.
pub struct GraphEngine {
    loader: DataLoader,
    slot: RwLock<Option<Arc<LoadedGraph>>>,
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphEngine {
    pub fn new() -> Self {
        Self {
            loader: DataLoader::default(),
            slot: RwLock::new(None),
        }
    }

    /// Engine with a custom load configuration. Fails if the config is invalid.
    pub fn with_config(config: LoadConfig) -> Result<Self> {
        Ok(Self {
            loader: DataLoader::new(config)?,
            slot: RwLock::new(None),
        })
    }

    /// Load the dataset at `path`, replacing the current graph on success.
    ///
    /// On error the previously loaded graph, if any, stays in place.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<LoadSummary> {
        let path = path.as_ref();
        let start = Instant::now();
        let (graph, report) = self.loader.build(path)?;
        let load_time_ms = start.elapsed().as_secs_f64() * 1000.0;

        let node_count = graph.node_count();
        let edge_count = graph.edge_count();

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        let generation = slot.as_ref().map_or(0, |g| g.generation) + 1;
        *slot = Some(Arc::new(LoadedGraph {
            graph,
            source: path.to_path_buf(),
            load_time_ms,
            loaded_at: SystemTime::now(),
            generation,
            stats: OnceLock::new(),
        }));
        drop(slot);

        debug!(generation, "neuronet: graph slot replaced");

        Ok(LoadSummary {
            node_count,
            edge_count,
            load_time_ms,
            generation,
            report,
        })
    }

    /// Node count, edge count and critical node of the loaded graph.
    pub fn stats(&self) -> Result<GraphStats> {
        self.current()?.stats()
    }

    /// Traversal-tree edges of a BFS from `start`, at most `depth` hops deep.
    pub fn bfs(&self, start: NodeId, depth: i64) -> Result<Vec<TreeEdge>> {
        traversal::bounded_bfs(&self.current()?.graph, start, depth)
    }

    /// Like [`bfs`](Self::bfs), plus the visited-node count and depth reached.
    pub fn traverse(&self, start: NodeId, depth: i64) -> Result<TraversalResult> {
        traversal::traverse_tree(&self.current()?.graph, start, depth)
    }

    /// Nodes ranked by degree. `top_n == 0` returns all.
    pub fn degree_ranking(&self, top_n: usize) -> Result<Vec<DegreeResult>> {
        Ok(degree::degree_ranking(&self.current()?.graph, top_n))
    }

    pub fn is_loaded(&self) -> bool {
        self.read_slot().is_some()
    }

    pub fn status(&self) -> EngineStatus {
        match self.read_slot() {
            Some(g) => EngineStatus {
                status: "loaded",
                source: Some(g.source.clone()),
                node_count: g.graph.node_count(),
                edge_count: g.graph.edge_count(),
                memory_bytes: g.graph.memory_usage(),
                load_time_ms: g.load_time_ms,
                generation: g.generation,
                loaded_at: Some(g.loaded_at),
            },
            None => EngineStatus {
                status: "not_loaded",
                source: None,
                node_count: 0,
                edge_count: 0,
                memory_bytes: 0,
                load_time_ms: 0.0,
                generation: 0,
                loaded_at: None,
            },
        }
    }

    fn read_slot(&self) -> Option<Arc<LoadedGraph>> {
        // The slot only ever holds a fully built graph, so a poisoned lock is still consistent.
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn current(&self) -> Result<Arc<LoadedGraph>> {
        self.read_slot().ok_or(Error::NotLoaded)
    }
}
