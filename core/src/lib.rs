//! neuronet-core: In-memory undirected graph engine.
//!
//! Loads an edge-list dataset into an immutable adjacency structure, reports
//! node/edge counts and a degree-based "critical" node, and runs bounded
//! breadth-first traversals that return the traversal-tree edges.
//!
//! [`GraphEngine`] is the entry point. The lower-level pieces
//! ([`DataLoader`], [`GraphStore`], [`bounded_bfs`], [`critical_node`]) are
//! usable on their own for benchmarking and testing.

mod config;
mod degree;
mod engine;
mod error;
mod graph;
mod load;
mod traversal;

pub use config::{LoadConfig, DEFAULT_MEMORY_MB, MAX_MEMORY_MB, MIN_MEMORY_MB};
pub use degree::{critical_node, degree_ranking, DegreeResult};
pub use engine::{EngineStatus, GraphEngine, GraphStats, LoadSummary};
pub use error::{Error, RecordError, Result};
pub use graph::{GraphBuilder, GraphStore, NodeId};
pub use load::{parse_record, DataLoader, LoadReport};
pub use traversal::{bounded_bfs, check_non_negative, traverse_tree, TraversalResult, TreeEdge};
