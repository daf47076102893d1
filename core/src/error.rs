//! Error types for engine operations.
//!
//! Every failure is returned to the caller. None of them poison the engine:
//! after any error the last successfully loaded graph is still served.

use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for neuronet-core.
#[derive(Debug, Error)]
pub enum Error {
    /// The dataset could not be opened or read.
    #[error("cannot read dataset '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dataset record did not match the edge-list format.
    #[error("line {line}: {reason} (record: '{content}')")]
    Parse {
        /// 1-based line number in the dataset.
        line: usize,
        content: String,
        reason: RecordError,
    },

    /// A query was issued before any successful load.
    #[error("no graph loaded, call load() first")]
    NotLoaded,

    #[error("node {node} not found in the loaded graph")]
    UnknownNode { node: NodeId },

    #[error("{name} must be non-negative, got {value}")]
    InvalidArgument { name: &'static str, value: i64 },

    /// Critical-node query against a graph with no nodes.
    #[error("graph is empty")]
    EmptyGraph,

    #[error("loaded graph uses {used_mb}MB, exceeds max_memory_mb={limit_mb}MB")]
    MemoryLimit { used_mb: usize, limit_mb: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

/// Why a single dataset record was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected 2 node identifiers, found {found}")]
    FieldCount { found: usize },

    #[error("empty field")]
    EmptyField,

    #[error("invalid node identifier '{token}'")]
    InvalidNodeId { token: String },

    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}
