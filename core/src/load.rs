//! Edge-list dataset loading.
//!
//! Format: one record per line, two non-negative integer node identifiers
//! separated by a single comma or by whitespace. Blank lines are skipped, as
//! are `#` comment lines when the config allows them. Any other deviation,
//! including bytes that are not UTF-8, fails the whole load with the
//! offending line number.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::LoadConfig;
use crate::error::{Error, RecordError, Result};
use crate::graph::{GraphBuilder, GraphStore, NodeId};

/// What the loader saw while reading one dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Edge records parsed, including duplicates and self-loops.
    pub records: usize,
    /// Records naming a pair that was already present.
    pub duplicates: usize,
    /// `a a` records, which are skipped.
    pub self_loops: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
}

/// Parses edge-list datasets into a [`GraphStore`].
#[derive(Debug, Clone, Default)]
pub struct DataLoader {
    config: LoadConfig,
}

impl DataLoader {
    /// Loader with a custom config. Fails if the config is out of range.
    pub fn new(config: LoadConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Read and parse the dataset at `path`.
    pub fn build(&self, path: &Path) -> Result<(GraphStore, LoadReport)> {
        let file = File::open(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(BufReader::new(file), path)
    }

    /// Parse a dataset from any byte stream.
    pub fn build_from_reader<R: Read>(&self, reader: R) -> Result<(GraphStore, LoadReport)> {
        self.read(BufReader::new(reader), Path::new("<reader>"))
    }

    fn read<R: BufRead>(&self, mut reader: R, origin: &Path) -> Result<(GraphStore, LoadReport)> {
        let start = Instant::now();
        let mut builder = GraphBuilder::new();
        let mut report = LoadReport::default();
        let mut buf = Vec::new();
        let mut line_no = 0;

        loop {
            buf.clear();
            let read = reader.read_until(b'\n', &mut buf).map_err(|source| Error::Io {
                path: origin.to_path_buf(),
                source,
            })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let line = std::str::from_utf8(&buf).map_err(|_| Error::Parse {
                line: line_no,
                content: String::from_utf8_lossy(&buf).trim().to_string(),
                reason: RecordError::InvalidEncoding,
            })?;
            let record = line.trim();

            if record.is_empty() {
                report.blank_lines += 1;
                continue;
            }
            if self.config.allow_comments && record.starts_with('#') {
                report.comment_lines += 1;
                continue;
            }

            let (a, b) = parse_record(record).map_err(|reason| Error::Parse {
                line: line_no,
                content: record.to_string(),
                reason,
            })?;

            report.records += 1;
            if !builder.add_edge(a, b) {
                report.self_loops += 1;
            }
        }

        debug!(
            records = report.records,
            nodes = builder.node_count(),
            "neuronet: parsed dataset, freezing adjacency"
        );

        let graph = builder.build();
        report.duplicates = report.records - report.self_loops - graph.edge_count();

        if report.self_loops > 0 {
            warn!(
                self_loops = report.self_loops,
                "neuronet: skipped self-loop records in {}",
                origin.display()
            );
        }

        check_memory(graph.memory_usage(), self.config.max_memory_mb)?;

        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            duplicates = report.duplicates,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "neuronet: loaded {}",
            origin.display()
        );

        Ok((graph, report))
    }
}

/// Fail when `bytes` is over `limit_mb`. Partial megabytes count as a whole one.
pub(crate) fn check_memory(bytes: usize, limit_mb: usize) -> Result<()> {
    let used_mb = bytes.div_ceil(1024 * 1024);
    if used_mb > limit_mb {
        return Err(Error::MemoryLimit { used_mb, limit_mb });
    }
    Ok(())
}

/// Parse one non-blank record into its two endpoints.
pub fn parse_record(record: &str) -> std::result::Result<(NodeId, NodeId), RecordError> {
    let fields: Vec<&str> = if record.contains(',') {
        record.split(',').map(str::trim).collect()
    } else {
        record.split_whitespace().collect()
    };

    if fields.len() != 2 {
        return Err(RecordError::FieldCount {
            found: fields.len(),
        });
    }
    if fields.iter().any(|f| f.is_empty()) {
        return Err(RecordError::EmptyField);
    }

    Ok((parse_node_id(fields[0])?, parse_node_id(fields[1])?))
}

/// Plain decimal digits only; `str::parse` alone would also take a leading `+`.
fn parse_node_id(token: &str) -> std::result::Result<NodeId, RecordError> {
    let invalid = || RecordError::InvalidNodeId {
        token: token.to_string(),
    };
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}
