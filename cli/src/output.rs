use std::fmt::Write;

use anyhow::Result;
use neuronet_core::{
    DegreeResult, EngineStatus, GraphStats, LoadSummary, TraversalResult, TreeEdge,
};
use serde::Serialize;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn load_summary(summary: &LoadSummary, format: Format) -> Result<String> {
    if format == Format::Json {
        return json(summary);
    }
    let mut s = format!(
        "loaded {} nodes, {} edges in {:.2}ms (generation {})",
        summary.node_count, summary.edge_count, summary.load_time_ms, summary.generation
    );
    let r = &summary.report;
    if r.duplicates > 0 || r.self_loops > 0 {
        write!(
            s,
            "\n  {} records, {} duplicates collapsed, {} self-loops skipped",
            r.records, r.duplicates, r.self_loops
        )?;
    }
    Ok(s)
}

pub fn stats(stats: &GraphStats, format: Format) -> Result<String> {
    if format == Format::Json {
        return json(stats);
    }
    Ok(format!(
        "nodes:    {}\nedges:    {}\ncritical: {}",
        stats.node_count, stats.edge_count, stats.critical_node
    ))
}

pub fn edges(edges: &[TreeEdge], format: Format) -> Result<String> {
    if format == Format::Json {
        return json(edges);
    }
    if edges.is_empty() {
        return Ok("(no edges)".to_string());
    }
    let mut s = String::new();
    for (i, (parent, child)) in edges.iter().enumerate() {
        if i > 0 {
            s.push('\n');
        }
        write!(s, "{parent} -> {child}")?;
    }
    Ok(s)
}

/// Tree edges followed by a reach line; JSON carries the whole result.
pub fn traversal(result: &TraversalResult, format: Format) -> Result<String> {
    if format == Format::Json {
        return json(result);
    }
    let mut s = edges(&result.edges, format)?;
    write!(
        s,
        "\nvisited {} nodes, depth reached {}",
        result.nodes_visited, result.depth_reached
    )?;
    Ok(s)
}

pub fn degrees(ranking: &[DegreeResult], format: Format) -> Result<String> {
    if format == Format::Json {
        return json(ranking);
    }
    let mut s = format!("{:>12} {:>8}", "node", "degree");
    for r in ranking {
        write!(s, "\n{:>12} {:>8}", r.node_id, r.degree)?;
    }
    Ok(s)
}

pub fn status(status: &EngineStatus, format: Format) -> Result<String> {
    if format == Format::Json {
        return json(status);
    }
    let Some(source) = &status.source else {
        return Ok(status.status.to_string());
    };
    Ok(format!(
        "{} {} (generation {})\n  {} nodes, {} edges, ~{:.1}MB, loaded in {:.2}ms",
        status.status,
        source.display(),
        status.generation,
        status.node_count,
        status.edge_count,
        status.memory_bytes as f64 / 1_048_576.0,
        status.load_time_ms
    ))
}
