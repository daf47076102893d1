//! Line-oriented shell over one engine.
//!
//! Each input line is one command. Errors are printed and the shell keeps
//! serving its last successfully loaded graph.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use neuronet_core::{GraphEngine, NodeId};
use tracing::debug;

use crate::output::{self, Format};

const HELP: &str = "\
commands:
  load <path>          load an edge-list dataset, replacing the current graph
  stats                node count, edge count, critical node
  bfs <start> <depth>  traversal-tree edges within <depth> hops of <start>
  degree [n]           top-n nodes by degree (default 10, 0 = all)
  status               loaded dataset and memory usage
  help                 this message
  quit                 leave the shell";

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Stats,
    Bfs { start: NodeId, depth: i64 },
    Degree(usize),
    Status,
    Help,
    Quit,
}

/// Parse one non-empty input line.
pub fn parse_command(line: &str) -> Result<Command> {
    let mut parts = line.split_whitespace();
    let Some(name) = parts.next() else {
        bail!("empty command");
    };
    let args: Vec<&str> = parts.collect();

    let command = match (name.to_lowercase().as_str(), args.as_slice()) {
        ("load", []) => bail!("usage: load <path>"),
        // paths may contain spaces
        ("load", _) => Command::Load(PathBuf::from(line.trim()[name.len()..].trim())),
        ("stats", []) => Command::Stats,
        ("bfs", [start, depth]) => Command::Bfs {
            start: start
                .parse()
                .map_err(|_| anyhow!("invalid start node '{start}'"))?,
            depth: depth
                .parse()
                .map_err(|_| anyhow!("invalid depth '{depth}'"))?,
        },
        ("bfs", _) => bail!("usage: bfs <start> <depth>"),
        ("degree", []) => Command::Degree(10),
        ("degree", [n]) => Command::Degree(n.parse().map_err(|_| anyhow!("invalid count '{n}'"))?),
        ("status", []) => Command::Status,
        ("help" | "?", _) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (other, _) => bail!("unknown command '{other}', try 'help'"),
    };
    Ok(command)
}

/// Execute one command against the engine and render its result.
pub fn execute(engine: &GraphEngine, command: &Command, format: Format) -> Result<String> {
    match command {
        Command::Load(path) => output::load_summary(&engine.load(path)?, format),
        Command::Stats => output::stats(&engine.stats()?, format),
        Command::Bfs { start, depth } => {
            output::traversal(&engine.traverse(*start, *depth)?, format)
        }
        Command::Degree(n) => output::degrees(&engine.degree_ranking(*n)?, format),
        Command::Status => output::status(&engine.status(), format),
        Command::Help => Ok(HELP.to_string()),
        Command::Quit => Ok(String::new()),
    }
}

/// Execute `command`, rendering a failure as an `error:` line.
pub fn respond(engine: &GraphEngine, command: &Command, format: Format) -> String {
    match execute(engine, command, format) {
        Ok(text) => text,
        Err(e) => format!("error: {e}"),
    }
}

/// Read commands from `input` until `quit` or end of input.
pub fn run<R: BufRead, W: Write>(
    engine: &GraphEngine,
    input: R,
    out: &mut W,
    format: Format,
    prompt: bool,
) -> io::Result<()> {
    if prompt {
        write!(out, "neuronet> ")?;
        out.flush()?;
    }

    for line in input.lines() {
        let line = line?;
        let line = line.trim();

        if !line.is_empty() {
            debug!(command = line, "neuronet: shell command");
            match parse_command(line) {
                Ok(Command::Quit) => break,
                Ok(command) => writeln!(out, "{}", respond(engine, &command, format))?,
                Err(e) => writeln!(out, "error: {e}")?,
            }
        }

        if prompt {
            write!(out, "neuronet> ")?;
            out.flush()?;
        }
    }

    Ok(())
}
