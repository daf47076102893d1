//! neuronet CLI: load an edge-list dataset and query it.
//!
//! One-shot subcommands load the dataset, run one query and exit. `shell`
//! keeps one engine alive and reads commands from stdin.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use neuronet_core::{GraphEngine, LoadConfig, NodeId, DEFAULT_MEMORY_MB};
use tracing_subscriber::EnvFilter;

mod output;
mod shell;

use output::Format;

/// Graph engine for edge-list datasets: statistics, critical node, bounded BFS.
#[derive(Parser)]
#[command(name = "neuronet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbose output (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Fail loads whose in-memory graph exceeds this many MB
    #[arg(long, global = true, env = "NEURONET_MAX_MEMORY_MB", default_value_t = DEFAULT_MEMORY_MB)]
    max_memory_mb: usize,

    /// Treat '#' lines as malformed records instead of comments
    #[arg(long, global = true)]
    no_comments: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Node count, edge count and critical (maximum-degree) node
    Stats {
        /// Edge-list dataset
        dataset: PathBuf,
    },

    /// Traversal-tree edges of a breadth-first search
    Bfs {
        /// Edge-list dataset
        dataset: PathBuf,

        /// Start node (defaults to the critical node)
        #[arg(short, long)]
        start: Option<NodeId>,

        /// Maximum hop distance from the start node
        #[arg(short, long, default_value = "2", allow_negative_numbers = true)]
        depth: i64,
    },

    /// Nodes ranked by degree
    Degree {
        /// Edge-list dataset
        dataset: PathBuf,

        /// Number of nodes to show (0 = all)
        #[arg(short = 'n', long, default_value = "10")]
        top: usize,
    },

    /// Interactive session: load once, query repeatedly
    Shell {
        /// Dataset to load before reading commands
        dataset: Option<PathBuf>,
    },
}

impl Cli {
    fn load_config(&self) -> LoadConfig {
        LoadConfig {
            max_memory_mb: self.max_memory_mb,
            allow_comments: !self.no_comments,
        }
    }

    fn format(&self) -> Format {
        if self.json {
            Format::Json
        } else {
            Format::Text
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let engine = GraphEngine::with_config(cli.load_config())?;
    let format = cli.format();

    match &cli.command {
        Commands::Stats { dataset } => {
            engine.load(dataset)?;
            println!("{}", output::stats(&engine.stats()?, format)?);
        }
        Commands::Bfs {
            dataset,
            start,
            depth,
        } => {
            engine.load(dataset)?;
            let start = match start {
                Some(node) => *node,
                None => engine.stats()?.critical_node,
            };
            let result = engine.traverse(start, *depth)?;
            println!("{}", output::traversal(&result, format)?);
        }
        Commands::Degree { dataset, top } => {
            engine.load(dataset)?;
            println!("{}", output::degrees(&engine.degree_ranking(*top)?, format)?);
        }
        Commands::Shell { dataset } => {
            // a failed initial load is reported and the shell starts anyway
            if let Some(path) = dataset {
                let load = shell::Command::Load(path.clone());
                println!("{}", shell::respond(&engine, &load, format));
            }
            let stdin = io::stdin();
            let prompt = stdin.is_terminal();
            shell::run(&engine, stdin.lock(), &mut io::stdout(), format, prompt)?;
        }
    }

    Ok(())
}
