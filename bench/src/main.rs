use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use neuronet_core::{DataLoader, GraphBuilder, GraphStore};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: neuronet-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all         Run all generators and benchmark each (default)");
        println!("  tree        Ternary branching tree (deep paths)");
        println!("  scalefree   Preferential attachment via edge sampling (hub-and-spoke)");
        println!("  smallworld  Watts-Strogatz ring lattice + shortcuts");
        println!("  random      Erdos-Renyi uniform random edges");
        println!("  barbell     Two dense clusters connected by a thin bridge");
        println!("  dla         Diffusion-limited aggregation (organic branching)");
        println!();
        println!("Default node_count: 1000000");
        return;
    }

    println!("neuronet-bench");
    println!("==============");
    println!();

    let generators: Vec<(&str, fn(u64) -> GraphBuilder)> = match mode {
        "tree" => vec![("Ternary tree", gen_tree)],
        "scalefree" => vec![("Scale-free (edge sampling)", gen_scale_free)],
        "smallworld" => vec![("Small-world (Watts-Strogatz)", gen_small_world)],
        "random" => vec![("Erdos-Renyi random", gen_random)],
        "barbell" => vec![("Barbell (cluster-bridge-cluster)", gen_barbell)],
        "dla" => vec![("DLA (organic branching)", gen_dla)],
        "all" => vec![
            ("Ternary tree", gen_tree as fn(u64) -> GraphBuilder),
            ("Scale-free (edge sampling)", gen_scale_free),
            ("Small-world (Watts-Strogatz)", gen_small_world),
            ("Erdos-Renyi random", gen_random),
            ("Barbell (cluster-bridge-cluster)", gen_barbell),
            ("DLA (organic branching)", gen_dla),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(name: &str, generator: fn(u64) -> GraphBuilder, node_count: u64) {
    println!("--- {} ---", name);
    println!("Target: {} nodes", node_count);

    let t = Instant::now();
    let graph = generator(node_count).build();
    let gen_time = t.elapsed();
    println!(
        "Generated in {:.2}s, {} nodes, {} edges, ~{:.0}MB",
        gen_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count(),
        graph.memory_usage() as f64 / 1_048_576.0
    );

    let t = Instant::now();
    match neuronet_core::critical_node(&graph) {
        Ok(node) => println!(
            "Critical node {} (degree {}) in {:.1}ms",
            node,
            graph.degree(node).unwrap_or(0),
            t.elapsed().as_secs_f64() * 1000.0
        ),
        Err(e) => println!("Critical node: {}", e),
    }

    // BFS from node 0 (root or seed in every generator)
    println!();
    println!("{:>8} {:>12} {:>12} {:>10}", "depth", "edges", "visited", "time");
    println!("{:->8} {:->12} {:->12} {:->10}", "", "", "", "");

    for depth in [1, 2, 3, 5, 10, 20, 50] {
        let t = Instant::now();
        let result = match neuronet_core::traverse_tree(&graph, 0, depth) {
            Ok(r) => r,
            Err(e) => {
                println!("{:>8} {}", depth, e);
                break;
            }
        };
        let elapsed = t.elapsed();
        println!(
            "{:>8} {:>12} {:>12} {:>8.1}ms",
            depth,
            result.edges.len(),
            result.nodes_visited,
            elapsed.as_secs_f64() * 1000.0
        );
        if result.nodes_visited >= graph.node_count() {
            println!("{:>8} (entire graph reached)", "");
            break;
        }
    }

    println!();
    bench_loader(&graph);
    println!();
}

/// Write the graph as an edge list and time a full parse of it.
fn bench_loader(graph: &GraphStore) {
    let file = match tempfile::NamedTempFile::new() {
        Ok(f) => f,
        Err(e) => {
            println!("Loader: cannot create temp file: {}", e);
            return;
        }
    };

    let t = Instant::now();
    if let Err(e) = write_edge_list(graph, file.as_file()) {
        println!("Loader: write failed: {}", e);
        return;
    }
    let write_time = t.elapsed();

    let t = Instant::now();
    match DataLoader::default().build(file.path()) {
        Ok((loaded, report)) => {
            let elapsed = t.elapsed();
            println!(
                "Loader: wrote {} records in {:.2}s, parsed in {:.2}s ({:.1}M records/s)",
                report.records,
                write_time.as_secs_f64(),
                elapsed.as_secs_f64(),
                report.records as f64 / elapsed.as_secs_f64() / 1_000_000.0
            );
            if loaded.edge_count() != graph.edge_count() {
                println!(
                    "Loader: edge count mismatch, generated {} but parsed {}",
                    graph.edge_count(),
                    loaded.edge_count()
                );
            }
        }
        Err(e) => println!("Loader: {}", e),
    }
}

fn write_edge_list(graph: &GraphStore, file: &File) -> std::io::Result<()> {
    let mut out = BufWriter::new(file);
    writeln!(out, "# neuronet-bench edge list")?;
    for node in graph.nodes() {
        let Ok(neighbors) = graph.neighbors(node) else {
            continue;
        };
        for neighbor in neighbors.filter(|&n| node < n) {
            writeln!(out, "{}\t{}", node, neighbor)?;
        }
    }
    out.flush()
}

// ---------------------------------------------------------------------------
// Generators: all O(n) or O(n + edges), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Ternary tree: every node has three children. Depth grows as log3(n).
fn gen_tree(node_count: u64) -> GraphBuilder {
    let mut builder = GraphBuilder::with_capacity(node_count as usize);
    for child in 1..node_count {
        builder.add_edge((child - 1) / 3, child);
    }
    builder
}

/// Scale-free via edge-list sampling.
///
/// Preferential attachment: pick a random endpoint of an existing edge, so
/// nodes with more edges are picked more often.
fn gen_scale_free(node_count: u64) -> GraphBuilder {
    let edges_per_node = 10u64;
    let mut builder = GraphBuilder::with_capacity(node_count as usize);
    let mut rng = FastRng::new(12345);
    let mut endpoints: Vec<u64> = Vec::with_capacity((node_count * edges_per_node * 2) as usize);

    let seed = 5u64.min(node_count);
    for i in 0..seed {
        for j in (i + 1)..seed {
            builder.add_edge(i, j);
            endpoints.push(i);
            endpoints.push(j);
        }
    }

    for new_node in seed..node_count {
        for _ in 0..edges_per_node.min(new_node) {
            if endpoints.is_empty() {
                break;
            }
            let target = endpoints[rng.next(endpoints.len() as u64) as usize];
            if builder.add_edge(new_node, target) {
                endpoints.push(new_node);
                endpoints.push(target);
            }
        }
    }

    builder
}

/// Small-world (Watts-Strogatz): ring lattice with K neighbors per side,
/// each edge rewired with probability p.
fn gen_small_world(node_count: u64) -> GraphBuilder {
    let k = 10u64;
    let p = 0.05f64;
    let mut builder = GraphBuilder::with_capacity(node_count as usize);
    let mut rng = FastRng::new(67890);

    for i in 0..node_count {
        for j in 1..=k {
            let neighbor = (i + j) % node_count;
            if rng.next_f64() < p {
                let rewired = rng.next(node_count);
                if !builder.add_edge(i, rewired) {
                    builder.add_edge(i, neighbor);
                }
            } else {
                builder.add_edge(i, neighbor);
            }
        }
    }

    builder
}

/// Erdos-Renyi: ~10 uniform random edges per node, no structure.
fn gen_random(node_count: u64) -> GraphBuilder {
    let mut builder = GraphBuilder::with_capacity(node_count as usize);
    let mut rng = FastRng::new(54321);

    // ring keeps node 0 connected so BFS has something to walk
    for i in 0..node_count {
        builder.add_edge(i, (i + 1) % node_count);
    }
    for _ in 0..node_count * 10 {
        builder.add_edge(rng.next(node_count), rng.next(node_count));
    }

    builder
}

/// Barbell: two dense clusters joined by a chain of 10 bridge nodes.
fn gen_barbell(node_count: u64) -> GraphBuilder {
    let bridge_len = 10u64;
    let cluster = node_count.saturating_sub(bridge_len) / 2;
    let mut builder = GraphBuilder::with_capacity(node_count as usize);
    let mut rng = FastRng::new(99999);

    if cluster < 2 {
        for i in 1..node_count {
            builder.add_edge(i - 1, i);
        }
        return builder;
    }

    let b_start = cluster + bridge_len;
    for base in [0, b_start] {
        for i in 0..cluster {
            for _ in 0..20u64.min(cluster - 1) {
                builder.add_edge(base + i, base + rng.next(cluster));
            }
        }
    }

    // bridge: last node of A -> chain -> first node of B
    for id in (cluster - 1)..b_start {
        builder.add_edge(id, id + 1);
    }

    builder
}

/// DLA (diffusion-limited aggregation): each new node sticks to a recent
/// "surface" node, with an occasional long-range second edge.
fn gen_dla(node_count: u64) -> GraphBuilder {
    let mut builder = GraphBuilder::with_capacity(node_count as usize);
    let mut rng = FastRng::new(77777);

    let surface_max = 10000usize;
    let mut surface: VecDeque<u64> = VecDeque::with_capacity(surface_max + 1);
    surface.push_back(0);

    for new_node in 1..node_count {
        let attach_to = surface[rng.next(surface.len() as u64) as usize];
        builder.add_edge(new_node, attach_to);

        // 10% chance of a shortcut
        if rng.next(10) == 0 && new_node > 1 {
            let other = rng.next(new_node);
            if other != attach_to {
                builder.add_edge(new_node, other);
            }
        }

        surface.push_back(new_node);
        if surface.len() > surface_max {
            surface.pop_front();
        }
    }

    builder
}
