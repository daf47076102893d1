//! End-to-end tests for the engine facade against dataset files.

use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};
use std::fs;
use std::sync::Arc;
use std::thread;

use neuronet_core::{Error, GraphEngine, LoadConfig, NodeId};
use tempfile::TempDir;

/// Write `content` to `name` inside a fresh temp dir.
fn dataset(name: &str, content: &str) -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("should create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("should write dataset");
    (dir, path)
}

/// Deterministic edge list: a ring plus pseudo-random chords, with some
/// duplicates and self-loops mixed in.
fn random_edges(nodes: u64, chords: usize, seed: u64) -> Vec<(NodeId, NodeId)> {
    let mut state = seed;
    let mut next = |max: u64| {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % max
    };

    let mut edges: Vec<(NodeId, NodeId)> = (0..nodes).map(|i| (i, (i + 1) % nodes)).collect();
    for _ in 0..chords {
        edges.push((next(nodes), next(nodes)));
    }
    edges
}

fn to_text(edges: &[(NodeId, NodeId)]) -> String {
    edges
        .iter()
        .enumerate()
        .map(|(i, (a, b))| {
            if i % 3 == 0 {
                format!("{a},{b}\n")
            } else {
                format!("{a}\t{b}\n")
            }
        })
        .collect()
}

fn reference_adjacency(edges: &[(NodeId, NodeId)]) -> HashMap<NodeId, BTreeSet<NodeId>> {
    let mut adj: HashMap<NodeId, BTreeSet<NodeId>> = HashMap::new();
    for &(a, b) in edges {
        if a != b {
            adj.entry(a).or_default().insert(b);
            adj.entry(b).or_default().insert(a);
        }
    }
    adj
}

#[test]
fn example_dataset_matches_expected_stats_and_bfs() {
    let (_dir, path) = dataset("example.txt", "1 2\n2 3\n1 3\n3 4\n");
    let engine = GraphEngine::new();
    engine.load(&path).expect("load should succeed");

    let stats = engine.stats().expect("stats should succeed");
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.edge_count, 4);
    assert_eq!(stats.critical_node, 3);

    assert_eq!(engine.bfs(1, 1).unwrap(), vec![(1, 2), (1, 3)]);
    assert!(engine.bfs(4, 0).unwrap().is_empty());
}

#[test]
fn snap_style_dataset_with_header_loads() {
    let content = "# Undirected graph: ca-Example.txt\n\
                   # Nodes: 5 Edges: 4\n\
                   # FromNodeId\tToNodeId\n\
                   0\t1\n1\t2\n2\t3\n3\t4\n";
    let (_dir, path) = dataset("ca-Example.txt", content);
    let engine = GraphEngine::new();
    let summary = engine.load(&path).unwrap();

    assert_eq!(summary.report.comment_lines, 3);
    assert_eq!(summary.node_count, 5);
    assert_eq!(engine.stats().unwrap().critical_node, 1);
}

#[test]
fn stats_count_distinct_pairs_and_max_degree() {
    let edges = random_edges(200, 600, 7);
    let (_dir, path) = dataset("random.txt", &to_text(&edges));
    let engine = GraphEngine::new();
    let summary = engine.load(&path).unwrap();

    let adj = reference_adjacency(&edges);
    let distinct: usize = adj.values().map(BTreeSet::len).sum::<usize>() / 2;
    let stats = engine.stats().unwrap();
    assert_eq!(stats.node_count, adj.len());
    assert_eq!(stats.edge_count, distinct);
    assert_eq!(
        summary.report.records,
        summary.report.duplicates + summary.report.self_loops + distinct
    );

    let max_degree = adj.values().map(BTreeSet::len).max().unwrap();
    let expected_critical = adj
        .iter()
        .filter(|(_, n)| n.len() == max_degree)
        .map(|(&id, _)| id)
        .min()
        .unwrap();
    assert_eq!(stats.critical_node, expected_critical);
}

#[test]
fn bfs_touches_exactly_the_nodes_within_depth() {
    let edges = random_edges(150, 200, 99);
    let (_dir, path) = dataset("random.txt", &to_text(&edges));
    let engine = GraphEngine::new();
    engine.load(&path).unwrap();
    let adj = reference_adjacency(&edges);

    for start in [0u64, 17, 149] {
        let mut dist: HashMap<NodeId, i64> = HashMap::from([(start, 0)]);
        let mut queue = VecDeque::from([start]);
        while let Some(u) = queue.pop_front() {
            let d = dist[&u];
            for &v in &adj[&u] {
                if !dist.contains_key(&v) {
                    dist.insert(v, d + 1);
                    queue.push_back(v);
                }
            }
        }

        for depth in 0..5 {
            let edges = engine.bfs(start, depth).unwrap();
            let mut touched: HashSet<NodeId> = HashSet::from([start]);
            for &(parent, child) in &edges {
                assert!(touched.contains(&parent));
                assert!(touched.insert(child));
                assert_eq!(dist[&child], dist[&parent] + 1);
            }
            let expected: HashSet<NodeId> = dist
                .iter()
                .filter(|&(_, &d)| d <= depth)
                .map(|(&n, _)| n)
                .collect();
            assert_eq!(touched, expected, "start {start} depth {depth}");
        }
    }
}

#[test]
fn bfs_is_idempotent() {
    let edges = random_edges(100, 300, 3);
    let (_dir, path) = dataset("random.txt", &to_text(&edges));
    let engine = GraphEngine::new();
    engine.load(&path).unwrap();

    let first = engine.bfs(5, 3).unwrap();
    assert_eq!(engine.bfs(5, 3).unwrap(), first);
}

#[test]
fn failed_reload_preserves_previous_stats() {
    let (_dir, path) = dataset("good.txt", "1 2\n2 3\n1 3\n3 4\n");
    let engine = GraphEngine::new();
    engine.load(&path).unwrap();
    let before = engine.stats().unwrap();

    let missing = path.with_file_name("missing.txt");
    let err = engine.load(&missing).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("missing.txt"));

    assert_eq!(engine.stats().unwrap(), before);
    assert_eq!(engine.bfs(1, 1).unwrap(), vec![(1, 2), (1, 3)]);
}

#[test]
fn malformed_dataset_names_the_line() {
    let (_dir, path) = dataset("bad.txt", "1 2\n2 3 4\n");
    let engine = GraphEngine::new();
    let err = engine.load(&path).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }));
    assert_eq!(
        err.to_string(),
        "line 2: expected 2 node identifiers, found 3 (record: '2 3 4')"
    );
    assert!(!engine.is_loaded());
}

#[test]
fn non_utf8_dataset_is_a_parse_error_on_its_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("latin1.txt");
    fs::write(&path, b"1 2\n2 \xff3\n").unwrap();

    let engine = GraphEngine::new();
    let err = engine.load(&path).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 2, .. }), "got {err:?}");
    assert!(err.to_string().starts_with("line 2: line is not valid UTF-8"));
    assert!(!engine.is_loaded());
}

#[test]
fn concurrent_readers_share_one_graph() {
    let edges = random_edges(500, 1500, 11);
    let (_dir, path) = dataset("random.txt", &to_text(&edges));
    let engine = Arc::new(GraphEngine::new());
    engine.load(&path).unwrap();
    let expected = engine.bfs(0, 4).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..20 {
                    engine.stats().unwrap();
                    engine.bfs(0, 4).unwrap();
                }
                engine.bfs(0, 4).unwrap()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn reload_during_reads_serves_a_complete_graph() {
    let (_dir_a, a) = dataset("a.txt", "1 2\n2 3\n");
    let (_dir_b, b) = dataset("b.txt", "1 2\n1 3\n1 4\n");
    let engine = Arc::new(GraphEngine::new());
    engine.load(&a).unwrap();

    let reader = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..200 {
                let stats = engine.stats().unwrap();
                // either graph, never a mix
                assert!(
                    (stats.edge_count == 2 && stats.critical_node == 2)
                        || (stats.edge_count == 3 && stats.critical_node == 1)
                );
            }
        })
    };

    for i in 0..20 {
        engine.load(if i % 2 == 0 { &b } else { &a }).unwrap();
    }
    reader.join().unwrap();
    assert_eq!(engine.status().generation, 21);
}

#[test]
fn custom_config_disables_comments() {
    let (_dir, path) = dataset("hdr.txt", "# header\n1 2\n");
    let engine = GraphEngine::with_config(LoadConfig {
        allow_comments: false,
        ..LoadConfig::default()
    })
    .unwrap();
    assert!(matches!(engine.load(&path), Err(Error::Parse { line: 1, .. })));
}
