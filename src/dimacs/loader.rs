//! Graph loading
//!
//! Opens a DIMACS file (plain or gzip-compressed), streams it through the
//! parser and freezes the result into a [`GraphStore`].

use super::parser::{EdgeReader, ProblemLine};
use crate::algo::{GraphBuilder, GraphStore};
use crate::config::LoadConfig;
use crate::error::Result;
use flate2::read::GzDecoder;
use serde::Serialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const READ_BUFFER: usize = 1 << 16;

/// Upper bound on preallocation taken from a `p` line; larger graphs grow on demand
const MAX_RESERVE_HINT: usize = 1 << 24;

/// Summary of a load
#[derive(Debug, Clone, Serialize)]
pub struct LoadStats {
    /// Edge lines accepted
    pub accepted: usize,
    /// Bad edge lines skipped (lenient policy only)
    pub skipped: usize,
    /// Lines read in total
    pub lines: usize,
    pub problem: Option<ProblemLine>,
    pub elapsed: Duration,
}

/// A built store together with its load statistics
#[derive(Debug)]
pub struct LoadedGraph {
    pub store: GraphStore,
    pub stats: LoadStats,
}

/// Load a graph from a path; `.gz` files are decompressed on the fly.
pub fn load_graph(path: impl AsRef<Path>, config: &LoadConfig) -> Result<LoadedGraph> {
    let path = path.as_ref();
    info!("Loading graph from {:?}", path);

    let file = File::open(path)?;
    let reader: Box<dyn BufRead> = if is_gzip(path) {
        debug!("Decompressing gzip input");
        Box::new(BufReader::with_capacity(READ_BUFFER, GzDecoder::new(file)))
    } else {
        Box::new(BufReader::with_capacity(READ_BUFFER, file))
    };

    read_graph(reader, config)
}

/// Build a graph from any buffered reader.
pub fn read_graph<R: BufRead>(reader: R, config: &LoadConfig) -> Result<LoadedGraph> {
    let start = Instant::now();
    let mut edges = EdgeReader::new(reader, config.policy);
    let mut builder = GraphBuilder::new();
    let mut reserved = false;

    while let Some(edge) = edges.next() {
        let edge = edge?;
        if !reserved {
            // The problem line precedes the first arc in well-formed files
            if let Some(problem) = edges.problem() {
                let nodes = problem.nodes.min(MAX_RESERVE_HINT);
                let arcs = problem.arcs.min(MAX_RESERVE_HINT);
                debug!("Reserving for {} nodes, {} arcs", nodes, arcs);
                if let Err(e) = builder.try_reserve(nodes, arcs) {
                    warn!("Ignoring size hint {:?}: {}", problem, e);
                }
            }
            reserved = true;
        }
        builder.add_edge(edge);
    }

    let store = builder.finish();
    let stats = LoadStats {
        accepted: edges.accepted(),
        skipped: edges.skipped(),
        lines: edges.lines_read(),
        problem: edges.problem(),
        elapsed: start.elapsed(),
    };

    info!(
        "Graph loaded: {} nodes, {} edges ({} skipped) in {:?}",
        store.node_count(),
        store.edge_count(),
        stats.skipped,
        stats.elapsed
    );

    Ok(LoadedGraph { store, stats })
}

fn is_gzip(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimacs::ParsePolicy;
    use crate::error::Error;

    #[test]
    fn test_read_graph_counts() {
        let input = "p sp 4 3\na 1 2 5\na 2 3 3\na 1 3 10\n";
        let loaded = read_graph(input.as_bytes(), &LoadConfig::default()).unwrap();

        assert_eq!(loaded.store.node_count(), 3);
        assert_eq!(loaded.store.edge_count(), 3);
        assert_eq!(loaded.stats.accepted, 3);
        assert_eq!(loaded.stats.problem.map(|p| p.arcs), Some(3));
    }

    #[test]
    fn test_read_graph_policy() {
        let input = "a 1 2 5\na 1 2\na 2 3 3\n";

        let err = read_graph(input.as_bytes(), &LoadConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));

        let config = LoadConfig {
            policy: ParsePolicy::Lenient,
        };
        let loaded = read_graph(input.as_bytes(), &config).unwrap();
        assert_eq!(loaded.store.edge_count(), 2);
        assert_eq!(loaded.stats.skipped, 1);
    }

    #[test]
    fn test_oversized_problem_line_is_only_a_hint() {
        for header in ["p sp 18446744073709551615 1", "p sp 1000000000000 1000000000000"] {
            let input = format!("{}\na 1 2 3\n", header);
            let loaded = read_graph(input.as_bytes(), &LoadConfig::default()).unwrap();

            assert_eq!(loaded.store.edge_count(), 1);
            assert_eq!(loaded.store.node_count(), 2);
        }
    }

    #[test]
    fn test_is_gzip() {
        assert!(is_gzip(Path::new("data/dimacs-ny.gr.gz")));
        assert!(is_gzip(Path::new("DATA.GZ")));
        assert!(!is_gzip(Path::new("data/dimacs-ny.gr")));
    }
}
