//! Roadgraph
//!
//! Benchmark harness for shortest path and minimum spanning tree algorithms
//! on DIMACS road networks.
//!
//! # Architecture
//!
//! - `roadgraph-algorithms`: frozen CSR graph store, Dijkstra, Kruskal/Prim
//! - [`dimacs`]: streaming edge-list parser and file loader (plain or gzip)
//! - [`dataset`]: dataset catalog and fetch-if-absent download
//! - [`bench`]: timed repeated runs against one shared store
//!
//! Data flows one way: bytes -> parser -> edge records -> store (built once)
//! -> algorithms (run N times against the same immutable store).
//!
//! ## Example Usage
//!
//! ```rust
//! use roadgraph::algo::{kruskal, shortest_path};
//! use roadgraph::config::LoadConfig;
//! use roadgraph::dimacs::read_graph;
//!
//! let input = "c sample\np sp 3 3\na 1 2 5\na 2 3 3\na 1 3 10\n";
//! let loaded = read_graph(input.as_bytes(), &LoadConfig::default()).unwrap();
//! let store = &loaded.store;
//!
//! let path = shortest_path(store, 1, 3).unwrap().unwrap();
//! assert_eq!(path.cost, 8);
//! assert_eq!(path.path, vec![1, 2, 3]);
//!
//! let forest = kruskal(store);
//! assert_eq!(forest.total_weight, 8);
//! ```

#![warn(clippy::all)]

pub mod algo;
pub mod bench;
pub mod config;
pub mod dataset;
pub mod dimacs;
pub mod error;

// Re-export main types for convenience
pub use algo::{GraphError, GraphStore, MstAlgorithm, ShortestPathQuery};
pub use bench::{BenchReport, BenchmarkRunner};
pub use config::{BenchConfig, LoadConfig};
pub use dataset::{DatasetCatalog, DatasetError, DatasetFetcher};
pub use dimacs::{load_graph, read_graph, LoadStats, LoadedGraph, ParseError, ParsePolicy};
pub use error::{Error, Result};

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
