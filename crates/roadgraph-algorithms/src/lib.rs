//! Weighted graph engine for road network benchmarks
//!
//! A frozen CSR [`GraphStore`] built once from edge records, with
//! Dijkstra shortest paths and Kruskal (or Prim) minimum spanning forests
//! running against it. The store is immutable after build, so any number of
//! runs, from any number of threads, can share one instance by reference.

pub mod common;
pub mod store;
pub mod community;
pub mod heap;
pub mod pathfinding;
pub mod mst;

pub use common::{Distance, EdgeRecord, GraphError, GraphResult, NodeId, NodeIndex, StoredEdge, Weight};
pub use store::{GraphBuilder, GraphStore, Neighbors};
pub use community::{connected_components, ComponentSummary, UnionFind};
pub use heap::{HeapHandle, PairingHeap};
pub use pathfinding::{shortest_path, single_source, PathResult, ShortestPaths};
pub use mst::{kruskal, prim, prim_lazy, SpanningForest};
