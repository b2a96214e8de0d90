//! Graph algorithms module
//!
//! Algorithms are implemented in the `roadgraph-algorithms` crate.
//! This module provides the integration layer used by the benchmark
//! driver: queries keyed by raw DIMACS ids and algorithm selection.

use serde::{Deserialize, Serialize};

// Re-export algorithms
pub use roadgraph_algorithms::{
    connected_components, kruskal, prim, prim_lazy, shortest_path, single_source, ComponentSummary,
    Distance, EdgeRecord, GraphBuilder, GraphError, GraphResult, GraphStore, HeapHandle,
    Neighbors, NodeId, NodeIndex, PairingHeap, PathResult, ShortestPaths, SpanningForest,
    StoredEdge, UnionFind, Weight,
};

/// Single-source shortest path query expressed in raw node ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortestPathQuery {
    pub source: NodeId,
    pub target: Option<NodeId>,
}

impl ShortestPathQuery {
    pub fn new(source: NodeId, target: Option<NodeId>) -> Self {
        Self { source, target }
    }

    /// Resolve raw ids to dense indices. Fails with `UnknownNode`.
    pub fn resolve(&self, store: &GraphStore) -> GraphResult<(NodeIndex, Option<NodeIndex>)> {
        let source = store.index_of(self.source)?;
        let target = self.target.map(|t| store.index_of(t)).transpose()?;
        Ok((source, target))
    }

    pub fn run(&self, store: &GraphStore) -> GraphResult<ShortestPaths> {
        let (source, target) = self.resolve(store)?;
        single_source(store, source, target)
    }
}

/// Spanning forest algorithm selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MstAlgorithm {
    #[default]
    Kruskal,
    Prim,
    #[serde(rename = "prim-lazy")]
    PrimLazy,
}

impl MstAlgorithm {
    pub fn run(self, store: &GraphStore) -> SpanningForest {
        match self {
            MstAlgorithm::Kruskal => kruskal(store),
            MstAlgorithm::Prim => prim(store),
            MstAlgorithm::PrimLazy => prim_lazy(store),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MstAlgorithm::Kruskal => "kruskal",
            MstAlgorithm::Prim => "prim",
            MstAlgorithm::PrimLazy => "prim-lazy",
        }
    }
}
