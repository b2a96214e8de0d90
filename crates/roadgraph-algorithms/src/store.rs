//! Immutable graph storage
//!
//! A dense, integer-indexed view of an undirected weighted multigraph using
//! Compressed Sparse Row (CSR) adjacency. Raw node ids are remapped to dense
//! indices in order of first appearance.

use super::common::{EdgeRecord, GraphError, GraphResult, NodeId, NodeIndex, StoredEdge, Weight};
use rustc_hash::FxHashMap;
use std::collections::TryReserveError;
use std::io::{self, Write};
use tracing::debug;

/// Read-only adjacency structure shared by all algorithm runs.
///
/// Every edge `{u, v}` appears in both `u`'s and `v`'s neighbor list; a
/// self-loop appears once. Parallel edges are all kept.
#[derive(Debug, Clone, Default)]
pub struct GraphStore {
    /// Mapping from dense index (0..N) back to NodeId
    index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    node_to_index: FxHashMap<NodeId, NodeIndex>,

    /// Offsets into `targets`. Size = node_count + 1
    offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    targets: Vec<NodeIndex>,
    /// Edge weights: aligned with `targets`
    weights: Vec<Weight>,

    /// Accepted edges in insertion order
    edges: Vec<StoredEdge>,
}

impl GraphStore {
    /// Build a store from a finite edge sequence.
    pub fn build<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = EdgeRecord>,
    {
        let mut builder = GraphBuilder::new();
        builder.extend(edges);
        builder.finish()
    }

    /// Helper to create a store from `(from, to, weight)` tuples (test support)
    pub fn from_tuples(edges: &[(NodeId, NodeId, Weight)]) -> Self {
        Self::build(edges.iter().copied().map(EdgeRecord::from))
    }

    /// Build a store from a fallible edge sequence, stopping at the first error.
    pub fn try_build<I, E>(edges: I) -> Result<Self, E>
    where
        I: IntoIterator<Item = Result<EdgeRecord, E>>,
    {
        let mut builder = GraphBuilder::new();
        for edge in edges {
            builder.add_edge(edge?);
        }
        Ok(builder.finish())
    }

    pub fn node_count(&self) -> usize {
        self.index_to_node.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index_to_node.is_empty()
    }

    /// Neighbors of a node as `(neighbor_index, weight)` pairs.
    pub fn neighbors(&self, idx: NodeIndex) -> GraphResult<Neighbors<'_>> {
        self.check_index(idx)?;
        let (targets, weights) = self.adjacency(idx);
        Ok(Neighbors { targets, weights })
    }

    /// Number of adjacency entries of a node
    pub fn degree(&self, idx: NodeIndex) -> GraphResult<usize> {
        self.check_index(idx)?;
        Ok(self.offsets[idx + 1] - self.offsets[idx])
    }

    pub fn index_of(&self, id: NodeId) -> GraphResult<NodeIndex> {
        self.node_to_index
            .get(&id)
            .copied()
            .ok_or(GraphError::UnknownNode(id))
    }

    pub fn raw_id_of(&self, idx: NodeIndex) -> GraphResult<NodeId> {
        self.index_to_node
            .get(idx)
            .copied()
            .ok_or(GraphError::IndexOutOfRange {
                index: idx,
                node_count: self.node_count(),
            })
    }

    /// All accepted edges in insertion order
    pub fn edges(&self) -> &[StoredEdge] {
        &self.edges
    }

    pub fn total_weight(&self) -> u64 {
        self.edges
            .iter()
            .fold(0u64, |acc, e| acc.saturating_add(e.weight))
    }

    /// Write the adjacency as an edge list, one line per direction, using raw ids.
    ///
    /// Each line follows networkx's textual format: `u v {'weight': w}`.
    pub fn write_edge_list<W: Write>(&self, mut out: W) -> io::Result<()> {
        for (u, &u_id) in self.index_to_node.iter().enumerate() {
            let (targets, weights) = self.adjacency(u);
            for (&v, &w) in targets.iter().zip(weights) {
                writeln!(out, "{} {} {{'weight': {}}}", u_id, self.index_to_node[v], w)?;
            }
        }
        out.flush()
    }

    pub(crate) fn check_index(&self, idx: NodeIndex) -> GraphResult<()> {
        if idx < self.node_count() {
            Ok(())
        } else {
            Err(GraphError::IndexOutOfRange {
                index: idx,
                node_count: self.node_count(),
            })
        }
    }

    /// Unchecked adjacency slices; callers validate `idx` first.
    #[inline]
    pub(crate) fn adjacency(&self, idx: NodeIndex) -> (&[NodeIndex], &[Weight]) {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        (&self.targets[start..end], &self.weights[start..end])
    }
}

/// Iterator over `(neighbor_index, weight)` pairs of one node.
#[derive(Debug, Clone)]
pub struct Neighbors<'a> {
    targets: &'a [NodeIndex],
    weights: &'a [Weight],
}

impl Iterator for Neighbors<'_> {
    type Item = (NodeIndex, Weight);

    fn next(&mut self) -> Option<Self::Item> {
        let (&target, targets) = self.targets.split_first()?;
        let (&weight, weights) = self.weights.split_first()?;
        self.targets = targets;
        self.weights = weights;
        Some((target, weight))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.targets.len(), Some(self.targets.len()))
    }
}

impl ExactSizeIterator for Neighbors<'_> {}

/// Accumulates edge records and freezes them into a [`GraphStore`].
#[derive(Debug, Default)]
pub struct GraphBuilder {
    index_to_node: Vec<NodeId>,
    node_to_index: FxHashMap<NodeId, NodeIndex>,
    edges: Vec<StoredEdge>,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for the expected number of nodes and edges
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        let mut builder = Self::new();
        builder.reserve(nodes, edges);
        builder
    }

    pub fn reserve(&mut self, nodes: usize, edges: usize) {
        self.index_to_node.reserve(nodes);
        self.node_to_index.reserve(nodes);
        self.edges.reserve(edges);
    }

    /// Fallible [`reserve`](Self::reserve) for sizes taken from untrusted input.
    pub fn try_reserve(&mut self, nodes: usize, edges: usize) -> Result<(), TryReserveError> {
        self.index_to_node.try_reserve(nodes)?;
        self.node_to_index.try_reserve(nodes)?;
        self.edges.try_reserve(edges)
    }

    pub fn add_edge(&mut self, edge: EdgeRecord) {
        let source = self.intern(edge.from);
        let target = self.intern(edge.to);
        self.edges.push(StoredEdge {
            source,
            target,
            weight: edge.weight,
        });
    }

    pub fn node_count(&self) -> usize {
        self.index_to_node.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn intern(&mut self, id: NodeId) -> NodeIndex {
        let next = self.index_to_node.len();
        let idx = *self.node_to_index.entry(id).or_insert(next);
        if idx == next {
            self.index_to_node.push(id);
        }
        idx
    }

    /// Lay out the CSR arrays: one counting pass, one fill pass.
    pub fn finish(self) -> GraphStore {
        let node_count = self.index_to_node.len();

        let mut offsets = vec![0usize; node_count + 1];
        for edge in &self.edges {
            offsets[edge.source + 1] += 1;
            if !edge.is_self_loop() {
                offsets[edge.target + 1] += 1;
            }
        }
        for i in 0..node_count {
            offsets[i + 1] += offsets[i];
        }

        let entries = offsets[node_count];
        let mut targets = vec![0; entries];
        let mut weights = vec![0; entries];
        let mut cursor = offsets[..node_count].to_vec();

        for edge in &self.edges {
            let slot = cursor[edge.source];
            targets[slot] = edge.target;
            weights[slot] = edge.weight;
            cursor[edge.source] += 1;

            if !edge.is_self_loop() {
                let slot = cursor[edge.target];
                targets[slot] = edge.source;
                weights[slot] = edge.weight;
                cursor[edge.target] += 1;
            }
        }

        debug!(
            "Built graph store: {} nodes, {} edges, {} adjacency entries",
            node_count,
            self.edges.len(),
            entries
        );

        GraphStore {
            index_to_node: self.index_to_node,
            node_to_index: self.node_to_index,
            offsets,
            targets,
            weights,
            edges: self.edges,
        }
    }
}

impl Extend<EdgeRecord> for GraphBuilder {
    fn extend<T: IntoIterator<Item = EdgeRecord>>(&mut self, iter: T) {
        for edge in iter {
            self.add_edge(edge);
        }
    }
}
