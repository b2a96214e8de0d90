//! Shared types for graph algorithms
//!
//! Raw node ids, dense indices, edge records and the error type returned by
//! every store and algorithm entry point.

use thiserror::Error;

/// Raw node identifier as it appears in the input (u64)
pub type NodeId = u64;

/// Dense index (0..N) assigned to a node in order of first appearance
pub type NodeIndex = usize;

/// Non-negative edge weight
pub type Weight = u64;

/// Accumulated path length
pub type Distance = u64;

/// Errors caused by misuse of the store or algorithm API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node index {index} out of range (node count {node_count})")]
    IndexOutOfRange { index: NodeIndex, node_count: usize },

    #[error("Node {0} not found")]
    UnknownNode(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// An undirected weighted edge between two raw node ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeRecord {
    pub from: NodeId,
    pub to: NodeId,
    pub weight: Weight,
}

impl EdgeRecord {
    pub fn new(from: NodeId, to: NodeId, weight: Weight) -> Self {
        Self { from, to, weight }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

impl From<(NodeId, NodeId, Weight)> for EdgeRecord {
    fn from((from, to, weight): (NodeId, NodeId, Weight)) -> Self {
        Self::new(from, to, weight)
    }
}

/// An edge as kept by the store, expressed in dense indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StoredEdge {
    pub source: NodeIndex,
    pub target: NodeIndex,
    pub weight: Weight,
}

impl StoredEdge {
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}
