//! Pathfinding algorithms
//!
//! Single-source shortest paths with Dijkstra's algorithm over a [`GraphStore`].

use super::common::{Distance, GraphResult, NodeId, NodeIndex};
use super::store::GraphStore;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

const UNREACHED: Distance = Distance::MAX;
const NO_PRED: NodeIndex = NodeIndex::MAX;

/// Result of a pathfinding query, expressed in raw node ids
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    pub path: Vec<NodeId>,
    pub cost: Distance,
}

/// State for Dijkstra priority queue
#[derive(Copy, Clone, PartialEq, Eq)]
struct State {
    cost: Distance,
    node_idx: NodeIndex,
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare costs reversed for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node_idx.cmp(&self.node_idx))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Distances and predecessors of every node finalized by one Dijkstra run.
///
/// Nodes that were never finalized (unreachable, or still queued when an
/// early exit happened) are absent.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    source: NodeIndex,
    dist: Vec<Distance>,
    pred: Vec<NodeIndex>,
    settled: Vec<bool>,
    settled_count: usize,
}

impl ShortestPaths {
    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Number of finalized nodes
    pub fn len(&self) -> usize {
        self.settled_count
    }

    pub fn is_empty(&self) -> bool {
        self.settled_count == 0
    }

    pub fn contains(&self, idx: NodeIndex) -> bool {
        self.settled.get(idx).copied().unwrap_or(false)
    }

    pub fn distance(&self, idx: NodeIndex) -> Option<Distance> {
        self.contains(idx).then(|| self.dist[idx])
    }

    /// Previous node on the shortest path; `None` for the source and absent nodes.
    pub fn predecessor(&self, idx: NodeIndex) -> Option<NodeIndex> {
        if !self.contains(idx) || self.pred[idx] == NO_PRED {
            return None;
        }
        Some(self.pred[idx])
    }

    /// `(index, distance, predecessor)` for every finalized node, in index order
    pub fn iter(&self) -> impl Iterator<Item = (NodeIndex, Distance, Option<NodeIndex>)> + '_ {
        (0..self.settled.len())
            .filter(move |&idx| self.settled[idx])
            .map(move |idx| (idx, self.dist[idx], self.predecessor(idx)))
    }

    /// Node indices from the source to `target`, both inclusive.
    pub fn path_to(&self, target: NodeIndex) -> Option<Vec<NodeIndex>> {
        if !self.contains(target) {
            return None;
        }

        let mut path = vec![target];
        let mut curr = target;
        while let Some(prev) = self.predecessor(curr) {
            path.push(prev);
            curr = prev;
        }
        path.reverse();
        Some(path)
    }

    /// Resolve the path to `target` into raw node ids.
    pub fn resolve(&self, store: &GraphStore, target: NodeIndex) -> GraphResult<Option<PathResult>> {
        let Some(indices) = self.path_to(target) else {
            return Ok(None);
        };

        let path = indices
            .into_iter()
            .map(|idx| store.raw_id_of(idx))
            .collect::<GraphResult<Vec<_>>>()?;

        Ok(Some(PathResult {
            source: store.raw_id_of(self.source)?,
            target: store.raw_id_of(target)?,
            path,
            cost: self.dist[target],
        }))
    }

    /// Resolve several targets at once; unreachable ones map to `None`.
    pub fn paths_to(
        &self,
        store: &GraphStore,
        targets: &[NodeIndex],
    ) -> GraphResult<Vec<Option<PathResult>>> {
        targets.iter().map(|&t| self.resolve(store, t)).collect()
    }
}

/// Dijkstra's Algorithm (Weighted Shortest Path)
///
/// Uses lazy deletion: a node may sit in the heap several times and stale
/// entries are skipped when popped. With `target` set, the search stops
/// right after that node is finalized.
pub fn single_source(
    store: &GraphStore,
    source: NodeIndex,
    target: Option<NodeIndex>,
) -> GraphResult<ShortestPaths> {
    store.check_index(source)?;
    if let Some(t) = target {
        store.check_index(t)?;
    }

    let n = store.node_count();
    let mut dist = vec![UNREACHED; n];
    let mut pred = vec![NO_PRED; n];
    let mut settled = vec![false; n];
    let mut settled_count = 0;
    let mut heap = BinaryHeap::new();

    dist[source] = 0;
    heap.push(State { cost: 0, node_idx: source });

    while let Some(State { cost, node_idx }) = heap.pop() {
        if settled[node_idx] {
            continue;
        }
        settled[node_idx] = true;
        settled_count += 1;

        if Some(node_idx) == target {
            break;
        }

        let (targets, weights) = store.adjacency(node_idx);
        for (&next_idx, &weight) in targets.iter().zip(weights) {
            if settled[next_idx] {
                continue;
            }

            // A sum past u64::MAX cannot be told apart from UNREACHED
            let Some(next_cost) = cost.checked_add(weight) else {
                continue;
            };
            if next_cost < dist[next_idx] {
                dist[next_idx] = next_cost;
                pred[next_idx] = node_idx;
                heap.push(State { cost: next_cost, node_idx: next_idx });
            }
        }
    }

    Ok(ShortestPaths {
        source,
        dist,
        pred,
        settled,
        settled_count,
    })
}

/// Shortest path between two raw node ids.
///
/// Returns `Ok(None)` when `target` is unreachable from `source`.
pub fn shortest_path(
    store: &GraphStore,
    source: NodeId,
    target: NodeId,
) -> GraphResult<Option<PathResult>> {
    let source_idx = store.index_of(source)?;
    let target_idx = store.index_of(target)?;

    let paths = single_source(store, source_idx, Some(target_idx))?;
    paths.resolve(store, target_idx)
}
