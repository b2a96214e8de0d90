//! Minimum Spanning Tree algorithms
//!
//! Kruskal's algorithm over a union-find, plus Prim's algorithm for
//! cross-checking, in two flavours: on the addressable pairing heap with
//! decrease-key, and on `BinaryHeap` with lazy deletion. All return a
//! spanning forest: one tree per connected component.

use super::common::{NodeIndex, StoredEdge, Weight};
use super::community::UnionFind;
use super::heap::{HeapHandle, PairingHeap};
use super::store::GraphStore;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// Edges of a minimum spanning forest
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpanningForest {
    pub node_count: usize,
    pub edges: Vec<StoredEdge>,
    pub total_weight: u64,
}

impl SpanningForest {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of trees, i.e. connected components of the input graph
    pub fn tree_count(&self) -> usize {
        self.node_count.saturating_sub(self.edges.len())
    }

    fn push(&mut self, edge: StoredEdge) {
        self.total_weight = self.total_weight.saturating_add(edge.weight);
        self.edges.push(edge);
    }
}

/// Kruskal's Algorithm for Minimum Spanning Forest
///
/// Edges are sorted by weight with a stable sort, so ties are broken by
/// insertion order and the output is reproducible. Self-loops are never
/// selected.
pub fn kruskal(store: &GraphStore) -> SpanningForest {
    let n = store.node_count();
    let edges = store.edges();

    let mut forest = SpanningForest {
        node_count: n,
        edges: Vec::with_capacity(n.saturating_sub(1)),
        total_weight: 0,
    };
    if n == 0 {
        return forest;
    }

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_by_key(|&i| edges[i].weight);

    let mut uf = UnionFind::new(n);
    let limit = n - 1;

    for i in order {
        // A spanning tree of the whole graph cannot grow further
        if forest.len() == limit {
            break;
        }

        let edge = edges[i];
        if uf.union(edge.source, edge.target) {
            forest.push(edge);
        }
    }

    forest
}

#[derive(Copy, Clone, PartialEq, Eq)]
struct EdgeState {
    weight: Weight,
    source: NodeIndex,
    target: NodeIndex,
}

impl Ord for EdgeState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse for min-heap
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.target.cmp(&self.target))
            .then_with(|| other.source.cmp(&self.source))
    }
}

impl PartialOrd for EdgeState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Prim's Algorithm for Minimum Spanning Forest
///
/// Each node sits in the pairing heap at most once, keyed by the cheapest
/// edge seen so far into the tree; a cheaper edge lowers that key in place.
/// Grows a tree from the lowest unvisited index and restarts on the next
/// unvisited node once the heap drains, so disconnected graphs yield a
/// forest with the same total weight as [`kruskal`].
pub fn prim(store: &GraphStore) -> SpanningForest {
    let n = store.node_count();
    let mut forest = SpanningForest {
        node_count: n,
        edges: Vec::with_capacity(n.saturating_sub(1)),
        total_weight: 0,
    };

    let mut visited = vec![false; n];
    let mut handle: Vec<Option<HeapHandle>> = vec![None; n];
    let mut parent = vec![NodeIndex::MAX; n];
    let mut heap = PairingHeap::with_capacity(n);

    for start_idx in 0..n {
        if visited[start_idx] {
            continue;
        }
        handle[start_idx] = Some(heap.insert(start_idx, 0));

        while let Some((u, weight)) = heap.delete_min() {
            visited[u] = true;
            if parent[u] != NodeIndex::MAX {
                forest.push(StoredEdge { source: parent[u], target: u, weight });
            }

            let (targets, weights) = store.adjacency(u);
            for (&v, &w) in targets.iter().zip(weights) {
                if visited[v] {
                    continue;
                }
                let improved = match handle[v] {
                    Some(h) => heap.decrease_key(h, w),
                    None => {
                        handle[v] = Some(heap.insert(v, w));
                        true
                    }
                };
                if improved {
                    parent[v] = u;
                }
            }
        }
    }

    forest
}

/// Prim's algorithm on `BinaryHeap` with lazy deletion.
///
/// Every candidate edge is pushed and stale ones are skipped when popped.
/// Same forest weight as [`prim`].
pub fn prim_lazy(store: &GraphStore) -> SpanningForest {
    let n = store.node_count();
    let mut forest = SpanningForest {
        node_count: n,
        edges: Vec::with_capacity(n.saturating_sub(1)),
        total_weight: 0,
    };

    let mut visited = vec![false; n];
    let mut heap = BinaryHeap::new();

    for start_idx in 0..n {
        if visited[start_idx] {
            continue;
        }

        visited[start_idx] = true;
        add_edges(store, start_idx, &mut heap, &visited);

        while let Some(EdgeState { weight, source, target }) = heap.pop() {
            if visited[target] {
                continue;
            }

            visited[target] = true;
            forest.push(StoredEdge { source, target, weight });

            add_edges(store, target, &mut heap, &visited);
        }
    }

    forest
}

fn add_edges(store: &GraphStore, u: NodeIndex, heap: &mut BinaryHeap<EdgeState>, visited: &[bool]) {
    let (targets, weights) = store.adjacency(u);
    for (&v, &weight) in targets.iter().zip(weights) {
        if !visited[v] {
            heap.push(EdgeState { weight, source: u, target: v });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kruskal_triangle() {
        // 1-2 (5), 2-3 (3), 1-3 (10)
        let store = GraphStore::from_tuples(&[(1, 2, 5), (2, 3, 3), (1, 3, 10)]);

        let result = kruskal(&store);
        assert_eq!(result.total_weight, 8);
        assert_eq!(result.len(), 2);
        assert_eq!(result.tree_count(), 1);

        // Cheapest first
        assert_eq!(result.edges[0], StoredEdge { source: 1, target: 2, weight: 3 });
        assert_eq!(result.edges[1], StoredEdge { source: 0, target: 1, weight: 5 });
    }

    #[test]
    fn test_kruskal_ties_follow_insertion_order() {
        let store = GraphStore::from_tuples(&[(1, 2, 1), (2, 3, 1), (1, 3, 1)]);
        let result = kruskal(&store);

        assert_eq!(result.edges, store.edges()[..2].to_vec());
    }

    #[test]
    fn test_disconnected_forest() {
        let store = GraphStore::from_tuples(&[(1, 2, 4), (3, 4, 6), (4, 3, 2)]);

        let result = kruskal(&store);
        assert_eq!(result.len(), 2);
        assert_eq!(result.tree_count(), 2);
        assert_eq!(result.total_weight, 6);
    }

    #[test]
    fn test_self_loops_never_selected() {
        let store = GraphStore::from_tuples(&[(1, 1, 0), (1, 2, 3), (2, 2, 0)]);

        for result in [kruskal(&store), prim(&store), prim_lazy(&store)] {
            assert_eq!(result.len(), 1);
            assert!(result.edges.iter().all(|e| !e.is_self_loop()));
        }
    }

    #[test]
    fn test_prim_matches_kruskal() {
        let store = GraphStore::from_tuples(&[
            (0, 1, 4),
            (0, 7, 8),
            (1, 2, 8),
            (1, 7, 11),
            (2, 3, 7),
            (2, 5, 4),
            (2, 8, 2),
            (3, 4, 9),
            (3, 5, 14),
            (4, 5, 10),
            (5, 6, 2),
            (6, 7, 1),
            (6, 8, 6),
            (7, 8, 7),
            (20, 21, 3),
        ]);

        let k = kruskal(&store);
        assert_eq!(k.total_weight, 37 + 3);
        for p in [prim(&store), prim_lazy(&store)] {
            assert_eq!(p.total_weight, k.total_weight);
            assert_eq!(p.len(), k.len());
        }
        assert_eq!(k.tree_count(), 2);
    }

    #[test]
    fn test_empty_graph() {
        let store = GraphStore::default();
        assert!(kruskal(&store).is_empty());
        assert!(prim(&store).is_empty());
        assert!(prim_lazy(&store).is_empty());
    }

    #[test]
    fn test_prim_lowers_key_on_cheaper_edge() {
        // 3 is first reached over the 9 edge, then lowered to 2 via node 2
        let store = GraphStore::from_tuples(&[(1, 3, 9), (1, 2, 1), (2, 3, 2)]);
        let forest = prim(&store);

        assert_eq!(forest.total_weight, 3);
        assert!(forest.edges.contains(&StoredEdge { source: 2, target: 1, weight: 2 }));
        assert!(!forest.edges.iter().any(|e| e.weight == 9));
    }

    #[test]
    fn test_tree_count_never_underflows() {
        let forest = SpanningForest {
            node_count: 1,
            edges: vec![StoredEdge { source: 0, target: 0, weight: 1 }; 3],
            total_weight: 3,
        };
        assert_eq!(forest.tree_count(), 0);
    }
}
