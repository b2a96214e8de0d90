//! Connectivity
//!
//! Union-Find (disjoint-set) structure and connected component counting.

use super::common::NodeIndex;
use super::store::GraphStore;

/// Union-Find data structure
///
/// Union by rank with path compression; `find` and `union` run in
/// near-constant amortized time.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
    sets: usize,
}

impl UnionFind {
    pub fn new(size: usize) -> Self {
        UnionFind {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets: size,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets
    pub fn set_count(&self) -> usize {
        self.sets
    }

    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        // Path compression
        let mut curr = i;
        while self.parent[curr] != root {
            let next = self.parent[curr];
            self.parent[curr] = root;
            curr = next;
        }

        root
    }

    /// Merge the sets containing `i` and `j`. Returns false if they were already joined.
    pub fn union(&mut self, i: usize, j: usize) -> bool {
        let root_i = self.find(i);
        let root_j = self.find(j);

        if root_i == root_j {
            return false;
        }

        if self.rank[root_i] < self.rank[root_j] {
            self.parent[root_i] = root_j;
        } else if self.rank[root_i] > self.rank[root_j] {
            self.parent[root_j] = root_i;
        } else {
            self.parent[root_j] = root_i;
            self.rank[root_i] += 1;
        }
        self.sets -= 1;
        true
    }

    pub fn connected(&mut self, i: usize, j: usize) -> bool {
        self.find(i) == self.find(j)
    }
}

/// Result of connected component labelling
#[derive(Debug, Clone)]
pub struct ComponentSummary {
    /// Component id per node index, numbered 0.. in order of first appearance
    component: Vec<usize>,
    sizes: Vec<usize>,
}

impl ComponentSummary {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    pub fn component_of(&self, idx: NodeIndex) -> Option<usize> {
        self.component.get(idx).copied()
    }

    /// Node count per component id
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn largest(&self) -> usize {
        self.sizes.iter().copied().max().unwrap_or(0)
    }
}

/// Connected components of the undirected graph.
pub fn connected_components(store: &GraphStore) -> ComponentSummary {
    let n = store.node_count();
    let mut uf = UnionFind::new(n);

    for edge in store.edges() {
        uf.union(edge.source, edge.target);
    }

    let mut root_to_component = vec![usize::MAX; n];
    let mut component = Vec::with_capacity(n);
    let mut sizes = Vec::with_capacity(uf.set_count());

    for i in 0..n {
        let root = uf.find(i);
        if root_to_component[root] == usize::MAX {
            root_to_component[root] = sizes.len();
            sizes.push(0);
        }
        let id = root_to_component[root];
        sizes[id] += 1;
        component.push(id);
    }

    ComponentSummary { component, sizes }
}
