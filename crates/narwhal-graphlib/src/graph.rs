//! Undirected simple graph container.
//!
//! Nodes are addressed by string id and also by a dense index (`0..node_count()`) assigned in
//! first-insertion order. Layout code works on indices; callers work on ids.

use rustc_hash::FxBuildHasher;

mod edge_key;

use edge_key::IndexPair;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;
type HashSet<K> = hashbrown::HashSet<K, FxBuildHasher>;

#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<String>,
    node_index: HashMap<String, usize>,

    // Endpoint indices in the orientation each edge was first inserted with.
    edges: Vec<(usize, usize)>,
    edge_set: HashSet<IndexPair>,

    // Neighbor lists in edge-insertion order. A self loop lists the node once.
    adjacency: Vec<Vec<usize>>,
    // networkx-compatible degree: a self loop contributes two.
    degrees: Vec<usize>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from `(v, w)` pairs, inserting endpoints in the order they appear.
    pub fn from_edges<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut g = Self::new();
        for (v, w) in edges {
            g.set_edge(v, w);
        }
        g
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> usize {
        let id = id.into();
        if let Some(&idx) = self.node_index.get(&id) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(id.clone());
        self.node_index.insert(id, idx);
        self.adjacency.push(Vec::new());
        self.degrees.push(0);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    /// Id of the node at `idx`.
    ///
    /// Panics when `idx >= node_count()`, like slice indexing.
    pub fn node_id(&self, idx: usize) -> &str {
        &self.nodes[idx]
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Endpoint ids in edge-insertion order, oriented as first inserted.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges
            .iter()
            .map(|&(v, w)| (self.nodes[v].as_str(), self.nodes[w].as_str()))
    }

    /// Edge endpoints as node indices `(lo, hi)`, in edge-insertion order.
    pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.edges.iter().map(|&(v, w)| {
            let pair = IndexPair::new(v, w);
            (pair.lo, pair.hi)
        })
    }

    /// Inserts the undirected edge `v -- w`. Inserting an existing edge (in either orientation)
    /// is a no-op.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        let v_ix = self.ensure_node(v);
        let w_ix = self.ensure_node(w);

        if !self.edge_set.insert(IndexPair::new(v_ix, w_ix)) {
            return self;
        }
        self.edges.push((v_ix, w_ix));

        if v_ix == w_ix {
            self.adjacency[v_ix].push(v_ix);
            self.degrees[v_ix] += 2;
        } else {
            self.adjacency[v_ix].push(w_ix);
            self.adjacency[w_ix].push(v_ix);
            self.degrees[v_ix] += 1;
            self.degrees[w_ix] += 1;
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str) -> bool {
        match (self.node_index(v), self.node_index(w)) {
            (Some(a), Some(b)) => self.edge_set.contains(&IndexPair::new(a, b)),
            _ => false,
        }
    }

    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let Some(idx) = self.node_index(v) else {
            return Vec::new();
        };
        self.adjacency[idx]
            .iter()
            .map(|&n| self.nodes[n].as_str())
            .collect()
    }

    pub fn neighbor_indices(&self, idx: usize) -> &[usize] {
        self.adjacency.get(idx).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of incident edges; `None` for unknown nodes.
    pub fn degree(&self, v: &str) -> Option<usize> {
        self.node_index(v).map(|idx| self.degrees[idx])
    }
}

pub mod alg;
