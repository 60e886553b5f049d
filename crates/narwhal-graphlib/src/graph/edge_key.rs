//! Edge key types.
//!
//! Undirected edges are stored under a canonical `(lo, hi)` pair of node indices so that
//! `(a, b)` and `(b, a)` address the same edge.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(in crate::graph) struct IndexPair {
    pub(in crate::graph) lo: usize,
    pub(in crate::graph) hi: usize,
}

impl IndexPair {
    pub(in crate::graph) fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }
}

