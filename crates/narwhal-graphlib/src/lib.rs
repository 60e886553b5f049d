#![forbid(unsafe_code)]

//! Graph container APIs used by `narwhal-layout`.
//!
//! The graph is undirected and simple: repeated edges collapse into one, and node order is the
//! order in which endpoints were first seen. Layout algorithms rely on that order for
//! determinism, so it is part of the public contract.

pub mod graph;

pub use graph::{Graph, alg};
