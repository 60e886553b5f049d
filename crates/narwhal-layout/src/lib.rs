#![forbid(unsafe_code)]

//! Headless 2-D graph layout algorithms.
//!
//! Every algorithm is a pure function of graph structure and options. The two randomized ones
//! (`spring`, `random`) draw from a seeded [`rng::XorShift64Star`], so identical inputs yield
//! bit-identical positions across runs and platforms.

pub mod algo;
pub mod error;
mod result;
pub mod rng;

pub use algo::{
    Algorithm, DEFAULT_SEED, KamadaKawaiOptions, RandomOptions, ShellOptions, SpiralOptions,
    SpringOptions,
};
pub use error::{Error, Result};
pub use narwhal_graphlib::Graph;
pub use result::{LayoutResult, Point};

/// Headless layout entry point.
pub fn layout(graph: &Graph, algorithm: &Algorithm) -> Result<LayoutResult> {
    let coords = match algorithm {
        Algorithm::Spring(opts) => algo::spring::layout(graph, opts),
        Algorithm::Circular => algo::circular::layout(graph),
        Algorithm::Random(opts) => algo::random::layout(graph, opts),
        Algorithm::Shell(opts) => return Ok(algo::circular::shell_layout(graph, opts)),
        Algorithm::KamadaKawai(opts) => algo::kamada_kawai::layout(graph, opts),
        Algorithm::Spectral => algo::spectral::layout(graph)?,
        Algorithm::Spiral(opts) => algo::spiral::layout(graph, opts),
    };
    Ok(algo::collect_positions(graph, &coords))
}
